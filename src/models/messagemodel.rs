use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::usermodel::UserRole;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Message {
    pub id: i64,
    pub content: Option<String>,
    pub sender_id: i64,
    pub project_id: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Attachment {
    pub id: i64,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub message_id: i64,
    pub uploader_id: i64,
    pub project_id: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Message joined with its sender, as returned by the project conversation
/// listing.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct MessageWithSender {
    pub id: i64,
    pub content: Option<String>,
    pub sender_id: i64,
    pub sender_name: String,
    pub sender_role: UserRole,
    pub project_id: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
