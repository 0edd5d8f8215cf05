use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::usermodel::UserRole;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Review {
    pub id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewer_id: i64,
    pub reviewee_id: i64,
    pub project_id: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Review joined with both parties and the project, used by the single read.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ReviewDetails {
    pub id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewer_id: i64,
    pub reviewer_name: String,
    pub reviewer_role: UserRole,
    pub reviewee_id: i64,
    pub reviewee_name: String,
    pub reviewee_role: UserRole,
    pub project_id: i64,
    pub project_title: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Row shape for reviews received by a user.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ReceivedReviewRow {
    pub id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewer_id: i64,
    pub reviewer_name: String,
    pub reviewer_role: UserRole,
    pub project_id: i64,
    pub project_title: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Row shape for reviews written by a user.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct GivenReviewRow {
    pub id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewee_id: i64,
    pub reviewee_name: String,
    pub reviewee_role: UserRole,
    pub project_id: i64,
    pub project_title: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
