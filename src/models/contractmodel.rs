use bigdecimal::BigDecimal;
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "contract_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Active,
    Completed,
    Broken,
}

impl ContractStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ContractStatus::Active => "active",
            ContractStatus::Completed => "completed",
            ContractStatus::Broken => "broken",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Contract {
    pub id: i64,
    pub terms: String,
    pub amount: BigDecimal,
    pub project_id: i64,
    pub freelancer_id: i64,
    pub company_id: i64,
    pub status: ContractStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Contract joined with project title and both party names, used for the
/// single read and the per-user listings.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ContractSummary {
    pub id: i64,
    pub terms: String,
    pub amount: BigDecimal,
    pub status: ContractStatus,
    pub project_id: i64,
    pub project_title: String,
    pub freelancer_id: i64,
    pub freelancer_name: String,
    pub company_id: i64,
    pub company_name: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
