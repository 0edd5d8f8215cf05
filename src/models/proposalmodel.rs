use bigdecimal::BigDecimal;
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::projectmodel::ProjectStatus;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "proposal_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
        }
    }

    /// Pending moves to any status; accepted and rejected are terminal.
    /// Re-asserting the current status is a no-op, not a transition.
    pub fn can_transition_to(self, next: ProposalStatus) -> bool {
        self == ProposalStatus::Pending || self == next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_reaches_every_status() {
        assert!(ProposalStatus::Pending.can_transition_to(ProposalStatus::Pending));
        assert!(ProposalStatus::Pending.can_transition_to(ProposalStatus::Accepted));
        assert!(ProposalStatus::Pending.can_transition_to(ProposalStatus::Rejected));
    }

    #[test]
    fn accepted_and_rejected_are_terminal() {
        assert!(!ProposalStatus::Accepted.can_transition_to(ProposalStatus::Pending));
        assert!(!ProposalStatus::Accepted.can_transition_to(ProposalStatus::Rejected));
        assert!(!ProposalStatus::Rejected.can_transition_to(ProposalStatus::Pending));
        assert!(!ProposalStatus::Rejected.can_transition_to(ProposalStatus::Accepted));
    }

    #[test]
    fn reasserting_a_terminal_status_is_allowed() {
        assert!(ProposalStatus::Accepted.can_transition_to(ProposalStatus::Accepted));
        assert!(ProposalStatus::Rejected.can_transition_to(ProposalStatus::Rejected));
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Proposal {
    pub id: i64,
    pub amount: BigDecimal,
    pub description: String,
    pub freelancer_id: i64,
    pub project_id: i64,
    pub status: ProposalStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Proposal joined with its freelancer and owning project, used by the
/// single-proposal read and by ownership checks.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ProposalDetails {
    pub id: i64,
    pub amount: BigDecimal,
    pub description: String,
    pub status: ProposalStatus,
    pub freelancer_id: i64,
    pub freelancer_name: String,
    pub freelancer_email: String,
    pub project_id: i64,
    pub project_title: String,
    pub project_status: ProjectStatus,
    pub company_id: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Row shape for a company listing the proposals on one of its projects.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ProjectProposalRow {
    pub id: i64,
    pub amount: BigDecimal,
    pub description: String,
    pub status: ProposalStatus,
    pub freelancer_id: i64,
    pub freelancer_name: String,
    pub freelancer_email: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Row shape for a freelancer listing their own proposals.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct FreelancerProposalRow {
    pub id: i64,
    pub amount: BigDecimal,
    pub description: String,
    pub status: ProposalStatus,
    pub project_id: i64,
    pub project_title: String,
    pub project_description: String,
    pub project_status: ProjectStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
