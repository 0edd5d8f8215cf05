use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::proposalmodel::ProposalStatus;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateProposalDto {
    #[validate(range(min = 0.0, message = "Amount must be a positive number"))]
    pub amount: f64,

    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,

    #[validate(range(min = 1, message = "Project id must be a positive integer"))]
    pub project_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProposalStatusDto {
    pub status: ProposalStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_negative_amount() {
        let dto = CreateProposalDto {
            amount: -10.0,
            description: "I will build the website within two weeks".to_string(),
            project_id: 1,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn status_update_rejects_unknown_status() {
        let parsed: Result<UpdateProposalStatusDto, _> =
            serde_json::from_str(r#"{"status": "withdrawn"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn status_update_parses_allowed_statuses() {
        for (raw, expected) in [
            ("pending", ProposalStatus::Pending),
            ("accepted", ProposalStatus::Accepted),
            ("rejected", ProposalStatus::Rejected),
        ] {
            let parsed: UpdateProposalStatusDto =
                serde_json::from_str(&format!(r#"{{"status": "{}"}}"#, raw)).unwrap();
            assert_eq!(parsed.status, expected);
        }
    }
}
