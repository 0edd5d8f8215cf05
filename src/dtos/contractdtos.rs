use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::contractmodel::ContractStatus;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateContractDto {
    #[validate(range(min = 1, message = "Project id must be a positive integer"))]
    pub project_id: i64,

    #[validate(length(min = 1, message = "Contract terms are required"))]
    pub terms: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContractStatusDto {
    pub status: ContractStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_terms() {
        let dto = CreateContractDto {
            project_id: 1,
            terms: "".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn status_update_rejects_unknown_status() {
        let parsed: Result<UpdateContractStatusDto, _> =
            serde_json::from_str(r#"{"status": "paused"}"#);
        assert!(parsed.is_err());
    }
}
