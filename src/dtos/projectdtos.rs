use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::projectmodel::ProjectStatus;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateProjectDto {
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title: String,

    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProjectDto {
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: Option<String>,

    pub status: Option<ProjectStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_short_title() {
        let dto = CreateProjectDto {
            title: "Web".to_string(),
            description: "A long enough description for the posting".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn update_with_no_fields_is_valid() {
        let dto = UpdateProjectDto::default();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn update_status_parses_snake_case() {
        let dto: UpdateProjectDto =
            serde_json::from_str(r#"{"status": "in_progress"}"#).unwrap();
        assert_eq!(dto.status, Some(ProjectStatus::InProgress));
    }
}
