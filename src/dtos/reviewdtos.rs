use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be an integer between 1 and 5"))]
    pub rating: i32,

    pub comment: Option<String>,

    #[validate(range(min = 1, message = "Reviewee id must be a positive integer"))]
    pub reviewee_id: i64,

    #[validate(range(min = 1, message = "Project id must be a positive integer"))]
    pub project_id: i64,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be an integer between 1 and 5"))]
    pub rating: Option<i32>,

    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_out_of_range_rating() {
        for rating in [0, 6] {
            let dto = CreateReviewDto {
                rating,
                comment: None,
                reviewee_id: 2,
                project_id: 1,
            };
            assert!(dto.validate().is_err(), "rating {} should fail", rating);
        }
    }

    #[test]
    fn update_with_only_comment_is_valid() {
        let dto = UpdateReviewDto {
            rating: None,
            comment: Some("Great collaboration".to_string()),
        };
        assert!(dto.validate().is_ok());
    }
}
