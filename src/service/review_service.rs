use std::sync::Arc;

use crate::db::db::DBClient;
use crate::db::projectdb::ProjectExt;
use crate::db::proposaldb::ProposalExt;
use crate::db::reviewdb::ReviewExt;
use crate::db::userdb::UserExt;
use crate::models::reviewmodel::{
    GivenReviewRow, ReceivedReviewRow, Review, ReviewDetails,
};
use crate::models::usermodel::User;

use super::access;
use super::error::ServiceError;

#[derive(Debug, Clone)]
pub struct ReviewService {
    db_client: Arc<DBClient>,
}

impl ReviewService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Reviews travel between the two confirmed participants of an
    /// engagement, in either direction. The eligible freelancer side must
    /// hold an accepted proposal on the project.
    pub async fn create_review(
        &self,
        reviewer: &User,
        reviewee_id: i64,
        project_id: i64,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, ServiceError> {
        let project = self
            .db_client
            .get_project(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))?;

        if reviewer.id == reviewee_id {
            return Err(ServiceError::SelfReview);
        }

        let reviewee = self
            .db_client
            .get_user(Some(reviewee_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(reviewee_id))?;

        let freelancer_id =
            access::review_engagement_freelancer(reviewer, &reviewee, &project)?;

        if !self
            .db_client
            .has_accepted_proposal(project_id, freelancer_id)
            .await?
        {
            return Err(ServiceError::NotParticipant(reviewer.id, project_id));
        }

        // One review per (reviewer, reviewee, project); the constraint
        // arbitrates concurrent duplicates.
        self.db_client
            .save_review(rating, comment, reviewer.id, reviewee_id, project_id)
            .await
            .map_err(|err| ServiceError::on_unique_violation(err, ServiceError::DuplicateReview))
    }

    pub async fn reviews_by_reviewee(
        &self,
        user: &User,
        reviewee_id: i64,
    ) -> Result<Vec<ReceivedReviewRow>, ServiceError> {
        access::require_review_history_access(user, reviewee_id)?;

        let reviews = self.db_client.get_reviews_by_reviewee(reviewee_id).await?;
        Ok(reviews)
    }

    pub async fn reviews_by_reviewer(
        &self,
        user: &User,
        reviewer_id: i64,
    ) -> Result<Vec<GivenReviewRow>, ServiceError> {
        access::require_review_history_access(user, reviewer_id)?;

        let reviews = self.db_client.get_reviews_by_reviewer(reviewer_id).await?;
        Ok(reviews)
    }

    pub async fn get_review(
        &self,
        user: &User,
        review_id: i64,
    ) -> Result<ReviewDetails, ServiceError> {
        let review = self
            .db_client
            .get_review(review_id)
            .await?
            .ok_or(ServiceError::ReviewNotFound(review_id))?;

        if !access::can_view_review(user, &review) {
            return Err(ServiceError::PermissionDenied(
                "You are not allowed to view this review".to_string(),
            ));
        }

        Ok(review)
    }

    /// Scoped to the original reviewer; a wrong reviewer and a missing
    /// review are indistinguishable to the caller.
    pub async fn update_review(
        &self,
        user: &User,
        review_id: i64,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> Result<Review, ServiceError> {
        self.db_client
            .update_review(review_id, user.id, rating, comment)
            .await?
            .ok_or(ServiceError::ReviewNotFound(review_id))
    }

    pub async fn delete_review(&self, user: &User, review_id: i64) -> Result<(), ServiceError> {
        self.db_client
            .delete_review(review_id, user.id)
            .await?
            .ok_or(ServiceError::ReviewNotFound(review_id))?;

        Ok(())
    }
}
