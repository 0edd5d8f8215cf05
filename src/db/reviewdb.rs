use async_trait::async_trait;

use super::db::DBClient;
use crate::models::reviewmodel::{
    GivenReviewRow, ReceivedReviewRow, Review, ReviewDetails,
};

#[async_trait]
pub trait ReviewExt {
    /// Insert fails with a unique violation when the reviewer already rated
    /// this reviewee on this project.
    async fn save_review(
        &self,
        rating: i32,
        comment: Option<String>,
        reviewer_id: i64,
        reviewee_id: i64,
        project_id: i64,
    ) -> Result<Review, sqlx::Error>;

    async fn get_reviews_by_reviewee(
        &self,
        reviewee_id: i64,
    ) -> Result<Vec<ReceivedReviewRow>, sqlx::Error>;

    async fn get_reviews_by_reviewer(
        &self,
        reviewer_id: i64,
    ) -> Result<Vec<GivenReviewRow>, sqlx::Error>;

    async fn get_review(&self, review_id: i64) -> Result<Option<ReviewDetails>, sqlx::Error>;

    /// Scoped to the reviewer; a non-author caller sees zero rows.
    async fn update_review(
        &self,
        review_id: i64,
        reviewer_id: i64,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> Result<Option<Review>, sqlx::Error>;

    /// Scoped to the reviewer; returns the deleted id, if any.
    async fn delete_review(
        &self,
        review_id: i64,
        reviewer_id: i64,
    ) -> Result<Option<i64>, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn save_review(
        &self,
        rating: i32,
        comment: Option<String>,
        reviewer_id: i64,
        reviewee_id: i64,
        project_id: i64,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (rating, comment, reviewer_id, reviewee_id, project_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, rating, comment, reviewer_id, reviewee_id, project_id,
                created_at, updated_at
            "#,
        )
        .bind(rating)
        .bind(comment)
        .bind(reviewer_id)
        .bind(reviewee_id)
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_reviews_by_reviewee(
        &self,
        reviewee_id: i64,
    ) -> Result<Vec<ReceivedReviewRow>, sqlx::Error> {
        sqlx::query_as::<_, ReceivedReviewRow>(
            r#"
            SELECT
                r.id, r.rating, r.comment,
                reviewer.id AS reviewer_id, reviewer.name AS reviewer_name,
                reviewer.role AS reviewer_role,
                project.id AS project_id, project.title AS project_title,
                r.created_at
            FROM reviews r
            JOIN users reviewer ON r.reviewer_id = reviewer.id
            JOIN projects project ON r.project_id = project.id
            WHERE r.reviewee_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(reviewee_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_reviews_by_reviewer(
        &self,
        reviewer_id: i64,
    ) -> Result<Vec<GivenReviewRow>, sqlx::Error> {
        sqlx::query_as::<_, GivenReviewRow>(
            r#"
            SELECT
                r.id, r.rating, r.comment,
                reviewee.id AS reviewee_id, reviewee.name AS reviewee_name,
                reviewee.role AS reviewee_role,
                project.id AS project_id, project.title AS project_title,
                r.created_at
            FROM reviews r
            JOIN users reviewee ON r.reviewee_id = reviewee.id
            JOIN projects project ON r.project_id = project.id
            WHERE r.reviewer_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(reviewer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_review(&self, review_id: i64) -> Result<Option<ReviewDetails>, sqlx::Error> {
        sqlx::query_as::<_, ReviewDetails>(
            r#"
            SELECT
                r.id, r.rating, r.comment,
                reviewer.id AS reviewer_id, reviewer.name AS reviewer_name,
                reviewer.role AS reviewer_role,
                reviewee.id AS reviewee_id, reviewee.name AS reviewee_name,
                reviewee.role AS reviewee_role,
                project.id AS project_id, project.title AS project_title,
                r.created_at, r.updated_at
            FROM reviews r
            JOIN users reviewer ON r.reviewer_id = reviewer.id
            JOIN users reviewee ON r.reviewee_id = reviewee.id
            JOIN projects project ON r.project_id = project.id
            WHERE r.id = $1
            "#,
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_review(
        &self,
        review_id: i64,
        reviewer_id: i64,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = COALESCE($3, rating),
                comment = COALESCE($4, comment),
                updated_at = NOW()
            WHERE id = $1 AND reviewer_id = $2
            RETURNING id, rating, comment, reviewer_id, reviewee_id, project_id,
                created_at, updated_at
            "#,
        )
        .bind(review_id)
        .bind(reviewer_id)
        .bind(rating)
        .bind(comment)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_review(
        &self,
        review_id: i64,
        reviewer_id: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let deleted: Option<(i64,)> = sqlx::query_as(
            r#"
            DELETE FROM reviews
            WHERE id = $1 AND reviewer_id = $2
            RETURNING id
            "#,
        )
        .bind(review_id)
        .bind(reviewer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.map(|row| row.0))
    }
}
