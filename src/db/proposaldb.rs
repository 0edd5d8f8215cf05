use async_trait::async_trait;
use bigdecimal::BigDecimal;

use super::db::DBClient;
use crate::models::proposalmodel::{
    FreelancerProposalRow, ProjectProposalRow, Proposal, ProposalDetails, ProposalStatus,
};

#[async_trait]
pub trait ProposalExt {
    /// Insert fails with a unique violation when the freelancer already has a
    /// proposal on the project.
    async fn save_proposal<T: Into<String> + Send>(
        &self,
        amount: BigDecimal,
        description: T,
        freelancer_id: i64,
        project_id: i64,
    ) -> Result<Proposal, sqlx::Error>;

    async fn get_proposal_details(
        &self,
        proposal_id: i64,
    ) -> Result<Option<ProposalDetails>, sqlx::Error>;

    async fn get_proposals_by_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<ProjectProposalRow>, sqlx::Error>;

    async fn get_proposals_by_freelancer(
        &self,
        freelancer_id: i64,
    ) -> Result<Vec<FreelancerProposalRow>, sqlx::Error>;

    async fn update_proposal_status(
        &self,
        proposal_id: i64,
        status: ProposalStatus,
    ) -> Result<Proposal, sqlx::Error>;

    /// Conditioned on ownership and pending status so a raced or ineligible
    /// delete affects zero rows.
    async fn delete_pending_proposal(
        &self,
        proposal_id: i64,
        freelancer_id: i64,
    ) -> Result<Option<i64>, sqlx::Error>;

    async fn get_accepted_proposals_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<Proposal>, sqlx::Error>;

    async fn has_accepted_proposal(
        &self,
        project_id: i64,
        freelancer_id: i64,
    ) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl ProposalExt for DBClient {
    async fn save_proposal<T: Into<String> + Send>(
        &self,
        amount: BigDecimal,
        description: T,
        freelancer_id: i64,
        project_id: i64,
    ) -> Result<Proposal, sqlx::Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            INSERT INTO proposals (amount, description, freelancer_id, project_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, amount, description, freelancer_id, project_id, status,
                created_at, updated_at
            "#,
        )
        .bind(amount)
        .bind(description.into())
        .bind(freelancer_id)
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_proposal_details(
        &self,
        proposal_id: i64,
    ) -> Result<Option<ProposalDetails>, sqlx::Error> {
        sqlx::query_as::<_, ProposalDetails>(
            r#"
            SELECT
                p.id, p.amount, p.description, p.status,
                u.id AS freelancer_id, u.name AS freelancer_name, u.email AS freelancer_email,
                pr.id AS project_id, pr.title AS project_title, pr.status AS project_status,
                pr.company_id,
                p.created_at, p.updated_at
            FROM proposals p
            JOIN users u ON p.freelancer_id = u.id
            JOIN projects pr ON p.project_id = pr.id
            WHERE p.id = $1
            "#,
        )
        .bind(proposal_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_proposals_by_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<ProjectProposalRow>, sqlx::Error> {
        sqlx::query_as::<_, ProjectProposalRow>(
            r#"
            SELECT
                p.id, p.amount, p.description, p.status,
                u.id AS freelancer_id, u.name AS freelancer_name, u.email AS freelancer_email,
                p.created_at, p.updated_at
            FROM proposals p
            JOIN users u ON p.freelancer_id = u.id
            WHERE p.project_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_proposals_by_freelancer(
        &self,
        freelancer_id: i64,
    ) -> Result<Vec<FreelancerProposalRow>, sqlx::Error> {
        sqlx::query_as::<_, FreelancerProposalRow>(
            r#"
            SELECT
                p.id, p.amount, p.description, p.status,
                pr.id AS project_id, pr.title AS project_title,
                pr.description AS project_description, pr.status AS project_status,
                p.created_at, p.updated_at
            FROM proposals p
            JOIN projects pr ON p.project_id = pr.id
            WHERE p.freelancer_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_proposal_status(
        &self,
        proposal_id: i64,
        status: ProposalStatus,
    ) -> Result<Proposal, sqlx::Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            UPDATE proposals
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, amount, description, freelancer_id, project_id, status,
                created_at, updated_at
            "#,
        )
        .bind(proposal_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_pending_proposal(
        &self,
        proposal_id: i64,
        freelancer_id: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let deleted: Option<(i64,)> = sqlx::query_as(
            r#"
            DELETE FROM proposals
            WHERE id = $1 AND freelancer_id = $2 AND status = 'pending'::proposal_status
            RETURNING id
            "#,
        )
        .bind(proposal_id)
        .bind(freelancer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.map(|row| row.0))
    }

    async fn get_accepted_proposals_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<Proposal>, sqlx::Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            SELECT id, amount, description, freelancer_id, project_id, status,
                created_at, updated_at
            FROM proposals
            WHERE project_id = $1 AND status = 'accepted'::proposal_status
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn has_accepted_proposal(
        &self,
        project_id: i64,
        freelancer_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM proposals
            WHERE project_id = $1
                AND freelancer_id = $2
                AND status = 'accepted'::proposal_status
            "#,
        )
        .bind(project_id)
        .bind(freelancer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }
}
