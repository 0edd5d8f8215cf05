use std::sync::Arc;

use bigdecimal::BigDecimal;

use crate::db::db::DBClient;
use crate::db::projectdb::ProjectExt;
use crate::db::proposaldb::ProposalExt;
use crate::models::proposalmodel::{
    FreelancerProposalRow, ProjectProposalRow, Proposal, ProposalDetails, ProposalStatus,
};
use crate::models::usermodel::{User, UserRole};

use super::access;
use super::error::ServiceError;

#[derive(Debug, Clone)]
pub struct ProposalService {
    db_client: Arc<DBClient>,
}

impl ProposalService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn create_proposal(
        &self,
        user: &User,
        amount: f64,
        description: String,
        project_id: i64,
    ) -> Result<Proposal, ServiceError> {
        if user.role != UserRole::Freelancer {
            return Err(ServiceError::PermissionDenied(
                "Only freelancers can submit proposals".to_string(),
            ));
        }

        let amount = BigDecimal::try_from(amount)
            .map_err(|_| ServiceError::Validation("Invalid proposal amount".to_string()))?;

        self.db_client
            .get_project(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))?;

        // One proposal per (freelancer, project); the constraint arbitrates
        // concurrent duplicates.
        self.db_client
            .save_proposal(amount, description, user.id, project_id)
            .await
            .map_err(|err| ServiceError::on_unique_violation(err, ServiceError::DuplicateProposal))
    }

    pub async fn proposals_by_project(
        &self,
        user: &User,
        project_id: i64,
    ) -> Result<Vec<ProjectProposalRow>, ServiceError> {
        let project = self
            .db_client
            .get_project(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))?;

        access::require_proposal_list_access(user, &project)?;

        let proposals = self.db_client.get_proposals_by_project(project_id).await?;
        Ok(proposals)
    }

    pub async fn proposals_by_freelancer(
        &self,
        user: &User,
        freelancer_id: i64,
    ) -> Result<Vec<FreelancerProposalRow>, ServiceError> {
        access::require_proposal_history_access(user, freelancer_id)?;

        let proposals = self
            .db_client
            .get_proposals_by_freelancer(freelancer_id)
            .await?;
        Ok(proposals)
    }

    pub async fn get_proposal(
        &self,
        user: &User,
        proposal_id: i64,
    ) -> Result<ProposalDetails, ServiceError> {
        let details = self
            .db_client
            .get_proposal_details(proposal_id)
            .await?
            .ok_or(ServiceError::ProposalNotFound(proposal_id))?;

        if !access::can_view_proposal(user, &details) {
            return Err(ServiceError::PermissionDenied(
                "You are not allowed to view this proposal".to_string(),
            ));
        }

        Ok(details)
    }

    /// Only the company owning the proposal's project may move its status.
    /// A missing proposal and someone else's proposal look the same.
    pub async fn update_status(
        &self,
        user: &User,
        proposal_id: i64,
        status: ProposalStatus,
    ) -> Result<Proposal, ServiceError> {
        if user.role != UserRole::Company {
            return Err(ServiceError::PermissionDenied(
                "Only companies can change proposal status".to_string(),
            ));
        }

        let details = match self.db_client.get_proposal_details(proposal_id).await? {
            Some(d) if d.company_id == user.id => d,
            _ => return Err(ServiceError::ProposalNotFound(proposal_id)),
        };

        if !details.status.can_transition_to(status) {
            return Err(ServiceError::ProposalAlreadyDecided(proposal_id));
        }

        let updated = self
            .db_client
            .update_proposal_status(proposal_id, status)
            .await?;
        Ok(updated)
    }

    /// Deletion is allowed only to the owning freelancer and only while the
    /// proposal is still pending. The delete query carries both conditions,
    /// so a raced acceptance makes it affect zero rows.
    pub async fn delete_proposal(
        &self,
        user: &User,
        proposal_id: i64,
    ) -> Result<(), ServiceError> {
        if user.role != UserRole::Freelancer {
            return Err(ServiceError::PermissionDenied(
                "Only freelancers can delete their proposals".to_string(),
            ));
        }

        self.db_client
            .delete_pending_proposal(proposal_id, user.id)
            .await?
            .ok_or(ServiceError::ProposalNotFound(proposal_id))?;

        Ok(())
    }
}
