use std::sync::Arc;

use crate::db::contractdb::ContractExt;
use crate::db::db::DBClient;
use crate::db::projectdb::ProjectExt;
use crate::db::proposaldb::ProposalExt;
use crate::models::contractmodel::{Contract, ContractStatus, ContractSummary};
use crate::models::usermodel::{User, UserRole};

use super::access;
use super::error::ServiceError;

#[derive(Debug, Clone)]
pub struct ContractService {
    db_client: Arc<DBClient>,
}

impl ContractService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Derive a contract from the project's single accepted proposal. The
    /// amount is copied from the proposal, never re-entered, and the project
    /// advances to in_progress in the same transaction as the insert.
    pub async fn create_contract(
        &self,
        user: &User,
        project_id: i64,
        terms: String,
    ) -> Result<Contract, ServiceError> {
        if user.role != UserRole::Company {
            return Err(ServiceError::PermissionDenied(
                "Only companies can create contracts".to_string(),
            ));
        }

        let project = self
            .db_client
            .get_project(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))?;

        access::require_project_owner(user, &project)?;

        let accepted = self
            .db_client
            .get_accepted_proposals_for_project(project_id)
            .await?;

        let proposal = match accepted.as_slice() {
            [] => return Err(ServiceError::NoAcceptedProposal(project_id)),
            [one] => one,
            _ => return Err(ServiceError::AmbiguousAcceptedProposal(project_id)),
        };

        if self
            .db_client
            .get_contract_for_project(project_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::ContractAlreadyExists(project_id));
        }

        // The unique constraint on project_id settles a creation race the
        // pre-check above cannot see.
        self.db_client
            .save_contract_for_project(
                terms,
                proposal.amount.clone(),
                project_id,
                proposal.freelancer_id,
                user.id,
            )
            .await
            .map_err(|err| {
                ServiceError::on_unique_violation(
                    err,
                    ServiceError::ContractAlreadyExists(project_id),
                )
            })
    }

    pub async fn get_contract(
        &self,
        user: &User,
        contract_id: i64,
    ) -> Result<ContractSummary, ServiceError> {
        let contract = self
            .db_client
            .get_contract(contract_id)
            .await?
            .ok_or(ServiceError::ContractNotFound(contract_id))?;

        if !access::can_view_contract(user, &contract) {
            return Err(ServiceError::PermissionDenied(
                "You are not allowed to view this contract".to_string(),
            ));
        }

        Ok(contract)
    }

    pub async fn contracts_for_user(
        &self,
        user: &User,
    ) -> Result<Vec<ContractSummary>, ServiceError> {
        let contracts = match user.role {
            UserRole::Freelancer => self.db_client.get_contracts_by_freelancer(user.id).await?,
            UserRole::Company => self.db_client.get_contracts_by_company(user.id).await?,
            UserRole::Admin => self.db_client.get_all_contracts().await?,
        };

        Ok(contracts)
    }

    pub async fn update_status(
        &self,
        user: &User,
        contract_id: i64,
        status: ContractStatus,
    ) -> Result<Contract, ServiceError> {
        let contract = self
            .db_client
            .get_contract_row(contract_id)
            .await?
            .ok_or(ServiceError::ContractNotFound(contract_id))?;

        access::require_contract_status_access(user, &contract)?;

        let updated = self
            .db_client
            .update_contract_status(contract_id, status)
            .await?;
        Ok(updated)
    }

    pub async fn delete_contract(
        &self,
        user: &User,
        contract_id: i64,
    ) -> Result<(), ServiceError> {
        if user.role != UserRole::Admin {
            return Err(ServiceError::PermissionDenied(
                "Only administrators can delete contracts".to_string(),
            ));
        }

        self.db_client
            .delete_contract(contract_id)
            .await?
            .ok_or(ServiceError::ContractNotFound(contract_id))?;

        Ok(())
    }
}
