use async_trait::async_trait;
use bigdecimal::BigDecimal;

use super::db::DBClient;
use crate::models::contractmodel::{Contract, ContractStatus, ContractSummary};

#[async_trait]
pub trait ContractExt {
    /// Insert the contract and advance the project to in_progress in a single
    /// transaction, so a contract can never exist against a still-open
    /// project.
    async fn save_contract_for_project<T: Into<String> + Send>(
        &self,
        terms: T,
        amount: BigDecimal,
        project_id: i64,
        freelancer_id: i64,
        company_id: i64,
    ) -> Result<Contract, sqlx::Error>;

    async fn get_contract(
        &self,
        contract_id: i64,
    ) -> Result<Option<ContractSummary>, sqlx::Error>;

    async fn get_contract_row(
        &self,
        contract_id: i64,
    ) -> Result<Option<Contract>, sqlx::Error>;

    async fn get_contract_for_project(
        &self,
        project_id: i64,
    ) -> Result<Option<Contract>, sqlx::Error>;

    async fn get_contracts_by_freelancer(
        &self,
        freelancer_id: i64,
    ) -> Result<Vec<ContractSummary>, sqlx::Error>;

    async fn get_contracts_by_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<ContractSummary>, sqlx::Error>;

    async fn get_all_contracts(&self) -> Result<Vec<ContractSummary>, sqlx::Error>;

    async fn update_contract_status(
        &self,
        contract_id: i64,
        status: ContractStatus,
    ) -> Result<Contract, sqlx::Error>;

    async fn delete_contract(&self, contract_id: i64) -> Result<Option<i64>, sqlx::Error>;
}

const CONTRACT_SUMMARY_SELECT: &str = r#"
    SELECT
        c.id, c.terms, c.amount, c.status,
        p.id AS project_id, p.title AS project_title,
        f.id AS freelancer_id, f.name AS freelancer_name,
        e.id AS company_id, e.name AS company_name,
        c.created_at, c.updated_at
    FROM contracts c
    JOIN projects p ON c.project_id = p.id
    JOIN users f ON c.freelancer_id = f.id
    JOIN users e ON c.company_id = e.id
"#;

#[async_trait]
impl ContractExt for DBClient {
    async fn save_contract_for_project<T: Into<String> + Send>(
        &self,
        terms: T,
        amount: BigDecimal,
        project_id: i64,
        freelancer_id: i64,
        company_id: i64,
    ) -> Result<Contract, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let contract = sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts (terms, amount, project_id, freelancer_id, company_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, terms, amount, project_id, freelancer_id, company_id, status,
                created_at, updated_at
            "#,
        )
        .bind(terms.into())
        .bind(amount)
        .bind(project_id)
        .bind(freelancer_id)
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE projects
            SET status = 'in_progress'::project_status, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(contract)
    }

    async fn get_contract(
        &self,
        contract_id: i64,
    ) -> Result<Option<ContractSummary>, sqlx::Error> {
        sqlx::query_as::<_, ContractSummary>(&format!(
            "{} WHERE c.id = $1",
            CONTRACT_SUMMARY_SELECT
        ))
        .bind(contract_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_contract_row(
        &self,
        contract_id: i64,
    ) -> Result<Option<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(
            r#"
            SELECT id, terms, amount, project_id, freelancer_id, company_id, status,
                created_at, updated_at
            FROM contracts
            WHERE id = $1
            "#,
        )
        .bind(contract_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_contract_for_project(
        &self,
        project_id: i64,
    ) -> Result<Option<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(
            r#"
            SELECT id, terms, amount, project_id, freelancer_id, company_id, status,
                created_at, updated_at
            FROM contracts
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_contracts_by_freelancer(
        &self,
        freelancer_id: i64,
    ) -> Result<Vec<ContractSummary>, sqlx::Error> {
        sqlx::query_as::<_, ContractSummary>(&format!(
            "{} WHERE c.freelancer_id = $1 ORDER BY c.created_at DESC",
            CONTRACT_SUMMARY_SELECT
        ))
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_contracts_by_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<ContractSummary>, sqlx::Error> {
        sqlx::query_as::<_, ContractSummary>(&format!(
            "{} WHERE c.company_id = $1 ORDER BY c.created_at DESC",
            CONTRACT_SUMMARY_SELECT
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_contracts(&self) -> Result<Vec<ContractSummary>, sqlx::Error> {
        sqlx::query_as::<_, ContractSummary>(&format!(
            "{} ORDER BY c.created_at DESC",
            CONTRACT_SUMMARY_SELECT
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_contract_status(
        &self,
        contract_id: i64,
        status: ContractStatus,
    ) -> Result<Contract, sqlx::Error> {
        sqlx::query_as::<_, Contract>(
            r#"
            UPDATE contracts
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, terms, amount, project_id, freelancer_id, company_id, status,
                created_at, updated_at
            "#,
        )
        .bind(contract_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_contract(&self, contract_id: i64) -> Result<Option<i64>, sqlx::Error> {
        let deleted: Option<(i64,)> = sqlx::query_as(
            r#"
            DELETE FROM contracts
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(contract_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.map(|row| row.0))
    }
}
