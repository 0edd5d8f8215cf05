use async_trait::async_trait;

use super::db::DBClient;
use crate::models::projectmodel::{Project, ProjectStatus};

#[async_trait]
pub trait ProjectExt {
    async fn save_project<T: Into<String> + Send>(
        &self,
        title: T,
        description: T,
        company_id: i64,
    ) -> Result<Project, sqlx::Error>;

    async fn get_project(&self, project_id: i64) -> Result<Option<Project>, sqlx::Error>;

    async fn get_projects(&self, page: u32, limit: usize) -> Result<Vec<Project>, sqlx::Error>;

    async fn get_projects_by_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<Project>, sqlx::Error>;

    /// Scoped to the owning company; a non-owner caller sees zero rows.
    async fn update_project(
        &self,
        project_id: i64,
        company_id: i64,
        title: Option<String>,
        description: Option<String>,
        status: Option<ProjectStatus>,
    ) -> Result<Option<Project>, sqlx::Error>;

    /// Scoped to the owning company; returns the deleted id, if any.
    async fn delete_project(
        &self,
        project_id: i64,
        company_id: i64,
    ) -> Result<Option<i64>, sqlx::Error>;
}

#[async_trait]
impl ProjectExt for DBClient {
    async fn save_project<T: Into<String> + Send>(
        &self,
        title: T,
        description: T,
        company_id: i64,
    ) -> Result<Project, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (title, description, company_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, company_id, status, created_at, updated_at
            "#,
        )
        .bind(title.into())
        .bind(description.into())
        .bind(company_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_project(&self, project_id: i64) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, company_id, status, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_projects(&self, page: u32, limit: usize) -> Result<Vec<Project>, sqlx::Error> {
        let offset = (page - 1) * limit as u32;

        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, company_id, status, created_at, updated_at
            FROM projects
            ORDER BY created_at DESC LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_projects_by_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, company_id, status, created_at, updated_at
            FROM projects
            WHERE company_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_project(
        &self,
        project_id: i64,
        company_id: i64,
        title: Option<String>,
        description: Option<String>,
        status: Option<ProjectStatus>,
    ) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING id, title, description, company_id, status, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(company_id)
        .bind(title)
        .bind(description)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_project(
        &self,
        project_id: i64,
        company_id: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let deleted: Option<(i64,)> = sqlx::query_as(
            r#"
            DELETE FROM projects
            WHERE id = $1 AND company_id = $2
            RETURNING id
            "#,
        )
        .bind(project_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.map(|row| row.0))
    }
}
