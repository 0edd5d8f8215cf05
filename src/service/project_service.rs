use std::sync::Arc;

use crate::db::db::DBClient;
use crate::db::projectdb::ProjectExt;
use crate::models::projectmodel::{Project, ProjectStatus};
use crate::models::usermodel::{User, UserRole};

use super::error::ServiceError;

#[derive(Debug, Clone)]
pub struct ProjectService {
    db_client: Arc<DBClient>,
}

impl ProjectService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn create_project(
        &self,
        user: &User,
        title: String,
        description: String,
    ) -> Result<Project, ServiceError> {
        if user.role != UserRole::Company {
            return Err(ServiceError::PermissionDenied(
                "Only companies can post projects".to_string(),
            ));
        }

        let project = self
            .db_client
            .save_project(title, description, user.id)
            .await?;

        Ok(project)
    }

    /// Public listing, no gate.
    pub async fn list_projects(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Project>, ServiceError> {
        let projects = self.db_client.get_projects(page, limit).await?;
        Ok(projects)
    }

    /// Public single read, no gate.
    pub async fn get_project(&self, project_id: i64) -> Result<Project, ServiceError> {
        self.db_client
            .get_project(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))
    }

    pub async fn my_projects(&self, user: &User) -> Result<Vec<Project>, ServiceError> {
        if user.role != UserRole::Company {
            return Err(ServiceError::PermissionDenied(
                "Only companies have posted projects".to_string(),
            ));
        }

        let projects = self.db_client.get_projects_by_company(user.id).await?;
        Ok(projects)
    }

    /// Update is scoped to the owner in SQL; a missing project and someone
    /// else's project are indistinguishable to the caller.
    pub async fn update_project(
        &self,
        user: &User,
        project_id: i64,
        title: Option<String>,
        description: Option<String>,
        status: Option<ProjectStatus>,
    ) -> Result<Project, ServiceError> {
        self.db_client
            .update_project(project_id, user.id, title, description, status)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))
    }

    pub async fn delete_project(&self, user: &User, project_id: i64) -> Result<(), ServiceError> {
        self.db_client
            .delete_project(project_id, user.id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))?;

        Ok(())
    }
}
