use std::sync::Arc;

use crate::db::db::DBClient;
use crate::db::messagedb::MessageExt;
use crate::db::projectdb::ProjectExt;
use crate::db::proposaldb::ProposalExt;
use crate::dtos::messagedtos::{MessageWithAttachments, UploadedFile};
use crate::models::messagemodel::{Attachment, Message};
use crate::models::usermodel::{User, UserRole};
use crate::utils::files;

use super::access;
use super::error::ServiceError;

#[derive(Debug, Clone)]
pub struct MessageService {
    db_client: Arc<DBClient>,
}

impl MessageService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Persist a message and its attachment rows. The physical upload files
    /// already sit on disk; when anything here fails the handler removes
    /// them, which is why participant rejection is a typed business error.
    pub async fn send_message(
        &self,
        user: &User,
        project_id: i64,
        content: Option<String>,
        uploads: &[UploadedFile],
    ) -> Result<(Message, Vec<Attachment>), ServiceError> {
        let project = self
            .db_client
            .get_project(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))?;

        let has_accepted = self
            .db_client
            .has_accepted_proposal(project_id, user.id)
            .await?;

        access::require_participant(user, &project, has_accepted)?;

        let content = content.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());

        if content.is_none() && uploads.is_empty() {
            return Err(ServiceError::EmptyMessage);
        }

        let (message, attachments) = self
            .db_client
            .save_message_with_attachments(content, user.id, project_id, uploads)
            .await?;

        Ok((message, attachments))
    }

    pub async fn messages_by_project(
        &self,
        user: &User,
        project_id: i64,
    ) -> Result<Vec<MessageWithAttachments>, ServiceError> {
        let project = self
            .db_client
            .get_project(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))?;

        let has_accepted = if user.role == UserRole::Freelancer {
            self.db_client
                .has_accepted_proposal(project_id, user.id)
                .await?
        } else {
            false
        };

        access::require_conversation_access(user, &project, has_accepted)?;

        let messages = self.db_client.get_messages_by_project(project_id).await?;

        let mut result = Vec::with_capacity(messages.len());
        for message in messages {
            let attachments = self
                .db_client
                .get_attachments_for_message(message.id)
                .await?;
            result.push(MessageWithAttachments {
                message,
                attachments,
            });
        }

        Ok(result)
    }

    /// Only the original sender may delete. Physical files go first, best
    /// effort, so a missing file never blocks the row delete; the row delete
    /// is still scoped to the sender to close the race with another delete.
    pub async fn delete_message(&self, user: &User, message_id: i64) -> Result<(), ServiceError> {
        let message = self
            .db_client
            .get_message(message_id)
            .await?
            .ok_or(ServiceError::MessageNotFound(message_id))?;

        if message.sender_id != user.id {
            return Err(ServiceError::PermissionDenied(
                "You are not allowed to delete this message".to_string(),
            ));
        }

        let attachments = self
            .db_client
            .get_attachments_for_message(message_id)
            .await?;
        let paths: Vec<String> = attachments.into_iter().map(|a| a.file_path).collect();

        files::remove_files(&paths).await;

        self.db_client
            .delete_message(message_id, user.id)
            .await?
            .ok_or(ServiceError::MessageNotFound(message_id))?;

        Ok(())
    }
}
