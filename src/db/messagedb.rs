use async_trait::async_trait;

use super::db::DBClient;
use crate::dtos::messagedtos::UploadedFile;
use crate::models::messagemodel::{Attachment, Message, MessageWithSender};

#[async_trait]
pub trait MessageExt {
    /// Insert the message row and its attachment rows in one transaction.
    /// The physical files referenced by `files` must already exist on disk;
    /// the caller cleans them up if this fails.
    async fn save_message_with_attachments(
        &self,
        content: Option<String>,
        sender_id: i64,
        project_id: i64,
        files: &[UploadedFile],
    ) -> Result<(Message, Vec<Attachment>), sqlx::Error>;

    async fn get_messages_by_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<MessageWithSender>, sqlx::Error>;

    async fn get_message(&self, message_id: i64) -> Result<Option<Message>, sqlx::Error>;

    async fn get_attachments_for_message(
        &self,
        message_id: i64,
    ) -> Result<Vec<Attachment>, sqlx::Error>;

    /// Scoped to the sender; attachment rows go with the message via the
    /// cascade. Returns the deleted id, if any.
    async fn delete_message(
        &self,
        message_id: i64,
        sender_id: i64,
    ) -> Result<Option<i64>, sqlx::Error>;
}

#[async_trait]
impl MessageExt for DBClient {
    async fn save_message_with_attachments(
        &self,
        content: Option<String>,
        sender_id: i64,
        project_id: i64,
        files: &[UploadedFile],
    ) -> Result<(Message, Vec<Attachment>), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (content, sender_id, project_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, sender_id, project_id, created_at, updated_at
            "#,
        )
        .bind(content)
        .bind(sender_id)
        .bind(project_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut attachments = Vec::with_capacity(files.len());
        for file in files {
            let attachment = sqlx::query_as::<_, Attachment>(
                r#"
                INSERT INTO attachments
                    (file_name, file_path, file_type, file_size, message_id, uploader_id, project_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, file_name, file_path, file_type, file_size, message_id,
                    uploader_id, project_id, created_at
                "#,
            )
            .bind(&file.file_name)
            .bind(&file.file_path)
            .bind(&file.file_type)
            .bind(file.file_size)
            .bind(message.id)
            .bind(sender_id)
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await?;

            attachments.push(attachment);
        }

        tx.commit().await?;

        Ok((message, attachments))
    }

    async fn get_messages_by_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<MessageWithSender>, sqlx::Error> {
        sqlx::query_as::<_, MessageWithSender>(
            r#"
            SELECT
                m.id, m.content,
                s.id AS sender_id, s.name AS sender_name, s.role AS sender_role,
                m.project_id,
                m.created_at, m.updated_at
            FROM messages m
            JOIN users s ON m.sender_id = s.id
            WHERE m.project_id = $1
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_message(&self, message_id: i64) -> Result<Option<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, content, sender_id, project_id, created_at, updated_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_attachments_for_message(
        &self,
        message_id: i64,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        sqlx::query_as::<_, Attachment>(
            r#"
            SELECT id, file_name, file_path, file_type, file_size, message_id,
                uploader_id, project_id, created_at
            FROM attachments
            WHERE message_id = $1
            "#,
        )
        .bind(message_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_message(
        &self,
        message_id: i64,
        sender_id: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let deleted: Option<(i64,)> = sqlx::query_as(
            r#"
            DELETE FROM messages
            WHERE id = $1 AND sender_id = $2
            RETURNING id
            "#,
        )
        .bind(message_id)
        .bind(sender_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.map(|row| row.0))
    }
}
