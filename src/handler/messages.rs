use std::sync::Arc;

use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::{
    dtos::messagedtos::UploadedFile,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    utils::files,
    AppState,
};

pub fn messages_handler() -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/project/:project_id", get(project_messages))
        .route("/:id", axum::routing::delete(delete_message))
}

/// Multipart form: `content` (optional text), `project_id`, and up to a
/// handful of `attachments` file parts. Files hit the upload directory
/// before the service runs, so every failure path below must sweep them up.
pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    tokio::fs::create_dir_all(&app_state.env.upload_dir)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut content: Option<String> = None;
    let mut project_id: Option<i64> = None;
    let mut uploads: Vec<UploadedFile> = Vec::new();

    let parsed: Result<(), HttpError> = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break Ok(()),
            Err(e) => break Err(HttpError::bad_request(e.to_string())),
        };

        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "content" => match field.text().await {
                Ok(text) => content = Some(text),
                Err(e) => break Err(HttpError::bad_request(e.to_string())),
            },
            "project_id" => {
                let raw = match field.text().await {
                    Ok(text) => text,
                    Err(e) => break Err(HttpError::bad_request(e.to_string())),
                };
                match raw.trim().parse::<i64>() {
                    Ok(id) if id > 0 => project_id = Some(id),
                    _ => {
                        break Err(HttpError::bad_request(
                            "Project id must be a positive integer",
                        ))
                    }
                }
            }
            "attachments" => {
                let file_name =
                    files::sanitize_file_name(field.file_name().unwrap_or("file"));
                let file_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let data = match field.bytes().await {
                    Ok(data) => data,
                    Err(e) => break Err(HttpError::bad_request(e.to_string())),
                };

                let path = files::stored_path(&app_state.env.upload_dir, &file_name);
                if let Err(e) = tokio::fs::write(&path, &data).await {
                    break Err(HttpError::server_error(e.to_string()));
                }

                uploads.push(UploadedFile {
                    file_name,
                    file_path: path.to_string_lossy().into_owned(),
                    file_type,
                    file_size: data.len() as i64,
                });
            }
            _ => {}
        }
    };

    let stored_paths: Vec<String> = uploads.iter().map(|u| u.file_path.clone()).collect();

    if let Err(err) = parsed {
        files::remove_files(&stored_paths).await;
        return Err(err);
    }

    let project_id = match project_id {
        Some(id) => id,
        None => {
            files::remove_files(&stored_paths).await;
            return Err(HttpError::bad_request("Project id is required"));
        }
    };

    match app_state
        .message_service
        .send_message(&auth.user, project_id, content, &uploads)
        .await
    {
        Ok((message, attachments)) => Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "status": "success",
                "data": {
                    "message": message,
                    "attachments": attachments
                }
            })),
        )),
        Err(err) => {
            files::remove_files(&stored_paths).await;
            Err(err.into())
        }
    }
}

pub async fn project_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .message_service
        .messages_by_project(&auth.user, project_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": messages.len(),
        "data": messages
    })))
}

pub async fn delete_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .message_service
        .delete_message(&auth.user, message_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
