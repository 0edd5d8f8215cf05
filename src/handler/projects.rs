use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    dtos::projectdtos::*,
    error::HttpError,
    middleware::{auth, role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

/// Project reads are public; every mutation is gated to authenticated
/// companies. The ownership check itself lives in the service.
pub fn projects_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_projects).merge(
                post(create_project)
                    .layer(middleware::from_fn(|state, req, next| {
                        role_check(state, req, next, vec![UserRole::Company])
                    }))
                    .layer(middleware::from_fn(auth)),
            ),
        )
        .route(
            "/my",
            get(my_projects)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Company])
                }))
                .layer(middleware::from_fn(auth)),
        )
        .route(
            "/:id",
            get(get_project).merge(
                put(update_project)
                    .delete(delete_project)
                    .layer(middleware::from_fn(|state, req, next| {
                        role_check(state, req, next, vec![UserRole::Company])
                    }))
                    .layer(middleware::from_fn(auth)),
            ),
        )
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<usize>,
}

pub async fn create_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateProjectDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let project = app_state
        .project_service
        .create_project(&auth.user, body.title, body.description)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": project
        })),
    ))
}

pub async fn get_projects(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(50);

    let projects = app_state.project_service.list_projects(page, limit).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": projects.len(),
        "data": projects
    })))
}

pub async fn get_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let project = app_state.project_service.get_project(project_id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": project
    })))
}

pub async fn my_projects(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let projects = app_state.project_service.my_projects(&auth.user).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": projects.len(),
        "data": projects
    })))
}

pub async fn update_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<i64>,
    Json(body): Json<UpdateProjectDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let project = app_state
        .project_service
        .update_project(
            &auth.user,
            project_id,
            body.title,
            body.description,
            body.status,
        )
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": project
    })))
}

pub async fn delete_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .project_service
        .delete_project(&auth.user, project_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
