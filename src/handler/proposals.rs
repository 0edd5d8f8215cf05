use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::proposaldtos::*,
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn proposals_handler() -> Router {
    Router::new()
        .route(
            "/",
            post(create_proposal).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Freelancer])
            })),
        )
        .route("/project/:project_id", get(proposals_by_project))
        .route("/freelancer/:freelancer_id", get(proposals_by_freelancer))
        .route("/:id", get(get_proposal).delete(delete_proposal))
        .route(
            "/:id/status",
            patch(update_proposal_status).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Company])
            })),
        )
}

pub async fn create_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateProposalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let proposal = app_state
        .proposal_service
        .create_proposal(&auth.user, body.amount, body.description, body.project_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": proposal
        })),
    ))
}

pub async fn proposals_by_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let proposals = app_state
        .proposal_service
        .proposals_by_project(&auth.user, project_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": proposals.len(),
        "data": proposals
    })))
}

pub async fn proposals_by_freelancer(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(freelancer_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let proposals = app_state
        .proposal_service
        .proposals_by_freelancer(&auth.user, freelancer_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": proposals.len(),
        "data": proposals
    })))
}

pub async fn get_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(proposal_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let proposal = app_state
        .proposal_service
        .get_proposal(&auth.user, proposal_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": proposal
    })))
}

pub async fn update_proposal_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(proposal_id): Path<i64>,
    Json(body): Json<UpdateProposalStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let proposal = app_state
        .proposal_service
        .update_status(&auth.user, proposal_id, body.status)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": proposal
    })))
}

pub async fn delete_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(proposal_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .proposal_service
        .delete_proposal(&auth.user, proposal_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
