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
    dtos::contractdtos::*,
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn contracts_handler() -> Router {
    Router::new()
        .route(
            "/",
            post(create_contract).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Company])
            })),
        )
        .route("/my", get(my_contracts))
        .route("/:id", get(get_contract).delete(delete_contract))
        .route("/:id/status", patch(update_contract_status))
}

pub async fn create_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateContractDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let contract = app_state
        .contract_service
        .create_contract(&auth.user, body.project_id, body.terms)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": contract
        })),
    ))
}

pub async fn my_contracts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let contracts = app_state
        .contract_service
        .contracts_for_user(&auth.user)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": contracts.len(),
        "data": contracts
    })))
}

pub async fn get_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(contract_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let contract = app_state
        .contract_service
        .get_contract(&auth.user, contract_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": contract
    })))
}

pub async fn update_contract_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(contract_id): Path<i64>,
    Json(body): Json<UpdateContractStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let contract = app_state
        .contract_service
        .update_status(&auth.user, contract_id, body.status)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": contract
    })))
}

pub async fn delete_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(contract_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .contract_service
        .delete_contract(&auth.user, contract_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
