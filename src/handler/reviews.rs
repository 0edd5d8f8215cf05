use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::reviewdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn reviews_handler() -> Router {
    Router::new()
        .route("/", post(create_review))
        .route("/reviewee/:reviewee_id", get(reviews_by_reviewee))
        .route("/reviewer/:reviewer_id", get(reviews_by_reviewer))
        .route(
            "/:id",
            get(get_review)
                .put(update_review)
                .delete(delete_review),
        )
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let review = app_state
        .review_service
        .create_review(
            &auth.user,
            body.reviewee_id,
            body.project_id,
            body.rating,
            body.comment,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": review
        })),
    ))
}

pub async fn reviews_by_reviewee(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(reviewee_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .review_service
        .reviews_by_reviewee(&auth.user, reviewee_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": reviews.len(),
        "data": reviews
    })))
}

pub async fn reviews_by_reviewer(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(reviewer_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .review_service
        .reviews_by_reviewer(&auth.user, reviewer_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": reviews.len(),
        "data": reviews
    })))
}

pub async fn get_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(review_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let review = app_state
        .review_service
        .get_review(&auth.user, review_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": review
    })))
}

pub async fn update_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(review_id): Path<i64>,
    Json(body): Json<UpdateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let review = app_state
        .review_service
        .update_review(&auth.user, review_id, body.rating, body.comment)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": review
    })))
}

pub async fn delete_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(review_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .review_service
        .delete_review(&auth.user, review_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
