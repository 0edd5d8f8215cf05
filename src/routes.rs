use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler, contracts::contracts_handler, messages::messages_handler,
        projects::projects_handler, proposals::proposals_handler, reviews::reviews_handler,
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        // Project reads are public; the handler gates its own mutations.
        .nest("/projects", projects_handler())
        .nest(
            "/proposals",
            proposals_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/contracts",
            contracts_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/messages",
            messages_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/reviews",
            reviews_handler().layer(middleware::from_fn(auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
