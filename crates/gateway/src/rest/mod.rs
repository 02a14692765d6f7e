//! REST API endpoints for the gateway

pub mod health;
pub mod stats;
pub mod users;

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::state::GatewayState;

#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, users::list_users, stats::get_stats),
    components(schemas(health::HealthResponse, users::UserResponse, stats::StatsResponse)),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "users", description = "Registered users and presence"),
        (name = "stats", description = "Hub counters"),
    )
)]
pub struct ApiDoc;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<GatewayState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_document))
        .merge(users::create_user_routes())
        .merge(stats::create_stats_routes())
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
