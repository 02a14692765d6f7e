//! Aggregate counters endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::engine::HubStats;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Registered users
    pub users: usize,
    pub groups: usize,
    /// Stored messages across all chats
    pub messages: usize,
    /// Users currently online
    pub online: usize,
}

impl From<HubStats> for StatsResponse {
    fn from(stats: HubStats) -> Self {
        Self {
            users: stats.users,
            groups: stats.groups,
            messages: stats.messages,
            online: stats.online,
        }
    }
}

pub fn create_stats_routes() -> Router<GatewayState> {
    Router::new().route("/api/stats", get(get_stats))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Hub counters", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<GatewayState>) -> Json<StatsResponse> {
    Json(state.stats().await.into())
}
