//! User listing endpoint

use axum::{extract::State, routing::get, Json, Router};
use chathub_users::UserListing;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::GatewayState;

/// A user with presence
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub online: bool,
    pub last_seen: DateTime<Utc>,
}

impl From<UserListing> for UserResponse {
    fn from(listing: UserListing) -> Self {
        Self {
            id: listing.id,
            name: listing.name,
            username: listing.username,
            online: listing.online,
            last_seen: listing.last_seen,
        }
    }
}

pub fn create_user_routes() -> Router<GatewayState> {
    Router::new().route("/api/users", get(list_users))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Registered users in registration order", body = [UserResponse])
    )
)]
pub async fn list_users(State(state): State<GatewayState>) -> Json<Vec<UserResponse>> {
    let users = state.user_listings().await;
    Json(users.into_iter().map(UserResponse::from).collect())
}
