//! # chathub Gateway Crate
//!
//! The real-time side of chathub: the event protocol, the messaging engine that
//! applies events to the user and chat stores, the fan-out layer that delivers the
//! results, and the HTTP routes (`/ws` plus a few read-only REST endpoints).
//!
//! ## Architecture
//!
//! - **Events**: Tagged client/server event enums
//! - **Engine**: Business rules, one synchronous handler per event
//! - **Fanout**: Per-session outgoing queues
//! - **State**: Engine and queues behind one lock
//! - **REST / WebSocket**: axum routes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chathub_gateway::{create_router, GatewayState};
//!
//! # async fn run() -> std::io::Result<()> {
//! let app = create_router(GatewayState::new());
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod events;
pub mod fanout;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod websocket;

// Re-export main types for convenience
pub use engine::{Delivery, HubStats, MessagingEngine, Outbound};
pub use error::{GatewayError, GatewayResult};
pub use events::{ClientEvent, SearchKind, SearchQuery, SearchResult, ServerEvent};
pub use fanout::FanoutLayer;
pub use state::{GatewayState, Hub};

use axum::{middleware as axum_middleware, Router};
use tower::ServiceBuilder;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    Router::new()
        // REST API routes
        .merge(rest::create_rest_routes())
        // WebSocket routes
        .merge(websocket::create_websocket_routes())
        .fallback(error::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::logging_middleware))
                .layer(middleware::create_cors_middleware()),
        )
        .with_state(state)
}
