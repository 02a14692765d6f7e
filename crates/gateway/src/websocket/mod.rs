//! WebSocket endpoint for the gateway

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::error::GatewayResult;
use crate::events::ClientEvent;
use crate::state::GatewayState;

/// Create all WebSocket routes
pub fn create_websocket_routes() -> Router<GatewayState> {
    Router::new().route("/ws", get(websocket_handler))
}

/// Upgrade to a hub session
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<GatewayState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Parse one text frame into a client event.
pub fn parse_frame(text: &str) -> GatewayResult<ClientEvent> {
    Ok(serde_json::from_str(text)?)
}

async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let (session, mut events) = state.connect().await;
    let (mut sender, mut receiver) = socket.split();
    info!(%session, "websocket connected");

    // Forward queued events to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(error) => {
                    warn!(%error, event = event.name(), "failed to serialize event");
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // Apply incoming frames one at a time
    let receive_state = state.clone();
    let receive_session = session.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(Message::Text(text)) => match parse_frame(&text) {
                    Ok(event) => receive_state.dispatch(&receive_session, event).await,
                    Err(error) => warn!(session = %receive_session, %error, "dropping invalid frame"),
                },
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(error) => {
                    debug!(session = %receive_session, %error, "websocket read failed");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => receive_task.abort(),
        _ = &mut receive_task => send_task.abort(),
    }

    state.disconnect(&session).await;
    info!(%session, "websocket disconnected");
}
