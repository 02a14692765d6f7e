//! Shared application state for the gateway

use std::sync::Arc;

use chathub_users::{SessionId, UserListing};
use tokio::sync::{mpsc, Mutex};

use crate::engine::{HubStats, MessagingEngine};
use crate::events::{ClientEvent, ServerEvent};
use crate::fanout::FanoutLayer;

/// The engine and the session queues, always locked together.
///
/// Holding one lock across an event and its delivery keeps events strictly
/// ordered and lets each handler run to completion before the next starts.
#[derive(Debug, Default)]
pub struct Hub {
    pub engine: MessagingEngine,
    pub fanout: FanoutLayer,
}

/// Shared application state handed to every route
#[derive(Clone, Default)]
pub struct GatewayState {
    hub: Arc<Mutex<Hub>>,
}

impl GatewayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose chat logs keep at most `limit` messages each.
    pub fn with_retention(limit: Option<usize>) -> Self {
        Self {
            hub: Arc::new(Mutex::new(Hub {
                engine: MessagingEngine::with_retention(limit),
                fanout: FanoutLayer::new(),
            })),
        }
    }

    /// Open a session for a new connection.
    pub async fn connect(&self) -> (SessionId, mpsc::UnboundedReceiver<ServerEvent>) {
        self.hub.lock().await.fanout.open()
    }

    /// Apply one client event and deliver its results.
    pub async fn dispatch(&self, session: &str, event: ClientEvent) {
        let mut hub = self.hub.lock().await;
        let outbound = hub.engine.handle(session, event);
        hub.fanout.deliver(outbound);
    }

    /// Close a session and announce the user going offline if it was their live one.
    pub async fn disconnect(&self, session: &str) {
        let mut hub = self.hub.lock().await;
        hub.fanout.close(session);
        let outbound = hub.engine.disconnect(session);
        hub.fanout.deliver(outbound);
    }

    pub async fn stats(&self) -> HubStats {
        self.hub.lock().await.engine.stats()
    }

    pub async fn user_listings(&self) -> Vec<UserListing> {
        self.hub.lock().await.engine.user_listings()
    }

    pub async fn open_sessions(&self) -> usize {
        self.hub.lock().await.fanout.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str) -> ClientEvent {
        ClientEvent::Register {
            email: Some(email.into()),
            name: Some(email.into()),
            username: None,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_dispatch_delivers_to_sessions() {
        let state = GatewayState::new();
        let (alice, mut alice_rx) = state.connect().await;
        let (_observer, mut observer_rx) = state.connect().await;

        state.dispatch(&alice, register("a@x")).await;

        for rx in [&mut alice_rx, &mut observer_rx] {
            let names: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
                .map(|event| event.name())
                .collect();
            assert_eq!(names, ["users-list", "groups-list", "user-online"]);
        }
    }

    #[tokio::test]
    async fn test_disconnect_closes_session_and_announces_offline() {
        let state = GatewayState::new();
        let (alice, _alice_rx) = state.connect().await;
        let (_observer, mut observer_rx) = state.connect().await;
        state.dispatch(&alice, register("a@x")).await;
        while observer_rx.try_recv().is_ok() {}

        state.disconnect(&alice).await;

        assert!(matches!(
            observer_rx.try_recv(),
            Ok(ServerEvent::UserOffline { ref user_id, .. }) if user_id == "a@x"
        ));
        assert_eq!(state.open_sessions().await, 1);
        assert_eq!(state.stats().await.online, 0);
        assert_eq!(state.user_listings().await.len(), 1);
    }

    #[tokio::test]
    async fn test_retention_applies_to_every_chat() {
        let state = GatewayState::with_retention(Some(1));
        let (session, _rx) = state.connect().await;
        for text in ["one", "two"] {
            state
                .dispatch(
                    &session,
                    ClientEvent::SendMessage {
                        sender_id: Some("a@x".into()),
                        receiver_id: Some("b@x".into()),
                        text: Some(text.into()),
                        timestamp: None,
                        reply_to: None,
                    },
                )
                .await;
        }
        assert_eq!(state.stats().await.messages, 1);
    }
}
