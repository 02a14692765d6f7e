//! Delivery of outbound events to open sessions.

use std::collections::HashMap;

use chathub_users::SessionId;
use tokio::sync::mpsc;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::engine::{Delivery, Outbound};
use crate::events::ServerEvent;

/// Outgoing queues of every open session.
///
/// Queues are unbounded so delivery never waits on a slow socket. Events for a
/// session that has gone away are dropped.
#[derive(Debug, Default)]
pub struct FanoutLayer {
    sessions: HashMap<SessionId, mpsc::UnboundedSender<ServerEvent>>,
}

impl FanoutLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session and return its id with the receiving end of its queue.
    pub fn open(&mut self) -> (SessionId, mpsc::UnboundedReceiver<ServerEvent>) {
        let session = Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::unbounded_channel();
        self.sessions.insert(session.clone(), tx);
        debug!(%session, open = self.sessions.len(), "session opened");
        (session, rx)
    }

    /// Stop delivering to `session`. Returns whether it was open.
    pub fn close(&mut self, session: &str) -> bool {
        let closed = self.sessions.remove(session).is_some();
        if closed {
            debug!(session, open = self.sessions.len(), "session closed");
        }
        closed
    }

    /// Deliver each outbound event in order. Returns how many queue writes succeeded.
    pub fn deliver(&mut self, outbound: Vec<Outbound>) -> usize {
        let mut delivered = 0;
        for Outbound { delivery, event } in outbound {
            match delivery {
                Delivery::Session(session) => {
                    if self.send(&session, event) {
                        delivered += 1;
                    }
                }
                Delivery::Everyone => {
                    let targets: Vec<SessionId> = self.sessions.keys().cloned().collect();
                    for session in targets {
                        if self.send(&session, event.clone()) {
                            delivered += 1;
                        }
                    }
                }
            }
        }
        delivered
    }

    fn send(&mut self, session: &str, event: ServerEvent) -> bool {
        let Some(tx) = self.sessions.get(session) else {
            trace!(session, event = event.name(), "dropping event for closed session");
            return false;
        };
        let name = event.name();
        if tx.send(event).is_err() {
            // receiver is gone: the socket task ended without closing the session yet
            trace!(session, event = name, "dropping event for finished session");
            self.sessions.remove(session);
            return false;
        }
        true
    }

    pub fn is_open(&self, session: &str) -> bool {
        self.sessions.contains_key(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing() -> ServerEvent {
        ServerEvent::UserTyping {
            sender_id: "a@x".into(),
            is_typing: true,
        }
    }

    #[test]
    fn session_delivery_targets_one_queue() {
        let mut fanout = FanoutLayer::new();
        let (first, mut first_rx) = fanout.open();
        let (_second, mut second_rx) = fanout.open();

        assert_eq!(fanout.deliver(vec![Outbound::to(first, typing())]), 1);

        assert_eq!(first_rx.try_recv().ok(), Some(typing()));
        assert!(second_rx.try_recv().is_err());
    }

    #[test]
    fn everyone_reaches_all_open_sessions() {
        let mut fanout = FanoutLayer::new();
        let (_a, mut a_rx) = fanout.open();
        let (b, mut b_rx) = fanout.open();
        fanout.close(&b);

        assert_eq!(fanout.deliver(vec![Outbound::everyone(typing())]), 1);
        assert!(a_rx.try_recv().is_ok());
        assert!(b_rx.try_recv().is_err());
    }

    #[test]
    fn closed_or_unknown_sessions_are_skipped() {
        let mut fanout = FanoutLayer::new();
        let (session, rx) = fanout.open();
        drop(rx);

        assert_eq!(fanout.deliver(vec![Outbound::to(session.clone(), typing())]), 0);
        assert!(!fanout.is_open(&session));
        assert_eq!(fanout.deliver(vec![Outbound::to("nobody", typing())]), 0);
        assert!(!fanout.close("nobody"));
    }

    #[test]
    fn per_session_order_is_preserved() {
        let mut fanout = FanoutLayer::new();
        let (session, mut rx) = fanout.open();
        let events = vec![
            Outbound::to(session.clone(), ServerEvent::LeftGroup { group_id: "g_1".into() }),
            Outbound::everyone(typing()),
            Outbound::to(session, ServerEvent::LeftGroup { group_id: "g_2".into() }),
        ];

        fanout.deliver(events);

        let names: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|event| event.name())
            .collect();
        assert_eq!(names, ["left-group", "user-typing", "left-group"]);
    }
}
