//! One-to-one conversations.

use chathub_chats::{ChatKey, ChatMessage};
use tracing::debug;

use super::{client_timestamp, present, MessagingEngine, Outbound};
use crate::events::ServerEvent;

impl MessagingEngine {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn send_direct(
        &mut self,
        session: &str,
        sender_id: Option<String>,
        receiver_id: Option<String>,
        text: Option<String>,
        timestamp: Option<serde_json::Value>,
        reply_to: Option<serde_json::Value>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(sender_id), Some(receiver_id), Some(text)) =
            (present(sender_id), present(receiver_id), present(text))
        else {
            return;
        };

        let message = ChatMessage::direct(
            &sender_id,
            &receiver_id,
            &text,
            client_timestamp(timestamp),
            reply_to,
        );
        let stored = self
            .chats
            .append(ChatKey::direct(&sender_id, &receiver_id), message);

        match self.online_session(&receiver_id) {
            Some(receiver_session) => {
                out.push(Outbound::to(receiver_session, ServerEvent::ReceiveMessage(stored.clone())))
            }
            None => debug!(receiver = %receiver_id, "receiver offline, message kept for history"),
        }
        out.push(Outbound::to(session, ServerEvent::MessageSent(stored)));
    }

    pub(super) fn direct_history(
        &self,
        session: &str,
        user1: Option<String>,
        user2: Option<String>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(user1), Some(user2)) = (present(user1), present(user2)) else {
            return;
        };
        let history = self.chats.history(&ChatKey::direct(&user1, &user2));
        out.push(Outbound::to(session, ServerEvent::MessagesHistory(history)));
    }

    pub(super) fn mark_read(
        &mut self,
        sender_id: Option<String>,
        receiver_id: Option<String>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(sender_id), Some(receiver_id)) = (present(sender_id), present(receiver_id)) else {
            return;
        };
        let changed = self.chats.mark_read(&sender_id, &receiver_id);
        debug!(sender = %sender_id, receiver = %receiver_id, changed, "messages marked read");

        if let Some(sender_session) = self.online_session(&sender_id) {
            out.push(Outbound::to(sender_session, ServerEvent::MessagesRead { receiver_id }));
        }
    }
}
