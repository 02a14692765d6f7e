//! The messaging engine.
//!
//! [`MessagingEngine`] owns every store of the hub. Each inbound event is applied
//! synchronously by [`MessagingEngine::handle`], which returns the events to deliver
//! and who should receive them. The engine never touches a socket.

mod direct;
mod groups;
mod mutations;
mod presence;
pub mod search;
mod stats;

pub use stats::HubStats;

use chathub_chats::{ChatKey, ChatStore, GroupRegistry};
use chathub_users::{ConnectionRegistry, HandleRegistry, SessionId, UserDirectory};
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::events::{ClientEvent, ServerEvent};

/// Who an outbound event goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Session(SessionId),
    /// Every open session, registered or not
    Everyone,
}

/// An event paired with its target
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub delivery: Delivery,
    pub event: ServerEvent,
}

impl Outbound {
    pub fn to(session: impl Into<SessionId>, event: ServerEvent) -> Self {
        Self {
            delivery: Delivery::Session(session.into()),
            event,
        }
    }

    pub fn everyone(event: ServerEvent) -> Self {
        Self {
            delivery: Delivery::Everyone,
            event,
        }
    }
}

/// All hub state plus the rules for changing it.
#[derive(Debug, Default)]
pub struct MessagingEngine {
    users: UserDirectory,
    sessions: ConnectionRegistry,
    handles: HandleRegistry,
    groups: GroupRegistry,
    chats: ChatStore,
}

impl MessagingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose chat logs keep at most `limit` messages each.
    pub fn with_retention(limit: Option<usize>) -> Self {
        Self {
            chats: ChatStore::with_retention(limit),
            ..Self::default()
        }
    }

    /// Apply one event from `session` and return what must be delivered.
    pub fn handle(&mut self, session: &str, event: ClientEvent) -> Vec<Outbound> {
        let mut out = Vec::new();
        match event {
            ClientEvent::Register {
                email,
                name,
                username,
                avatar,
            } => self.register(session, email, name, username, avatar, &mut out),
            ClientEvent::SendMessage {
                sender_id,
                receiver_id,
                text,
                timestamp,
                reply_to,
            } => self.send_direct(session, sender_id, receiver_id, text, timestamp, reply_to, &mut out),
            ClientEvent::GetMessages { user1, user2 } => self.direct_history(session, user1, user2, &mut out),
            ClientEvent::MarkAsRead {
                sender_id,
                receiver_id,
            } => self.mark_read(sender_id, receiver_id, &mut out),
            ClientEvent::EditMessage {
                message_id,
                chat_key,
                new_text,
                sender_id,
            } => self.edit(message_id, chat_key, new_text, sender_id, &mut out),
            ClientEvent::DeleteMessage {
                message_id,
                chat_key,
                sender_id,
                delete_for,
            } => self.delete(session, message_id, chat_key, sender_id, delete_for, &mut out),
            ClientEvent::Typing {
                sender_id,
                receiver_id,
                is_typing,
            } => self.typing(sender_id, receiver_id, is_typing, &mut out),
            ClientEvent::CreateGroup {
                name,
                username,
                group_type,
                created_by,
            } => self.create_group(session, name, username, group_type, created_by, &mut out),
            ClientEvent::JoinGroup { group_id, user_id } => self.join_group(group_id, user_id, &mut out),
            ClientEvent::LeaveGroup { group_id, user_id } => {
                self.leave_group(session, group_id, user_id, &mut out)
            }
            ClientEvent::SendGroupMessage {
                group_id,
                sender_id,
                text,
                timestamp,
                reply_to,
            } => self.send_group(group_id, sender_id, text, timestamp, reply_to, &mut out),
            ClientEvent::GetGroupMessages { group_id } => self.group_history(session, group_id, &mut out),
            ClientEvent::AddReaction {
                message_id,
                chat_key,
                emoji,
                user_id,
            } => self.react(message_id, chat_key, emoji, user_id, &mut out),
            ClientEvent::Search(query) => self.search(session, query.as_str(), &mut out),
        }
        debug!(session, outbound = out.len(), "event handled");
        out
    }

    /// Session of `user_id` if the user is online and bound to one.
    fn online_session(&self, user_id: &str) -> Option<SessionId> {
        if !self.users.is_online(user_id) {
            return None;
        }
        self.sessions.session_of(user_id).cloned()
    }

    /// Online sessions of everyone taking part in the chat at `key`, without duplicates.
    fn participant_sessions(&self, key: &ChatKey) -> Vec<SessionId> {
        let participants: Vec<&str> = match key {
            ChatKey::Direct { low, high } => vec![low.as_str(), high.as_str()],
            ChatKey::Group(id) => self
                .groups
                .get(id)
                .map(|group| group.members.iter().map(String::as_str).collect())
                .unwrap_or_default(),
        };

        let mut sessions: Vec<SessionId> = Vec::new();
        for session in participants.into_iter().filter_map(|user| self.online_session(user)) {
            if !sessions.contains(&session) {
                sessions.push(session);
            }
        }
        sessions
    }

    /// Queue `event` for every online participant of the chat at `key`.
    fn notify_participants(&self, key: &ChatKey, event: ServerEvent, out: &mut Vec<Outbound>) {
        for session in self.participant_sessions(key) {
            out.push(Outbound::to(session, event.clone()));
        }
    }
}

/// A required text field: present and not blank.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Interpret a client timestamp given as RFC 3339 text or epoch milliseconds.
fn client_timestamp(value: Option<serde_json::Value>) -> Option<DateTime<Utc>> {
    match value? {
        serde_json::Value::String(text) => DateTime::parse_from_rfc3339(&text)
            .ok()
            .map(|timestamp| timestamp.with_timezone(&Utc)),
        serde_json::Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}
