//! Wire protocol spoken over `/ws`.
//!
//! Every frame is `{"type": "<event-name>", "data": <payload>}` with camelCase
//! payload fields. Inbound payload fields are all optional: a frame missing a
//! field the handler needs is accepted and then ignored by the engine.

use chathub_chats::{ChatMessage, Group, Reactions};
use chathub_users::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    Register {
        email: Option<String>,
        name: Option<String>,
        username: Option<String>,
        avatar: Option<String>,
    },
    SendMessage {
        sender_id: Option<String>,
        receiver_id: Option<String>,
        text: Option<String>,
        /// RFC 3339 string or epoch milliseconds
        timestamp: Option<serde_json::Value>,
        reply_to: Option<serde_json::Value>,
    },
    GetMessages {
        user1: Option<String>,
        user2: Option<String>,
    },
    MarkAsRead {
        sender_id: Option<String>,
        receiver_id: Option<String>,
    },
    EditMessage {
        message_id: Option<String>,
        chat_key: Option<String>,
        new_text: Option<String>,
        sender_id: Option<String>,
    },
    DeleteMessage {
        message_id: Option<String>,
        chat_key: Option<String>,
        sender_id: Option<String>,
        delete_for: Option<String>,
    },
    Typing {
        sender_id: Option<String>,
        receiver_id: Option<String>,
        is_typing: Option<bool>,
    },
    CreateGroup {
        name: Option<String>,
        username: Option<String>,
        #[serde(rename = "type")]
        group_type: Option<String>,
        created_by: Option<String>,
    },
    JoinGroup {
        group_id: Option<String>,
        user_id: Option<String>,
    },
    LeaveGroup {
        group_id: Option<String>,
        user_id: Option<String>,
    },
    SendGroupMessage {
        group_id: Option<String>,
        sender_id: Option<String>,
        text: Option<String>,
        timestamp: Option<serde_json::Value>,
        reply_to: Option<serde_json::Value>,
    },
    GetGroupMessages {
        group_id: Option<String>,
    },
    AddReaction {
        message_id: Option<String>,
        chat_key: Option<String>,
        emoji: Option<String>,
        user_id: Option<String>,
    },
    Search(SearchQuery),
}

/// A search request: either the bare query string or `{"query": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchQuery {
    Text(String),
    Fields { query: Option<String> },
}

impl SearchQuery {
    pub fn as_str(&self) -> &str {
        match self {
            SearchQuery::Text(text) => text,
            SearchQuery::Fields { query } => query.as_deref().unwrap_or_default(),
        }
    }
}

/// Events sent to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    UsersList(Vec<User>),
    GroupsList(Vec<Group>),
    UserOnline {
        user_id: String,
        online: bool,
    },
    UserOffline {
        user_id: String,
        last_seen: DateTime<Utc>,
    },
    RegistrationError {
        message: String,
    },
    ReceiveMessage(ChatMessage),
    MessageSent(ChatMessage),
    MessagesHistory(Vec<ChatMessage>),
    MessagesRead {
        receiver_id: String,
    },
    MessageEdited {
        message_id: String,
        new_text: String,
        chat_key: String,
    },
    MessageDeleted {
        message_id: String,
        chat_key: String,
    },
    UserTyping {
        sender_id: String,
        is_typing: bool,
    },
    NewGroup(Group),
    GroupCreated(Group),
    GroupError {
        message: String,
    },
    GroupUpdated(Group),
    LeftGroup {
        group_id: String,
    },
    ReceiveGroupMessage {
        message: ChatMessage,
        group: Group,
    },
    GroupMessagesHistory(Vec<ChatMessage>),
    ReactionUpdated {
        message_id: String,
        reactions: Reactions,
        chat_key: String,
    },
    SearchResults(Vec<SearchResult>),
}

impl ServerEvent {
    /// Event name as it appears in the `type` field.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::UsersList(_) => "users-list",
            ServerEvent::GroupsList(_) => "groups-list",
            ServerEvent::UserOnline { .. } => "user-online",
            ServerEvent::UserOffline { .. } => "user-offline",
            ServerEvent::RegistrationError { .. } => "registration-error",
            ServerEvent::ReceiveMessage(_) => "receive-message",
            ServerEvent::MessageSent(_) => "message-sent",
            ServerEvent::MessagesHistory(_) => "messages-history",
            ServerEvent::MessagesRead { .. } => "messages-read",
            ServerEvent::MessageEdited { .. } => "message-edited",
            ServerEvent::MessageDeleted { .. } => "message-deleted",
            ServerEvent::UserTyping { .. } => "user-typing",
            ServerEvent::NewGroup(_) => "new-group",
            ServerEvent::GroupCreated(_) => "group-created",
            ServerEvent::GroupError { .. } => "group-error",
            ServerEvent::GroupUpdated(_) => "group-updated",
            ServerEvent::LeftGroup { .. } => "left-group",
            ServerEvent::ReceiveGroupMessage { .. } => "receive-group-message",
            ServerEvent::GroupMessagesHistory(_) => "group-messages-history",
            ServerEvent::ReactionUpdated { .. } => "reaction-updated",
            ServerEvent::SearchResults(_) => "search-results",
        }
    }
}

/// Kind of a search hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    User,
    Group,
    Channel,
}

/// One entry of `search-results`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(rename = "type")]
    pub kind: SearchKind,
    pub avatar: String,
    /// Presence, reported for users only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
}
