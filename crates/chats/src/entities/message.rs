use std::collections::{BTreeMap, BTreeSet};

use chathub_users::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::MessageId;
use crate::utils::message_id;

/// Emoji to the set of users who reacted with it.
pub type Reactions = BTreeMap<String, BTreeSet<UserId>>;

/// Which kind of conversation a message belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Direct,
    Group,
}

/// A stored message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: UserId,
    /// Recipient of a direct message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<UserId>,
    /// Target of a group message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Opaque client reference to the message being replied to
    #[serde(default)]
    pub reply_to: Option<serde_json::Value>,
    /// Read receipt, tracked for direct messages only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default)]
    pub edited: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reactions: Reactions,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl ChatMessage {
    /// Build a direct message with a fresh id. `timestamp` defaults to now.
    pub fn direct(
        sender_id: &str,
        receiver_id: &str,
        text: &str,
        timestamp: Option<DateTime<Utc>>,
        reply_to: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: message_id(),
            sender_id: sender_id.to_string(),
            receiver_id: Some(receiver_id.to_string()),
            group_id: None,
            text: text.trim().to_string(),
            timestamp: timestamp.unwrap_or_else(Utc::now),
            reply_to: reply_to.filter(|value| !value.is_null()),
            read: Some(false),
            edited: false,
            reactions: Reactions::new(),
            kind: MessageKind::Direct,
        }
    }

    /// Build a group message with a fresh id. `timestamp` defaults to now.
    pub fn group(
        sender_id: &str,
        group_id: &str,
        text: &str,
        timestamp: Option<DateTime<Utc>>,
        reply_to: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: message_id(),
            sender_id: sender_id.to_string(),
            receiver_id: None,
            group_id: Some(group_id.to_string()),
            text: text.trim().to_string(),
            timestamp: timestamp.unwrap_or_else(Utc::now),
            reply_to: reply_to.filter(|value| !value.is_null()),
            read: None,
            edited: false,
            reactions: Reactions::new(),
            kind: MessageKind::Group,
        }
    }

    pub fn is_sent_by(&self, user_id: &str) -> bool {
        self.sender_id == user_id
    }

    /// True for a direct message travelling from `sender_id` to `receiver_id`.
    pub fn flows(&self, sender_id: &str, receiver_id: &str) -> bool {
        self.sender_id == sender_id && self.receiver_id.as_deref() == Some(receiver_id)
    }

    pub fn edit(&mut self, new_text: &str) {
        self.text = new_text.trim().to_string();
        self.edited = true;
    }

    /// Add `user_id` under `emoji`, or remove them if already there.
    /// An emoji nobody reacts with any more is dropped.
    pub fn toggle_reaction(&mut self, emoji: &str, user_id: &str) {
        let reactors = self.reactions.entry(emoji.to_string()).or_default();
        if !reactors.remove(user_id) {
            reactors.insert(user_id.to_string());
        }
        if reactors.is_empty() {
            self.reactions.remove(emoji);
        }
    }
}

/// Who a deletion applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    /// Remove the message from the shared log
    Everyone,
    /// Hide the message for the requester only; the log is untouched
    SelfOnly,
}

impl From<Option<&str>> for DeleteScope {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some("everyone") => DeleteScope::Everyone,
            _ => DeleteScope::SelfOnly,
        }
    }
}
