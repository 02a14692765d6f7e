//! Ordered message logs keyed by [`ChatKey`].

use std::collections::HashMap;

use tracing::debug;

use crate::entities::{ChatKey, ChatMessage, Reactions};
use crate::types::{ChatError, ChatResult};

/// In-memory message logs.
///
/// Logs are created on first write and never by reads. With a retention limit each
/// log keeps only its newest `limit` messages.
#[derive(Debug, Default)]
pub struct ChatStore {
    logs: HashMap<ChatKey, Vec<ChatMessage>>,
    retention: Option<usize>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retention(limit: Option<usize>) -> Self {
        Self {
            logs: HashMap::new(),
            retention: limit.filter(|limit| *limit > 0),
        }
    }

    /// Append `message` to the log at `key` and return the stored copy.
    pub fn append(&mut self, key: ChatKey, message: ChatMessage) -> ChatMessage {
        let log = self.logs.entry(key).or_default();
        log.push(message.clone());

        if let Some(limit) = self.retention {
            if log.len() > limit {
                let excess = log.len() - limit;
                log.drain(..excess);
                debug!(dropped = excess, "retention trimmed chat log");
            }
        }
        message
    }

    /// Messages at `key`, oldest first. Empty when the chat has no log.
    pub fn history(&self, key: &ChatKey) -> Vec<ChatMessage> {
        self.logs.get(key).cloned().unwrap_or_default()
    }

    /// Mark direct messages from `sender_id` to `receiver_id` as read.
    /// Returns how many messages changed.
    pub fn mark_read(&mut self, sender_id: &str, receiver_id: &str) -> usize {
        let Some(log) = self.logs.get_mut(&ChatKey::direct(sender_id, receiver_id)) else {
            return 0;
        };
        let mut changed = 0;
        for message in log.iter_mut().filter(|message| message.flows(sender_id, receiver_id)) {
            if message.read != Some(true) {
                message.read = Some(true);
                changed += 1;
            }
        }
        changed
    }

    /// Replace the text of a message owned by `requester_id`.
    pub fn edit(
        &mut self,
        key: &ChatKey,
        message_id: &str,
        requester_id: &str,
        new_text: &str,
    ) -> ChatResult<ChatMessage> {
        if new_text.trim().is_empty() {
            return Err(ChatError::validation("message text cannot be empty"));
        }
        let message = self.find_owned_mut(key, message_id, requester_id)?;
        message.edit(new_text);
        Ok(message.clone())
    }

    /// Check that `message_id` exists at `key` and was sent by `requester_id`.
    pub fn find_owned(&self, key: &ChatKey, message_id: &str, requester_id: &str) -> ChatResult<&ChatMessage> {
        let message = self
            .logs
            .get(key)
            .and_then(|log| log.iter().find(|message| message.id == message_id))
            .ok_or_else(|| ChatError::message_not_found(message_id))?;
        if !message.is_sent_by(requester_id) {
            return Err(ChatError::access_denied("only the sender may change a message"));
        }
        Ok(message)
    }

    fn find_owned_mut(&mut self, key: &ChatKey, message_id: &str, requester_id: &str) -> ChatResult<&mut ChatMessage> {
        self.find_owned(key, message_id, requester_id)?;
        self.find_mut(key, message_id)
            .ok_or_else(|| ChatError::message_not_found(message_id))
    }

    /// Remove a message owned by `requester_id` from the shared log.
    pub fn remove(&mut self, key: &ChatKey, message_id: &str, requester_id: &str) -> ChatResult<ChatMessage> {
        self.find_owned(key, message_id, requester_id)?;
        let log = self
            .logs
            .get_mut(key)
            .ok_or_else(|| ChatError::message_not_found(message_id))?;
        let index = log
            .iter()
            .position(|message| message.id == message_id)
            .ok_or_else(|| ChatError::message_not_found(message_id))?;
        Ok(log.remove(index))
    }

    /// Toggle `user_id`'s `emoji` on a message and return the full reaction map.
    pub fn toggle_reaction(
        &mut self,
        key: &ChatKey,
        message_id: &str,
        emoji: &str,
        user_id: &str,
    ) -> ChatResult<Reactions> {
        let message = self
            .find_mut(key, message_id)
            .ok_or_else(|| ChatError::message_not_found(message_id))?;
        message.toggle_reaction(emoji, user_id);
        Ok(message.reactions.clone())
    }

    fn find_mut(&mut self, key: &ChatKey, message_id: &str) -> Option<&mut ChatMessage> {
        self.logs
            .get_mut(key)?
            .iter_mut()
            .find(|message| message.id == message_id)
    }

    /// Total number of stored messages across all logs.
    pub fn message_count(&self) -> usize {
        self.logs.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(store: &mut ChatStore, from: &str, to: &str, text: &str) -> ChatMessage {
        store.append(
            ChatKey::direct(from, to),
            ChatMessage::direct(from, to, text, None, None),
        )
    }

    #[test]
    fn history_is_symmetric_and_ordered() {
        let mut store = ChatStore::new();
        direct(&mut store, "a@x", "b@x", "one");
        direct(&mut store, "b@x", "a@x", "two");

        let forward = store.history(&ChatKey::direct("a@x", "b@x"));
        let backward = store.history(&ChatKey::direct("b@x", "a@x"));
        assert_eq!(forward, backward);
        let texts: Vec<_> = forward.iter().map(|message| message.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn history_never_creates_a_log() {
        let store = ChatStore::new();
        let key = ChatKey::direct("a@x", "b@x");
        assert!(store.history(&key).is_empty());
        assert!(store.logs.is_empty());
    }

    #[test]
    fn mark_read_only_touches_one_direction() {
        let mut store = ChatStore::new();
        direct(&mut store, "a@x", "b@x", "to b");
        direct(&mut store, "b@x", "a@x", "to a");

        assert_eq!(store.mark_read("a@x", "b@x"), 1);
        assert_eq!(store.mark_read("a@x", "b@x"), 0);

        let log = store.history(&ChatKey::direct("a@x", "b@x"));
        assert_eq!(log[0].read, Some(true));
        assert_eq!(log[1].read, Some(false));
    }

    #[test]
    fn edit_requires_ownership() {
        let mut store = ChatStore::new();
        let key = ChatKey::direct("a@x", "b@x");
        let message = direct(&mut store, "a@x", "b@x", "hello");

        assert!(matches!(
            store.edit(&key, &message.id, "b@x", "hacked"),
            Err(ChatError::AccessDenied { .. })
        ));
        assert!(matches!(
            store.edit(&key, &message.id, "a@x", "   "),
            Err(ChatError::Validation { .. })
        ));
        let unchanged = &store.history(&key)[0];
        assert_eq!(unchanged.text, "hello");
        assert!(!unchanged.edited);

        let edited = store.edit(&key, &message.id, "a@x", " hello again ").unwrap();
        assert_eq!(edited.text, "hello again");
        assert!(edited.edited);
    }

    #[test]
    fn remove_requires_ownership() {
        let mut store = ChatStore::new();
        let key = ChatKey::direct("a@x", "b@x");
        let message = direct(&mut store, "a@x", "b@x", "hello");

        assert!(store.remove(&key, &message.id, "b@x").is_err());
        assert_eq!(store.message_count(), 1);

        store.remove(&key, &message.id, "a@x").unwrap();
        assert_eq!(store.message_count(), 0);
        assert!(matches!(
            store.remove(&key, &message.id, "a@x"),
            Err(ChatError::MessageNotFound { .. })
        ));
    }

    #[test]
    fn unknown_key_or_message_is_not_found() {
        let mut store = ChatStore::new();
        let message = direct(&mut store, "a@x", "b@x", "hello");

        assert!(matches!(
            store.toggle_reaction(&ChatKey::group("g_1"), &message.id, "👍", "a@x"),
            Err(ChatError::MessageNotFound { .. })
        ));
        assert!(matches!(
            store.find_owned(&ChatKey::direct("a@x", "b@x"), "nope", "a@x"),
            Err(ChatError::MessageNotFound { .. })
        ));
    }

    #[test]
    fn reaction_toggle_round_trips() {
        let mut store = ChatStore::new();
        let key = ChatKey::direct("a@x", "b@x");
        let message = direct(&mut store, "a@x", "b@x", "hello");

        let first = store.toggle_reaction(&key, &message.id, "👍", "b@x").unwrap();
        assert!(first["👍"].contains("b@x"));

        let second = store.toggle_reaction(&key, &message.id, "👍", "b@x").unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn retention_drops_oldest_first() {
        let mut store = ChatStore::with_retention(Some(2));
        for text in ["one", "two", "three"] {
            direct(&mut store, "a@x", "b@x", text);
        }

        let texts: Vec<_> = store
            .history(&ChatKey::direct("a@x", "b@x"))
            .into_iter()
            .map(|message| message.text)
            .collect();
        assert_eq!(texts, ["two", "three"]);
    }

    #[test]
    fn zero_retention_means_unbounded() {
        let mut store = ChatStore::with_retention(Some(0));
        for text in ["one", "two", "three"] {
            direct(&mut store, "a@x", "b@x", text);
        }
        assert_eq!(store.message_count(), 3);
    }
}
