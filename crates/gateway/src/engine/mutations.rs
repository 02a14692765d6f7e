//! Edits, deletions and reactions on stored messages.
//!
//! The client echoes the chat key it addressed; notifications carry that key back
//! unchanged while lookups use the canonical form.

use chathub_chats::{ChatKey, DeleteScope};
use tracing::debug;

use super::{present, MessagingEngine, Outbound};
use crate::events::ServerEvent;

impl MessagingEngine {
    pub(super) fn edit(
        &mut self,
        message_id: Option<String>,
        chat_key: Option<String>,
        new_text: Option<String>,
        sender_id: Option<String>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(message_id), Some(raw_key), Some(new_text), Some(sender_id)) = (
            present(message_id),
            present(chat_key),
            present(new_text),
            present(sender_id),
        ) else {
            return;
        };
        let Some(key) = ChatKey::parse(&raw_key) else {
            return;
        };

        match self.chats.edit(&key, &message_id, &sender_id, &new_text) {
            Ok(message) => self.notify_participants(
                &key,
                ServerEvent::MessageEdited {
                    message_id,
                    new_text: message.text,
                    chat_key: raw_key,
                },
                out,
            ),
            Err(error) => debug!(message = %message_id, %error, "edit ignored"),
        }
    }

    pub(super) fn delete(
        &mut self,
        session: &str,
        message_id: Option<String>,
        chat_key: Option<String>,
        sender_id: Option<String>,
        delete_for: Option<String>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(message_id), Some(raw_key), Some(sender_id)) =
            (present(message_id), present(chat_key), present(sender_id))
        else {
            return;
        };
        let Some(key) = ChatKey::parse(&raw_key) else {
            return;
        };

        if let Err(error) = self.chats.find_owned(&key, &message_id, &sender_id) {
            debug!(message = %message_id, %error, "delete ignored");
            return;
        }

        let event = ServerEvent::MessageDeleted {
            message_id: message_id.clone(),
            chat_key: raw_key,
        };
        match DeleteScope::from(delete_for.as_deref()) {
            DeleteScope::Everyone => match self.chats.remove(&key, &message_id, &sender_id) {
                Ok(_) => self.notify_participants(&key, event, out),
                Err(error) => debug!(message = %message_id, %error, "delete ignored"),
            },
            DeleteScope::SelfOnly => out.push(Outbound::to(session, event)),
        }
    }

    pub(super) fn react(
        &mut self,
        message_id: Option<String>,
        chat_key: Option<String>,
        emoji: Option<String>,
        user_id: Option<String>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(message_id), Some(raw_key), Some(emoji), Some(user_id)) = (
            present(message_id),
            present(chat_key),
            present(emoji),
            present(user_id),
        ) else {
            return;
        };
        let Some(key) = ChatKey::parse(&raw_key) else {
            return;
        };

        match self.chats.toggle_reaction(&key, &message_id, &emoji, &user_id) {
            Ok(reactions) => self.notify_participants(
                &key,
                ServerEvent::ReactionUpdated {
                    message_id,
                    reactions,
                    chat_key: raw_key,
                },
                out,
            ),
            Err(error) => debug!(message = %message_id, %error, "reaction ignored"),
        }
    }
}
