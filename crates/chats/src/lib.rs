//! # chathub Chats Crate
//!
//! Conversation-side stores of the hub: the group registry and the chat store,
//! plus the chat keys and message types they hold.
//!
//! ## Architecture
//!
//! - **Entities**: Domain models (ChatKey, ChatMessage, Group)
//! - **Services**: In-memory stores (GroupRegistry, ChatStore)
//! - **Types**: Identifiers and errors
//! - **Utils**: Id generation
//!
//! ## Usage
//!
//! ```rust
//! use chathub_chats::{ChatKey, ChatMessage, ChatStore};
//!
//! let mut store = ChatStore::new();
//! let key = ChatKey::direct("bob@example.com", "alice@example.com");
//! store.append(key.clone(), ChatMessage::direct("alice@example.com", "bob@example.com", "hi", None, None));
//! assert_eq!(store.history(&key).len(), 1);
//! ```

pub mod entities;
pub mod services;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use entities::{
    ChatKey, ChatMessage, CreateGroupRequest, DeleteScope, Group, GroupType, MessageKind, Reactions,
};
pub use services::{ChatStore, GroupRegistry};
pub use types::{ChatError, ChatResult, GroupId, MessageId};
