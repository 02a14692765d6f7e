//! Domain entities for the chat system.
//!
//! Messages, groups and the keys that address message logs.

pub mod chat_key;
pub mod group;
pub mod message;

// Re-export all entity types
pub use chat_key::ChatKey;
pub use group::{CreateGroupRequest, Group, GroupType};
pub use message::{ChatMessage, DeleteScope, MessageKind, Reactions};
