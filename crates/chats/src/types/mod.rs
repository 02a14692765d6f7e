//! Shared types for the chat system.

pub mod errors;

pub use errors::{ChatError, ChatResult};

/// Identifier of a group or channel (`g_` prefixed).
pub type GroupId = String;

/// Identifier of a stored message.
pub type MessageId = String;
