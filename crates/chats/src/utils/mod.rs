//! Internal utilities for the chat system.

pub mod ids;

pub use ids::{group_id, message_id};
