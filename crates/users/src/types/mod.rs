//! Shared types for the user side of the hub.

pub mod errors;

pub use errors::{UserError, UserResult};

/// Stable user identity (an email address in practice).
pub type UserId = String;
/// Opaque transport session identifier.
pub type SessionId = String;
