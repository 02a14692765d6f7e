//! Error types for the user management system.

use thiserror::Error;

/// Result type alias for user operations
pub type UserResult<T> = Result<T, UserError>;

/// User-related errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    /// The handle is already owned by another user or group.
    #[error("@{handle} is already taken!")]
    HandleTaken { handle: String },

    #[error("Invalid user data: {0}")]
    InvalidUserData(String),
}

impl UserError {
    pub fn handle_taken(handle: impl Into<String>) -> Self {
        Self::HandleTaken {
            handle: handle.into(),
        }
    }
}
