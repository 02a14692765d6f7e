//! Error types for the chat system.

use chathub_users::UserError;
use thiserror::Error;

/// Result type alias for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Main error type for the chat system
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Handle namespace conflicts surface unchanged from the users crate.
    #[error(transparent)]
    Handle(#[from] UserError),

    #[error("Group not found: {id}")]
    GroupNotFound { id: String },

    #[error("Message not found: {id}")]
    MessageNotFound { id: String },

    #[error("Access denied: {reason}")]
    AccessDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl ChatError {
    /// Create a not found error for groups
    pub fn group_not_found(id: impl Into<String>) -> Self {
        Self::GroupNotFound { id: id.into() }
    }

    /// Create a not found error for messages
    pub fn message_not_found(id: impl Into<String>) -> Self {
        Self::MessageNotFound { id: id.into() }
    }

    /// Create an access denied error
    pub fn access_denied(reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True when the error is a handle conflict the caller should be told about.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Handle(UserError::HandleTaken { .. }))
    }
}
