use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A user known to the hub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identity, identical to `email`
    pub id: UserId,
    /// Email address the user registered with
    pub email: String,
    /// Display name
    pub name: String,
    /// Unique handle, always `@`-prefixed
    pub username: String,
    /// Avatar descriptor (a colour or an image reference)
    pub avatar: String,
    /// Whether the user currently has a live session
    pub online: bool,
    /// Last time the user connected or disconnected
    pub last_seen: DateTime<Utc>,
}

impl User {
    /// Projection used by the read-only listing endpoint.
    pub fn listing(&self) -> UserListing {
        UserListing {
            id: self.id.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            online: self.online,
            last_seen: self.last_seen,
        }
    }
}

/// Public presence listing of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListing {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub online: bool,
    pub last_seen: DateTime<Utc>,
}

/// Request to register (or re-register) an identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    /// Requested handle, with or without a leading `@`
    pub username: Option<String>,
    pub avatar: Option<String>,
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            username: None,
            avatar: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Validate the register request
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("Email cannot be empty".to_string());
        }

        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_with_camel_case_fields() {
        let user = User {
            id: "a@x".to_string(),
            email: "a@x".to_string(),
            name: "Alice".to_string(),
            username: "@a".to_string(),
            avatar: "#667eea".to_string(),
            online: true,
            last_seen: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["lastSeen"], serde_json::to_value(user.last_seen).unwrap());
        assert_eq!(json["username"], "@a");
        assert!(json.get("last_seen").is_none());
    }

    #[test]
    fn register_request_requires_email_and_name() {
        assert!(RegisterRequest::new("", "Alice").validate().is_err());
        assert!(RegisterRequest::new("a@x", "  ").validate().is_err());
        assert!(RegisterRequest::new("a@x", "Alice").validate().is_ok());
    }
}
