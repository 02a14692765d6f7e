use chathub_users::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GroupId;

/// Group or broadcast channel
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    #[default]
    Group,
    Channel,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Group => "group",
            GroupType::Channel => "channel",
        }
    }
}

impl From<&str> for GroupType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "channel" => GroupType::Channel,
            _ => GroupType::Group,
        }
    }
}

/// A group or channel with its membership
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// `@`-prefixed handle, unique across users and groups
    pub username: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    pub avatar: String,
    /// Members in join order
    pub members: Vec<UserId>,
    pub admins: Vec<UserId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|member| member == user_id)
    }
}

/// Request to create a group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    /// Requested handle, with or without the leading `@`
    pub username: String,
    #[serde(rename = "type", default)]
    pub group_type: GroupType,
    pub created_by: UserId,
}

impl CreateGroupRequest {
    pub fn new(name: impl Into<String>, username: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            group_type: GroupType::Group,
            created_by: created_by.into(),
        }
    }

    pub fn with_type(mut self, group_type: GroupType) -> Self {
        self.group_type = group_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_type_parsing_defaults_to_group() {
        assert_eq!(GroupType::from("channel"), GroupType::Channel);
        assert_eq!(GroupType::from("Channel"), GroupType::Channel);
        assert_eq!(GroupType::from("anything"), GroupType::Group);
        assert_eq!(GroupType::default().as_str(), "group");
    }

    #[test]
    fn group_serializes_type_field() {
        let group = Group {
            id: "g_1".into(),
            name: "Team".into(),
            username: "@team".into(),
            group_type: GroupType::Channel,
            avatar: "#667eea".into(),
            members: vec!["a@x".into()],
            admins: vec!["a@x".into()],
            created_by: "a@x".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["type"], "channel");
        assert_eq!(json["createdBy"], "a@x");
        assert!(group.is_member("a@x"));
    }
}
