//! Group and channel registry.

use std::collections::HashMap;

use chathub_users::utils::{clean_handle, color_for, display_handle};
use chathub_users::{HandleOwner, HandleRegistry};
use chrono::Utc;
use tracing::{debug, info};

use crate::entities::{CreateGroupRequest, Group};
use crate::types::{ChatError, ChatResult, GroupId};
use crate::utils::group_id;

/// In-memory group store, iterated in creation order.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: HashMap<GroupId, Group>,
    order: Vec<GroupId>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group whose only member and admin is its creator.
    ///
    /// The handle is claimed in the namespace shared with users before the group
    /// is stored, so a conflict leaves no trace.
    pub fn create(&mut self, handles: &mut HandleRegistry, request: CreateGroupRequest) -> ChatResult<Group> {
        let name = request.name.trim();
        let creator = request.created_by.trim();
        if name.is_empty() || creator.is_empty() {
            return Err(ChatError::validation("group name and creator are required"));
        }
        let handle = clean_handle(&request.username)
            .ok_or_else(|| ChatError::validation("group handle is required"))?;

        let id = group_id();
        handles.claim(&handle, HandleOwner::Group(id.clone()))?;

        let group = Group {
            id: id.clone(),
            name: name.to_string(),
            username: display_handle(&handle),
            group_type: request.group_type,
            avatar: color_for(&request.name),
            members: vec![creator.to_string()],
            admins: vec![creator.to_string()],
            created_by: creator.to_string(),
            created_at: Utc::now(),
        };

        self.groups.insert(id.clone(), group.clone());
        self.order.push(id);

        info!(group = %group.id, handle = %group.username, kind = group.group_type.as_str(), "group created");
        Ok(group)
    }

    /// Add `user_id` to the members. Returns the group state, changed or not.
    pub fn join(&mut self, group_id: &str, user_id: &str) -> Option<&Group> {
        let group = self.groups.get_mut(group_id)?;
        if !group.is_member(user_id) {
            group.members.push(user_id.to_string());
            debug!(group = group_id, user = user_id, "member joined");
        }
        Some(group)
    }

    /// Remove `user_id` from both members and admins.
    pub fn leave(&mut self, group_id: &str, user_id: &str) -> Option<&Group> {
        let group = self.groups.get_mut(group_id)?;
        group.members.retain(|member| member != user_id);
        group.admins.retain(|admin| admin != user_id);
        debug!(group = group_id, user = user_id, "member left");
        Some(group)
    }

    /// Make sure `user_id` is a member, returning `true` if they were just added.
    pub fn ensure_member(&mut self, group_id: &str, user_id: &str) -> ChatResult<bool> {
        let group = self
            .groups
            .get_mut(group_id)
            .ok_or_else(|| ChatError::group_not_found(group_id))?;
        if group.is_member(user_id) {
            return Ok(false);
        }
        group.members.push(user_id.to_string());
        debug!(group = group_id, user = user_id, "sender auto-joined group");
        Ok(true)
    }

    pub fn get(&self, group_id: &str) -> Option<&Group> {
        self.groups.get(group_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.order.iter().filter_map(|id| self.groups.get(id))
    }

    /// Snapshot of every group, in creation order.
    pub fn list(&self) -> Vec<Group> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
