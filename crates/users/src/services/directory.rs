//! The user directory: one record per identity.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::entities::{RegisterRequest, User, UserListing};
use crate::services::handles::{HandleOwner, HandleRegistry};
use crate::types::{UserError, UserId, UserResult};
use crate::utils::{clean_handle, color_for, default_handle_base, display_handle};

/// In-memory user store, iterated in registration order.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<UserId, User>,
    order: Vec<UserId>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the record for `request.email` and mark it online.
    ///
    /// A requested handle must be free in the shared namespace unless this identity
    /// already owns it. Without a requested handle the user keeps their current one,
    /// or gets one derived from the identity.
    pub fn register(
        &mut self,
        handles: &mut HandleRegistry,
        request: RegisterRequest,
    ) -> UserResult<User> {
        request.validate().map_err(UserError::InvalidUserData)?;

        let id = request.email.trim().to_string();
        let owner = HandleOwner::User(id.clone());
        let previous_handle = self.users.get(&id).map(|user| user.username.clone());

        let handle = match request.username.as_deref().and_then(clean_handle) {
            Some(requested) => {
                handles.claim(&requested, owner.clone())?;
                requested
            }
            None => match previous_handle.as_deref().and_then(clean_handle) {
                Some(current) => current,
                None => Self::claim_default(handles, &id, &owner)?,
            },
        };

        if let Some(previous) = previous_handle.as_deref() {
            if previous.trim_start_matches('@').to_lowercase() != handle.to_lowercase() {
                handles.release(previous, &owner);
            }
        }

        let user = User {
            id: id.clone(),
            email: id.clone(),
            name: request.name.trim().to_string(),
            username: display_handle(&handle),
            avatar: request
                .avatar
                .filter(|avatar| !avatar.trim().is_empty())
                .unwrap_or_else(|| color_for(&id)),
            online: true,
            last_seen: Utc::now(),
        };

        if self.users.insert(id.clone(), user.clone()).is_none() {
            self.order.push(id);
        }

        debug!(user = %user.id, handle = %user.username, "directory entry stored");
        Ok(user)
    }

    /// First free variant of the identity's local part: `alice`, `alice2`, `alice3`, ...
    fn claim_default(handles: &mut HandleRegistry, id: &str, owner: &HandleOwner) -> UserResult<String> {
        let base = default_handle_base(id);
        let mut suffix = 1usize;
        loop {
            let candidate = if suffix == 1 {
                base.clone()
            } else {
                format!("{base}{suffix}")
            };
            match handles.claim(&candidate, owner.clone()) {
                Ok(()) => return Ok(candidate),
                Err(UserError::HandleTaken { .. }) => suffix += 1,
                Err(error) => return Err(error),
            }
        }
    }

    /// Flag the user offline and stamp their last-seen time.
    pub fn mark_offline(&mut self, id: &str) -> Option<User> {
        let user = self.users.get_mut(id)?;
        user.online = false;
        user.last_seen = Utc::now();
        Some(user.clone())
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn is_online(&self, id: &str) -> bool {
        self.users.get(id).is_some_and(|user| user.online)
    }

    /// Users in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.order.iter().filter_map(|id| self.users.get(id))
    }

    /// Snapshot of every user, in registration order.
    pub fn list(&self) -> Vec<User> {
        self.iter().cloned().collect()
    }

    pub fn listings(&self) -> Vec<UserListing> {
        self.iter().map(User::listing).collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn online_count(&self) -> usize {
        self.users.values().filter(|user| user.online).count()
    }
}
