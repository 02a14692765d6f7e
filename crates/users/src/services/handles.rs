//! Handle namespace shared by users and groups.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::types::{UserError, UserId, UserResult};

/// Who a handle belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandleOwner {
    User(UserId),
    Group(String),
}

/// Case-insensitive registry of claimed handles.
///
/// Keys are stored without the leading `@`. Claiming is a single
/// insert-if-absent, so a handle can never end up with two owners.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    owners: HashMap<String, HandleOwner>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(handle: &str) -> String {
        let trimmed = handle.trim();
        trimmed
            .strip_prefix('@')
            .unwrap_or(trimmed)
            .trim()
            .to_lowercase()
    }

    /// Claim `handle` for `owner`. Re-claiming a handle the owner already holds succeeds.
    pub fn claim(&mut self, handle: &str, owner: HandleOwner) -> UserResult<()> {
        let key = Self::key(handle);
        if key.is_empty() {
            return Err(UserError::InvalidUserData("handle cannot be empty".to_string()));
        }

        match self.owners.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(owner);
                Ok(())
            }
            Entry::Occupied(slot) if *slot.get() == owner => Ok(()),
            Entry::Occupied(_) => Err(UserError::handle_taken(handle.trim().trim_start_matches('@'))),
        }
    }

    /// Release `handle` if, and only if, it belongs to `owner`.
    pub fn release(&mut self, handle: &str, owner: &HandleOwner) -> bool {
        let key = Self::key(handle);
        match self.owners.get(&key) {
            Some(current) if current == owner => {
                self.owners.remove(&key);
                true
            }
            _ => false,
        }
    }

    pub fn owner_of(&self, handle: &str) -> Option<&HandleOwner> {
        self.owners.get(&Self::key(handle))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
