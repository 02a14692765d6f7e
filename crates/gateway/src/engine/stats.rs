//! Read-only projections used by the REST endpoints.

use chathub_users::UserListing;
use serde::Serialize;

use super::MessagingEngine;

/// Aggregate counts over the hub
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HubStats {
    pub users: usize,
    pub groups: usize,
    pub messages: usize,
    pub online: usize,
}

impl MessagingEngine {
    pub fn stats(&self) -> HubStats {
        HubStats {
            users: self.users.len(),
            groups: self.groups.len(),
            messages: self.chats.message_count(),
            online: self.users.online_count(),
        }
    }

    /// Every user with presence, in registration order.
    pub fn user_listings(&self) -> Vec<UserListing> {
        self.users.listings()
    }
}
