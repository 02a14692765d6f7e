//! Session ↔ user bindings.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{SessionId, UserId};

/// Bidirectional map between live sessions and the users bound to them.
///
/// A user has at most one bound session and a session is bound to at most one user.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    by_session: HashMap<SessionId, UserId>,
    by_user: HashMap<UserId, SessionId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `session` to `user`, returning the session that was evicted, if any.
    ///
    /// The evicted session is not notified; it simply stops being a delivery target.
    pub fn bind(&mut self, session: &str, user: &str) -> Option<SessionId> {
        if let Some(previous_user) = self.by_session.get(session) {
            if previous_user != user && self.by_user.get(previous_user).map(String::as_str) == Some(session) {
                self.by_user.remove(previous_user);
            }
        }

        let evicted = match self.by_user.insert(user.to_string(), session.to_string()) {
            Some(old) if old != session => {
                self.by_session.remove(&old);
                debug!(user, evicted = %old, "replaced previous session binding");
                Some(old)
            }
            _ => None,
        };

        self.by_session.insert(session.to_string(), user.to_string());
        evicted
    }

    /// Remove `session` and return the user it was bound to.
    pub fn unbind(&mut self, session: &str) -> Option<UserId> {
        let user = self.by_session.remove(session)?;
        if self.by_user.get(&user).map(String::as_str) == Some(session) {
            self.by_user.remove(&user);
        }
        Some(user)
    }

    pub fn session_of(&self, user: &str) -> Option<&SessionId> {
        self.by_user.get(user)
    }

    pub fn user_of(&self, session: &str) -> Option<&UserId> {
        self.by_session.get(session)
    }

    pub fn len(&self) -> usize {
        self.by_session.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_session.is_empty()
    }
}
