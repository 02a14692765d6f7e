//! Case-insensitive lookup over users and groups.

use chathub_chats::{GroupRegistry, GroupType};
use chathub_users::UserDirectory;

use super::{MessagingEngine, Outbound};
use crate::events::{SearchKind, SearchResult, ServerEvent};

/// Lower-case the query and drop surrounding blanks and one leading `@`.
pub fn normalise_query(query: &str) -> String {
    let lowered = query.trim().to_lowercase();
    lowered
        .strip_prefix('@')
        .unwrap_or(&lowered)
        .trim()
        .to_string()
}

/// Users whose handle or name contains the term, then groups matching the same way.
/// Results keep registration and creation order.
pub fn search(users: &UserDirectory, groups: &GroupRegistry, query: &str) -> Vec<SearchResult> {
    let term = normalise_query(query);
    if term.is_empty() {
        return Vec::new();
    }
    let matches = |handle: &str, name: &str| {
        handle.to_lowercase().contains(&term) || name.to_lowercase().contains(&term)
    };

    let found_users = users
        .iter()
        .filter(|user| matches(&user.username, &user.name))
        .map(|user| SearchResult {
            id: user.id.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            kind: SearchKind::User,
            avatar: user.avatar.clone(),
            online: Some(user.online),
        });

    let found_groups = groups
        .iter()
        .filter(|group| matches(&group.username, &group.name))
        .map(|group| SearchResult {
            id: group.id.clone(),
            name: group.name.clone(),
            username: group.username.clone(),
            kind: match group.group_type {
                GroupType::Group => SearchKind::Group,
                GroupType::Channel => SearchKind::Channel,
            },
            avatar: group.avatar.clone(),
            online: None,
        });

    found_users.chain(found_groups).collect()
}

impl MessagingEngine {
    pub(super) fn search(&self, session: &str, query: &str, out: &mut Vec<Outbound>) {
        if normalise_query(query).is_empty() {
            return;
        }
        let results = search(&self.users, &self.groups, query);
        out.push(Outbound::to(session, ServerEvent::SearchResults(results)));
    }
}
