//! Identifier generation.

use chrono::Utc;

/// Message id: the current millisecond followed by a cuid2 suffix.
///
/// Ids sort roughly by creation time and stay unique when several messages
/// are created in the same millisecond.
pub fn message_id() -> String {
    format!("{}{}", Utc::now().timestamp_millis(), cuid2::create_id())
}

pub fn group_id() -> String {
    format!("g_{}", cuid2::create_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn message_ids_are_unique_in_a_burst() {
        let ids: HashSet<_> = (0..1_000).map(|_| message_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn group_ids_are_prefixed() {
        let id = group_id();
        assert!(id.starts_with("g_"));
        assert!(id.len() > 2);
    }
}
