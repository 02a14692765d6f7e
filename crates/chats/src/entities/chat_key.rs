//! Canonical conversation keys.

use std::fmt;

use chathub_users::UserId;

const SEPARATOR: &str = "::";

/// Identifies one message log.
///
/// Direct keys hold the two participants in sorted order, so the key is the same
/// whichever side started the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChatKey {
    Direct { low: UserId, high: UserId },
    Group(String),
}

impl ChatKey {
    pub fn direct(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self::Direct {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::Group(id.into())
    }

    /// Parse a key as sent by clients. A key containing `::` is a direct key and is
    /// re-canonicalised; anything else names a group.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        match raw.split_once(SEPARATOR) {
            Some((a, b)) => Some(Self::direct(a, b)),
            None => Some(Self::Group(raw.to_string())),
        }
    }

    /// Participants of a direct key. Group keys resolve through the group registry.
    pub fn participants(&self) -> Option<[&str; 2]> {
        match self {
            Self::Direct { low, high } => Some([low.as_str(), high.as_str()]),
            Self::Group(_) => None,
        }
    }

    pub fn group_id(&self) -> Option<&str> {
        match self {
            Self::Group(id) => Some(id),
            Self::Direct { .. } => None,
        }
    }
}

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { low, high } => write!(f, "{low}{SEPARATOR}{high}"),
            Self::Group(id) => f.write_str(id),
        }
    }
}
