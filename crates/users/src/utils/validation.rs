//! Handle normalisation helpers.

/// Strip surrounding whitespace and a single leading `@` from a handle.
///
/// Returns `None` when nothing is left.
pub fn clean_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// The `@`-prefixed form stored on users and groups.
pub fn display_handle(clean: &str) -> String {
    format!("@{clean}")
}

/// Handle derived from an identity when the user did not pick one:
/// the local part of the address.
pub fn default_handle_base(identity: &str) -> String {
    let local = identity.split('@').next().unwrap_or_default().trim();
    if local.is_empty() {
        identity.trim().trim_start_matches('@').to_string()
    } else {
        local.to_string()
    }
}
