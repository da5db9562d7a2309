//! Display labels for entities that have no resolvable profile.

/// Number of id characters kept in a placeholder label.
pub const SHORT_ID_LEN: usize = 8;

/// Returns the first [`SHORT_ID_LEN`] characters of an id.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Builds a label such as `"Livreur 3f2a9c1e"` from a role and an id.
pub fn placeholder_label(role: &str, id: &str) -> String {
    format!("{} {}", role, short_id(id))
}
