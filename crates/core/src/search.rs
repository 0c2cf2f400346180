//! Free-text search and list-size helpers.
//!
//! Search is plain case-insensitive containment over a fixed list of fields
//! per entity. There is no tokenization, stemming or ranking; callers keep
//! the input order of whatever matches.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of records per list page.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Maximum number of records per list page.
pub const MAX_LIST_LIMIT: usize = 100;

/// Clamp a user-provided limit to `1..=max`, defaulting when absent.
pub fn clamp_limit(limit: Option<usize>, default: usize, max: usize) -> usize {
    limit.unwrap_or(default).clamp(1, max)
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Normalize a raw query string. Returns `None` for blank input, which
/// callers treat as "no search".
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive containment of an already-lowercased `needle`.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Whether any of `fields` contains `needle_lower`.
pub fn any_field_matches<'a>(
    fields: impl IntoIterator<Item = &'a str>,
    needle_lower: &str,
) -> bool {
    fields
        .into_iter()
        .any(|f| contains_ignore_case(f, needle_lower))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
