//! Query-string parsing for list endpoints.
//!
//! `limit`, `cursor` and `q` (alias `search`) control paging and search.
//! `box` is consumed by the request endpoints. Every other key becomes an
//! equality filter, which the reader validates against the entity's
//! filterable fields.

use std::collections::HashMap;

use indiereel_core::refine::ListQuery;

use crate::error::{AppError, AppResult};

/// Keys that never become field filters.
pub const RESERVED_KEYS: &[&str] = &["limit", "cursor", "q", "search", "box"];

/// Build a [`ListQuery`] from raw query parameters.
///
/// Filters are emitted in key order so the same URL always produces the same
/// query.
pub fn list_query(params: &HashMap<String, String>) -> AppResult<ListQuery> {
    let mut query = ListQuery::new();

    if let Some(raw) = params.get("limit") {
        let limit = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| AppError::BadRequest(format!("Invalid limit '{raw}'")))?;
        query = query.limit(limit);
    }

    if let Some(cursor) = params.get("cursor").filter(|c| !c.is_empty()) {
        query = query.after(cursor.clone());
    }

    if let Some(q) = params.get("q").or_else(|| params.get("search")) {
        query = query.search(q.clone());
    }

    let mut filters: Vec<(&String, &String)> = params
        .iter()
        .filter(|(k, v)| !RESERVED_KEYS.contains(&k.as_str()) && !v.is_empty())
        .collect();
    filters.sort();
    for (field, value) in filters {
        query = query.filter(field.clone(), value.clone());
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reserved_keys_are_not_filters() {
        let q = list_query(&params(&[
            ("limit", "5"),
            ("cursor", "100:abc"),
            ("q", "noir"),
            ("box", "outbox"),
            ("genre", "Drama"),
        ]))
        .unwrap();

        assert_eq!(q.limit, Some(5));
        assert_eq!(q.cursor.as_deref(), Some("100:abc"));
        assert_eq!(q.search.as_deref(), Some("noir"));
        assert_eq!(q.filters.len(), 1);
        assert_eq!(q.filters[0].field, "genre");
        assert_eq!(q.filters[0].value, "Drama");
    }

    #[test]
    fn empty_filter_values_are_ignored() {
        let q = list_query(&params(&[("location", ""), ("genre", "Horror")])).unwrap();
        assert_eq!(q.filters.len(), 1);
    }

    #[test]
    fn filters_are_sorted_by_key() {
        let q = list_query(&params(&[("status", "released"), ("genre", "Drama")])).unwrap();
        let fields: Vec<_> = q.filters.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["genre", "status"]);
    }

    #[test]
    fn non_numeric_limit_is_bad_request() {
        let err = list_query(&params(&[("limit", "ten")])).unwrap_err();
        assert_matches!(err, AppError::BadRequest(_));
    }
}
