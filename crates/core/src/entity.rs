//! The [`Entity`] trait every stored record type implements.
//!
//! The trait carries just enough per-type metadata (collection name,
//! visibility field, filterable fields, searchable text) for one generic
//! reader and one generic refiner to serve every list page.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::Timestamp;

/// A flat, independently stored record keyed by an opaque id.
pub trait Entity: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Collection the records live in.
    const COLLECTION: &'static str;

    /// Human-readable type name used in error messages.
    const NAME: &'static str;

    /// Boolean field that gates list inclusion, pushed to the store as an
    /// equality predicate. `None` for types that are scoped some other way.
    const VISIBILITY_FIELD: Option<&'static str> = None;

    /// Wire names of the fields accepted as equality filters.
    const FILTER_FIELDS: &'static [&'static str] = &[];

    /// The one filter field that may be pushed to the store alongside the
    /// visibility predicate. Must be a scalar field.
    const SERVER_FILTER_FIELD: Option<&'static str> = None;

    fn id(&self) -> &str;

    fn created_at(&self) -> Option<&Timestamp>;

    /// Whether the record passes its visibility gate. Must agree with
    /// [`Entity::VISIBILITY_FIELD`] being strictly `true`.
    fn is_visible(&self) -> bool {
        true
    }

    /// Whether the fields used for display and ordering are present.
    fn has_required_fields(&self) -> bool {
        true
    }

    /// Text searched by free-text queries, in a fixed order.
    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Equality test for one filter field. Array fields test membership.
    /// Unknown fields never match.
    fn field_matches(&self, _field: &str, _value: &str) -> bool {
        false
    }
}

/// Equality against an optional scalar.
pub fn opt_eq(field: &Option<String>, value: &str) -> bool {
    field.as_deref() == Some(value)
}

/// Membership in a string array.
pub fn list_contains(list: &[String], value: &str) -> bool {
    list.iter().any(|v| v == value)
}

/// `true` when the value is present and not just whitespace.
pub fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Push an optional field onto a search-field list.
pub fn push_opt<'a>(out: &mut Vec<&'a str>, field: &'a Option<String>) {
    if let Some(s) = field.as_deref() {
        out.push(s);
    }
}
