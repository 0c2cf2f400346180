//! Client-side refinement of a coarsely-fetched working set.
//!
//! The reader fetches everything matching the visibility predicate (plus at
//! most one pushed-down equality predicate); this module does the rest in
//! memory:
//!
//! 1. drop records that fail visibility or lack their display/sort fields
//! 2. apply equality filters
//! 3. apply case-insensitive substring search
//! 4. stable sort, newest `createdAt` first (missing = epoch 0)
//! 5. resume after the cursor and truncate to the limit

use std::cmp::Reverse;

use serde::Serialize;

use crate::entity::Entity;
use crate::error::CoreError;
use crate::search::{any_field_matches, clamp_limit, normalize_query, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::types::sort_millis;

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// One scalar equality condition. For array fields it tests membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

/// Everything a list page can ask for.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<FieldFilter>,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub cursor: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Reject filters on fields `T` does not expose.
    pub fn validate_for<T: Entity>(&self) -> Result<(), CoreError> {
        for f in &self.filters {
            if !T::FILTER_FIELDS.contains(&f.field.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Cannot filter {} by '{}'. Filterable fields: {}",
                    T::NAME,
                    f.field,
                    T::FILTER_FIELDS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// The filter that may be pushed to the store, if the caller supplied
    /// one on `T`'s designated server-side field.
    pub fn server_filter<T: Entity>(&self) -> Option<&FieldFilter> {
        let field = T::SERVER_FILTER_FIELD?;
        self.filters.iter().find(|f| f.field == field)
    }

    pub fn effective_limit(&self) -> usize {
        clamp_limit(self.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Position after the last record of a page: `<createdAt-millis>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub created_ms: i64,
    pub id: String,
}

impl Cursor {
    pub fn of<T: Entity>(record: &T) -> Self {
        Self {
            created_ms: sort_millis(record.created_at()),
            id: record.id().to_string(),
        }
    }

    pub fn encode(&self) -> String {
        format!("{}:{}", self.created_ms, self.id)
    }

    pub fn decode(raw: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::Validation(format!("Invalid cursor '{raw}'"));
        let (ms, id) = raw.split_once(':').ok_or_else(invalid)?;
        let created_ms = ms.parse::<i64>().map_err(|_| invalid())?;
        if id.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            created_ms,
            id: id.to_string(),
        })
    }
}

/// One page of refined results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

/// Keep records that pass visibility and have their required fields.
/// Everything else is dropped silently.
pub fn retain_listable<T: Entity>(mut records: Vec<T>) -> Vec<T> {
    records.retain(|r| r.is_visible() && r.has_required_fields());
    records
}

/// Keep records matching every filter.
pub fn apply_filters<T: Entity>(mut records: Vec<T>, filters: &[FieldFilter]) -> Vec<T> {
    if filters.is_empty() {
        return records;
    }
    records.retain(|r| filters.iter().all(|f| r.field_matches(&f.field, &f.value)));
    records
}

/// Keep records with any search field containing `query`, ignoring case.
/// Blank queries keep everything. Input order is preserved.
pub fn apply_search<T: Entity>(mut records: Vec<T>, query: Option<&str>) -> Vec<T> {
    let Some(needle) = query.and_then(normalize_query) else {
        return records;
    };
    records.retain(|r| any_field_matches(r.search_fields(), &needle));
    records
}

/// Stable sort, newest first. Equal or missing timestamps keep input order.
pub fn sort_newest_first<T: Entity>(records: &mut [T]) {
    records.sort_by_key(|r| Reverse(sort_millis(r.created_at())));
}

/// Stable sort, oldest first. Used for chat threads.
pub fn sort_oldest_first<T: Entity>(records: &mut [T]) {
    records.sort_by_key(|r| sort_millis(r.created_at()));
}

/// Slice an already-sorted set after `cursor`, up to `limit` records.
pub fn paginate<T: Entity>(sorted: Vec<T>, cursor: Option<&Cursor>, limit: usize) -> Page<T> {
    let start = match cursor {
        None => 0,
        Some(c) => match sorted.iter().position(|r| r.id() == c.id) {
            Some(idx) => idx + 1,
            // The cursor record vanished; resume at the first strictly older one.
            // Unseen records sharing its timestamp are skipped.
            None => sorted
                .iter()
                .position(|r| sort_millis(r.created_at()) < c.created_ms)
                .unwrap_or(sorted.len()),
        },
    };

    let total = sorted.len();
    let items: Vec<T> = sorted.into_iter().skip(start).take(limit).collect();
    let next_cursor = if start + items.len() < total {
        items.last().map(|r| Cursor::of(r).encode())
    } else {
        None
    };

    Page { items, next_cursor }
}

/// Run the full refinement pipeline over a fetched working set.
pub fn refine<T: Entity>(records: Vec<T>, query: &ListQuery) -> Result<Page<T>, CoreError> {
    query.validate_for::<T>()?;
    let cursor = query.cursor.as_deref().map(Cursor::decode).transpose()?;

    let records = retain_listable(records);
    let records = apply_filters(records, &query.filters);
    let mut records = apply_search(records, query.search.as_deref());
    sort_newest_first(&mut records);

    Ok(paginate(records, cursor.as_ref(), query.effective_limit()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
