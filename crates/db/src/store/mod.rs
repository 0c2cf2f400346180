//! The document-store seam.
//!
//! A store holds flat JSON documents grouped into named collections. It
//! supports exactly what the readers and repositories need: equality
//! queries, point reads, inserts with server-assigned timestamps, top-level
//! merge patches and hard deletes. Each call is atomic on its own document;
//! nothing spans documents.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use indiereel_core::types::{DocId, Timestamp};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DbError, DbResult};

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Body of a stored document, without its id.
pub type DocumentData = Map<String, Value>;

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocId,
    pub data: DocumentData,
}

impl Document {
    /// Decode into a typed record, injecting the id as the `id` field.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        let mut data = self.data;
        data.insert("id".to_string(), Value::String(self.id));
        serde_json::from_value(Value::Object(data))
    }
}

/// Top-level equality condition evaluated by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub value: Value,
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether `data` satisfies this predicate.
    pub fn matches(&self, data: &DocumentData) -> bool {
        data.get(&self.field) == Some(&self.value)
    }
}

/// Hosted document database operations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` matching every predicate, in insertion
    /// order.
    async fn query(&self, collection: &str, predicates: &[Predicate]) -> DbResult<Vec<Document>>;

    async fn get(&self, collection: &str, id: &str) -> DbResult<Option<Document>>;

    /// Store a new document under a fresh id. Sets `createdAt` and
    /// `updatedAt`; any `id` key in `data` is ignored.
    async fn insert(&self, collection: &str, data: DocumentData) -> DbResult<Document>;

    /// Create the document at `id` if missing, otherwise merge `patch` into it.
    async fn upsert(&self, collection: &str, id: &str, patch: DocumentData) -> DbResult<Document>;

    /// Merge top-level keys of `patch` into an existing document and bump
    /// `updatedAt`. Returns `None` if there is no such document.
    async fn update(&self, collection: &str, id: &str, patch: DocumentData)
        -> DbResult<Option<Document>>;

    /// Remove a document. Returns whether it existed.
    async fn delete(&self, collection: &str, id: &str) -> DbResult<bool>;

    async fn health_check(&self) -> DbResult<()>;
}

/// Serialize a record or patch into document data. Must serialize to a JSON
/// object.
pub fn to_data<T: Serialize>(value: &T) -> DbResult<DocumentData> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(DbError::Store(format!(
            "Expected a JSON object for document data, got {other}"
        ))),
    }
}

/// Set both timestamps on a document about to be created.
pub(crate) fn stamp_created(data: &mut DocumentData, now: Timestamp) {
    let ts = timestamp_value(now);
    data.insert("createdAt".to_string(), ts.clone());
    data.insert("updatedAt".to_string(), ts);
}

/// Set `updatedAt` on a patch.
pub(crate) fn stamp_updated(data: &mut DocumentData, now: Timestamp) {
    data.insert("updatedAt".to_string(), timestamp_value(now));
}

fn timestamp_value(ts: Timestamp) -> Value {
    Value::String(ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true))
}
