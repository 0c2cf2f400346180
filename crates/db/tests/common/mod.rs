#![allow(dead_code)]

use chrono::{SecondsFormat, TimeZone, Utc};
use indiereel_db::store::{Document, MemoryDocumentStore};
use serde_json::Value;

/// RFC 3339 timestamp `ms` milliseconds after the epoch.
pub fn ts(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .unwrap()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Store a document verbatim under a fixed id.
pub async fn seed(store: &MemoryDocumentStore, collection: &str, id: &str, data: Value) {
    let data = data.as_object().cloned().expect("seed data must be an object");
    store
        .insert_raw(
            collection,
            Document {
                id: id.to_string(),
                data,
            },
        )
        .await;
}
