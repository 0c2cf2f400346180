/// Document ids are opaque strings (UUID v7 for records created here).
pub type DocId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Sort key for a possibly-missing timestamp. Missing maps to epoch 0.
pub fn sort_millis(ts: Option<&Timestamp>) -> i64 {
    ts.map(|t| t.timestamp_millis()).unwrap_or(0)
}

/// Generate a fresh, time-ordered document id.
pub fn new_doc_id() -> DocId {
    uuid::Uuid::now_v7().to_string()
}
