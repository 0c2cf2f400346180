//! In-process document store.
//!
//! Collections are insertion-ordered maps behind a `tokio` lock. Used for
//! local runs (`STORE_BACKEND=memory`) and as the test backend. Collections
//! can be marked unavailable to exercise failure paths.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use indexmap::IndexMap;
use indiereel_core::types::{new_doc_id, DocId};
use tokio::sync::RwLock;

use super::{stamp_created, stamp_updated, Document, DocumentData, DocumentStore, Predicate};
use crate::error::{DbError, DbResult};

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, IndexMap<DocId, DocumentData>>>,
    unavailable: RwLock<HashSet<String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document exactly as given, without touching timestamps.
    /// For seeding legacy or hand-built records.
    pub async fn insert_raw(&self, collection: &str, document: Document) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(document.id, document.data);
    }

    /// Make every call against `collection` fail until cleared.
    pub async fn set_unavailable(&self, collection: &str, unavailable: bool) {
        let mut set = self.unavailable.write().await;
        if unavailable {
            set.insert(collection.to_string());
        } else {
            set.remove(collection);
        }
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, IndexMap::len)
    }

    async fn check_available(&self, collection: &str) -> DbResult<()> {
        if self.unavailable.read().await.contains(collection) {
            Err(DbError::Store(format!("collection '{collection}' is unavailable")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(&self, collection: &str, predicates: &[Predicate]) -> DbResult<Vec<Document>> {
        self.check_available(collection).await?;
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|(_, data)| predicates.iter().all(|p| p.matches(data)))
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> DbResult<Option<Document>> {
        self.check_available(collection).await?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn insert(&self, collection: &str, mut data: DocumentData) -> DbResult<Document> {
        self.check_available(collection).await?;
        data.remove("id");
        stamp_created(&mut data, chrono::Utc::now());

        let id = new_doc_id();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data.clone());
        Ok(Document { id, data })
    }

    async fn upsert(&self, collection: &str, id: &str, mut patch: DocumentData) -> DbResult<Document> {
        self.check_available(collection).await?;
        patch.remove("id");
        let now = chrono::Utc::now();

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        let data = match docs.get_mut(id) {
            Some(existing) => {
                stamp_updated(&mut patch, now);
                existing.extend(patch);
                existing.clone()
            }
            None => {
                stamp_created(&mut patch, now);
                docs.insert(id.to_string(), patch.clone());
                patch
            }
        };
        Ok(Document {
            id: id.to_string(),
            data,
        })
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        mut patch: DocumentData,
    ) -> DbResult<Option<Document>> {
        self.check_available(collection).await?;
        patch.remove("id");
        stamp_updated(&mut patch, chrono::Utc::now());

        let mut collections = self.collections.write().await;
        let Some(existing) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(None);
        };
        existing.extend(patch);
        Ok(Some(Document {
            id: id.to_string(),
            data: existing.clone(),
        }))
    }

    async fn delete(&self, collection: &str, id: &str) -> DbResult<bool> {
        self.check_available(collection).await?;
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| docs.shift_remove(id))
            .is_some())
    }

    async fn health_check(&self) -> DbResult<()> {
        Ok(())
    }
}
