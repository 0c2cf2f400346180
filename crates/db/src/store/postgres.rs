//! Postgres-backed document store over the `documents` table.
//!
//! Each document is one JSONB row keyed by `(collection, id)`. Equality
//! predicates become a single `data @> $2` containment check so list queries
//! stay index-backed; merges use the JSONB `||` operator.

use async_trait::async_trait;
use indiereel_core::types::new_doc_id;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

use super::{stamp_created, stamp_updated, Document, DocumentData, DocumentStore, Predicate};
use crate::error::DbResult;
use crate::DbPool;

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    data: Json<DocumentData>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            data: row.data.0,
        }
    }
}

/// Document store on a Postgres pool.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Fold equality predicates into one containment document.
fn containment(predicates: &[Predicate]) -> Value {
    Value::Object(
        predicates
            .iter()
            .map(|p| (p.field.clone(), p.value.clone()))
            .collect(),
    )
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn query(&self, collection: &str, predicates: &[Predicate]) -> DbResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents \
             WHERE collection = $1 AND data @> $2 \
             ORDER BY seq",
        )
        .bind(collection)
        .bind(Json(containment(predicates)))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn get(&self, collection: &str, id: &str) -> DbResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    async fn insert(&self, collection: &str, mut data: DocumentData) -> DbResult<Document> {
        data.remove("id");
        stamp_created(&mut data, chrono::Utc::now());

        let row = sqlx::query_as::<_, DocumentRow>(
            "INSERT INTO documents (collection, id, data) \
             VALUES ($1, $2, $3) \
             RETURNING id, data",
        )
        .bind(collection)
        .bind(new_doc_id())
        .bind(Json(&data))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn upsert(&self, collection: &str, id: &str, mut patch: DocumentData) -> DbResult<Document> {
        patch.remove("id");
        let now = chrono::Utc::now();
        let mut created = patch.clone();
        stamp_created(&mut created, now);
        stamp_updated(&mut patch, now);

        let row = sqlx::query_as::<_, DocumentRow>(
            "INSERT INTO documents (collection, id, data) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO UPDATE \
             SET data = documents.data || $4, updated_at = NOW() \
             RETURNING id, data",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(&created))
        .bind(Json(&patch))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        mut patch: DocumentData,
    ) -> DbResult<Option<Document>> {
        patch.remove("id");
        stamp_updated(&mut patch, chrono::Utc::now());

        let row = sqlx::query_as::<_, DocumentRow>(
            "UPDATE documents SET data = data || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2 \
             RETURNING id, data",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(&patch))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    async fn delete(&self, collection: &str, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> DbResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
