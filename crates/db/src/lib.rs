//! Document-store access for IndieReel.
//!
//! [`store::DocumentStore`] abstracts the hosted document database. The
//! [`reader::EntityReader`] issues one coarse query per list page and hands
//! the working set to the core refiner; the repositories add write-time
//! denormalization and ownership checks on top.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod names;
pub mod reader;
pub mod repositories;
pub mod store;

pub use error::{DbError, DbResult};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
