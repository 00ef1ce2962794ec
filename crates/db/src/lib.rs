//! Persistence layer: the credential store contract and its implementations.
//!
//! - [`store`] -- the [`store::CredentialStore`] trait and [`store::StoreError`].
//! - [`postgres`] -- the production implementation over a `users` table.
//! - [`memory`] -- an in-process implementation for tests and local development.
//! - [`models`] / [`repositories`] -- row structs, DTOs, and sqlx queries.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
