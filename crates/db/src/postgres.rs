//! PostgreSQL-backed credential store.

use async_trait::async_trait;
use keygate_core::types::DbId;

use crate::models::user::{CreateUser, User};
use crate::repositories::UserRepo;
use crate::store::{CredentialStore, StoreError};
use crate::DbPool;

/// [`CredentialStore`] backed by the `users` table.
///
/// Email uniqueness is delegated to the table's unique constraint: a
/// duplicate insert surfaces as SQLSTATE 23505 and is classified as
/// [`StoreError::DuplicateEmail`], never as a generic database fault.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: DbPool,
}

impl PgCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(classify_unique_violation)
    }

    async fn update_token(&self, id: DbId, token: &str) -> Result<(), StoreError> {
        let updated = UserRepo::update_token(&self.pool, id, token).await?;
        if !updated {
            tracing::warn!(user_id = id, "token update matched no user row");
        }
        Ok(())
    }
}

/// Classify an insert error: PostgreSQL unique-constraint violations
/// (SQLSTATE 23505) become [`StoreError::DuplicateEmail`], everything else
/// passes through as a database fault.
fn classify_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(err)
}
