//! The credential store contract consumed by the auth flows.

use async_trait::async_trait;
use keygate_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Failures surfaced by a credential store.
///
/// `DuplicateEmail` is a distinguishable signal, not a generic fault: the
/// register flow maps it to the "Email already exists" outcome instead of a
/// 500. The store's atomic uniqueness check is the authoritative guard
/// against concurrent registrations with the same email -- any pre-check
/// lookup is advisory only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already exists")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Keyed repository of user identity records.
///
/// Implementations must enforce email uniqueness atomically in [`create`];
/// callers never hold an in-process lock across store calls.
///
/// [`create`]: CredentialStore::create
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by email (case-sensitive, as stored).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by internal id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;

    /// Insert a new user. Fails with [`StoreError::DuplicateEmail`] when the
    /// email is already taken.
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError>;

    /// Record the last issued token on the user row (audit copy).
    async fn update_token(&self, id: DbId, token: &str) -> Result<(), StoreError>;
}
