//! In-memory credential store used by tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use keygate_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::user::{CreateUser, User};
use crate::store::{CredentialStore, StoreError};

/// Credential store holding all rows in process memory.
///
/// `create` checks and inserts under a single write guard, so the email
/// uniqueness invariant holds under concurrent registration exactly as the
/// PostgreSQL unique constraint does.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Users keyed by email (the unique key).
    users: HashMap<String, User>,
    /// Last assigned id; ids are sequential starting at 1.
    last_id: DbId,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(email).cloned())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.id == id).cloned())
    }

    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(&input.email) {
            return Err(StoreError::DuplicateEmail);
        }

        inner.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.last_id,
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            avatar_url: String::new(),
            token: String::new(),
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn update_token(&self, id: DbId, token: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.values_mut().find(|u| u.id == id) {
            user.token = token.to_string();
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;

    fn input(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            password_hash: "$2b$10$fake-hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_empty_defaults() {
        let store = MemoryCredentialStore::new();

        let first = store.create(&input("a@x.com")).await.unwrap();
        let second = store.create(&input("b@x.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.avatar_url.is_empty());
        assert!(first.token.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_distinguishable_conflict() {
        let store = MemoryCredentialStore::new();
        store.create(&input("a@x.com")).await.unwrap();

        let result = store.create(&input("a@x.com")).await;
        assert_matches!(result, Err(StoreError::DuplicateEmail));
    }

    /// Concurrent creates with the same email: exactly one wins.
    #[tokio::test]
    async fn concurrent_duplicate_create_admits_exactly_one() {
        let store = Arc::new(MemoryCredentialStore::new());

        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(&input("race@x.com")).await })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(&input("race@x.com")).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one concurrent create must win");
    }

    #[tokio::test]
    async fn update_token_persists_on_the_row() {
        let store = MemoryCredentialStore::new();
        let user = store.create(&input("a@x.com")).await.unwrap();

        store.update_token(user.id, "signed-token").await.unwrap();

        let reloaded = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.token, "signed-token");
    }

    #[tokio::test]
    async fn lookups_by_missing_keys_return_none() {
        let store = MemoryCredentialStore::new();
        assert!(store.find_by_email("ghost@x.com").await.unwrap().is_none());
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }
}
