//! Orchestration of the register, refresh, and identify flows.
//!
//! Each flow validates its input, delegates to the credential store, the
//! password hasher, and the token issuer, and returns either a typed
//! payload or exactly one [`CoreError`] kind. No error escapes a flow
//! unclassified.

use std::sync::Arc;

use keygate_core::error::CoreError;
use keygate_core::types::DbId;
use keygate_db::models::user::CreateUser;
use keygate_db::store::{CredentialStore, StoreError};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{TokenError, TokenIssuer};
use crate::auth::password::hash_password;

// ---------------------------------------------------------------------------
// Flow inputs and payloads
// ---------------------------------------------------------------------------

/// Registration fields as received from the boundary layer.
///
/// Fields default to empty when absent, so a missing field takes the same
/// validation path as an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "confirmPassword")]
    pub confirm_password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Payload of a successful registration.
#[derive(Debug, Serialize)]
pub struct IssuedToken {
    pub token: String,
}

/// Payload of a successful refresh.
#[derive(Debug, Serialize)]
pub struct RefreshedToken {
    pub access_token: String,
}

/// Public projection of a user identity. Never carries the password hash
/// or the stored token.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub user_id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Orchestrates the credential flows over the store and token issuer.
///
/// Holds no mutable state; the signing secret inside the issuer is fixed at
/// startup, so one instance is shared across all request tasks. Duplicate-
/// email races are defended by the store's atomic uniqueness check, never
/// by an in-process lock.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    /// The token issuer, for boundary layers that verify bearer tokens.
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Register a new account and issue its first token.
    ///
    /// The email pre-check is advisory; a concurrent duplicate still fails
    /// inside [`CredentialStore::create`] and maps to the same conflict
    /// outcome.
    pub async fn register(&self, input: RegisterInput) -> Result<IssuedToken, CoreError> {
        if input.email.is_empty() {
            return Err(CoreError::Validation("Email is required".into()));
        }

        let existing = self
            .store
            .find_by_email(&input.email)
            .await
            .map_err(store_fault)?;
        if existing.is_some() {
            return Err(CoreError::Conflict("Email already exists".into()));
        }

        if input.password != input.confirm_password {
            return Err(CoreError::Validation("Passwords do not match".into()));
        }

        // The hasher's contract requires a non-empty plaintext.
        if input.password.is_empty() {
            return Err(CoreError::Validation("Password is required".into()));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;

        let create = CreateUser {
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
        };
        let user = self.store.create(&create).await.map_err(|e| match e {
            StoreError::DuplicateEmail => CoreError::Conflict("Email already exists".into()),
            other => store_fault(other),
        })?;

        let token = self
            .tokens
            .issue(user.id)
            .map_err(|e| CoreError::Internal(format!("Token signing error: {e}")))?;

        // Audit copy of the issued token. A failure here surfaces to the
        // caller as store instability but does not roll back the account.
        self.store
            .update_token(user.id, &token)
            .await
            .map_err(store_fault)?;

        tracing::debug!(user_id = user.id, "registered new user");
        Ok(IssuedToken { token })
    }

    /// Exchange a refresh credential for a fresh access token.
    pub async fn refresh(&self, credential: Option<&str>) -> Result<RefreshedToken, CoreError> {
        let credential =
            credential.ok_or_else(|| CoreError::Validation("Refresh token not found".into()))?;

        let claims = self.tokens.verify(credential).map_err(token_fault)?;

        let user = self
            .store
            .find_by_id(claims.sub)
            .await
            .map_err(store_fault)?
            .ok_or_else(|| CoreError::NotFound("User not found".into()))?;

        let access_token = self
            .tokens
            .issue(user.id)
            .map_err(|e| CoreError::Internal(format!("Token signing error: {e}")))?;

        Ok(RefreshedToken { access_token })
    }

    /// Project the public identity of an already-authenticated user id.
    ///
    /// The id arrives from the upstream authentication gate; an id that no
    /// longer resolves to a user is unauthorized, not merely missing.
    pub async fn identify(&self, user_id: DbId) -> Result<UserProfile, CoreError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await
            .map_err(store_fault)?
            .ok_or_else(|| CoreError::Unauthorized("Unauthorized".into()))?;

        Ok(UserProfile {
            user_id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        })
    }
}

/// Map a store fault into the taxonomy. Duplicate email never takes this
/// path; each flow classifies it where it can name the conflict.
fn store_fault(err: StoreError) -> CoreError {
    CoreError::Internal(format!("Store error: {err}"))
}

/// Map a verification failure into the taxonomy, keeping the three kinds
/// apart: expired is a 400 (a refresh is worth attempting), malformed and
/// not-yet-valid are 401s with distinct messages.
pub(crate) fn token_fault(err: TokenError) -> CoreError {
    match err {
        TokenError::Expired => CoreError::ExpiredCredential(err.to_string()),
        TokenError::NotYetValid | TokenError::Malformed => {
            CoreError::Unauthorized(err.to_string())
        }
    }
}
