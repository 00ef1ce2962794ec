//! Signed identity tokens: issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying the user id as the subject claim.
//! Verification is stateless -- signature plus validity window only; no
//! server-side revocation set is consulted. The signing secret is injected
//! at construction and fixed for the process lifetime; rotating it
//! invalidates every outstanding token.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use keygate_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id. A weak reference,
    /// resolved against the credential store per use.
    pub sub: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Optional not-before time; the token is rejected until it is reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
}

/// Verification failures, kept three-way distinguishable.
///
/// Callers must not collapse these: an expired token is a 400-class signal
/// that a refresh is worth attempting, while a malformed or not-yet-valid
/// token is a 401.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signature valid, clock past `exp`.
    #[error("Token has expired")]
    Expired,
    /// The token carries a future-dated `nbf` claim not yet reached.
    #[error("Token is not yet valid")]
    NotYetValid,
    /// Signature invalid or structurally unparseable.
    #[error("Token is malformed")]
    Malformed,
}

/// Configuration for token issuance and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in seconds (default: 3600).
    pub token_expiry_secs: i64,
}

/// Default token lifetime: one hour.
const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 3600;

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `JWT_SECRET`            | **yes**  | --      |
    /// | `JWT_TOKEN_EXPIRY_SECS` | no       | `3600`  |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let token_expiry_secs: i64 = std::env::var("JWT_TOKEN_EXPIRY_SECS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_SECS.to_string())
            .parse()
            .expect("JWT_TOKEN_EXPIRY_SECS must be a valid i64");

        Self {
            secret,
            token_expiry_secs,
        }
    }
}

/// Issues and verifies HS256 identity tokens.
///
/// One process-wide secret signs every token class; the refresh credential
/// and access tokens differ only in how callers use them.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_expiry_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            token_expiry_secs: config.token_expiry_secs,
        }
    }

    /// Sign a token for the given user id.
    ///
    /// `iat` is part of the signed claims, so calls for the same user
    /// produce distinct tokens as the clock advances.
    pub fn issue(&self, user_id: DbId) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.token_expiry_secs,
            nbf: None,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Validate signature and validity window, returning the embedded [`Claims`].
    ///
    /// `exp` must be strictly in the future (zero leeway); a future `nbf`
    /// is rejected as [`TokenError::NotYetValid`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => Err(match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                _ => TokenError::Malformed,
            }),
        }
    }
}
