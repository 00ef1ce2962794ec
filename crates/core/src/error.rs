//! The error taxonomy governing how credential failures are classified.
//!
//! Every fallible flow returns exactly one of these kinds; the HTTP layer
//! translates each kind into a status code and a user-safe message. The
//! messages carried here are display-safe -- internal detail belongs in the
//! `Internal` payload, which is logged and never rendered to clients.

/// Domain-level error kinds for the credential lifecycle.
///
/// `ExpiredCredential` is deliberately separate from `Unauthorized`: an
/// expired token parsed and verified correctly, so clients can respond by
/// refreshing instead of forcing a full re-login.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing or mismatched input, locally correctable by the caller.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness invariant was violated (duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A credential parsed and verified correctly but is past its validity window.
    #[error("Credential expired: {0}")]
    ExpiredCredential(String),

    /// A referenced identity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Signature invalid, token not yet valid, or unknown identity.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Store failure, hashing failure, or any unclassified fault.
    #[error("Internal error: {0}")]
    Internal(String),
}
