//! Bcrypt password hashing and verification.
//!
//! Every hash uses a fixed cost of 10; bcrypt generates a random salt per
//! call and embeds it in the digest, so verification needs no separate salt
//! storage. Plaintext is never logged or returned.

use bcrypt::BcryptError;

/// Bcrypt work factor applied to every hash.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password with a per-call random salt.
///
/// Callers validate that the plaintext is non-empty before calling. A
/// hashing failure indicates a misconfigured environment and is fatal to
/// the calling operation, not a user error.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Verify a plaintext password against a stored bcrypt digest.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");

        // The digest must carry the bcrypt identifier and the fixed cost.
        assert!(hash.starts_with("$2b$10$"), "expected bcrypt cost-10 prefix");

        let verified = verify_password(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    /// The salt is per-call: two hashes of one plaintext differ, yet both verify.
    #[test]
    fn test_hashing_is_salted_per_call() {
        let password = "same-plaintext";
        let first = hash_password(password).expect("hashing should succeed");
        let second = hash_password(password).expect("hashing should succeed");

        assert_ne!(first, second, "two hashes of the same plaintext must differ");
        assert!(verify_password(password, &first).unwrap());
        assert!(verify_password(password, &second).unwrap());
    }
}
