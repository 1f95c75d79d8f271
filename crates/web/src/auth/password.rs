//! Password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use tokio::task::spawn_blocking;

use crate::error::WebError;

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, WebError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| WebError::internal(format!("hash password: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
///
/// The parameters embedded in the hash are used, not the current defaults.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, WebError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| WebError::internal(format!("parse password hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Hashes on the blocking pool so Argon2 never stalls a runtime worker.
pub async fn hash_password_off_thread(password: &str) -> Result<String, WebError> {
    let password = password.to_owned();
    spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| WebError::internal(format!("hash password task: {e}")))?
}

/// Verifies on the blocking pool.
pub async fn verify_password_off_thread(password: &str, hash: &str) -> Result<bool, WebError> {
    let (password, hash) = (password.to_owned(), hash.to_owned());
    spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| WebError::internal(format!("verify password task: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_round() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash).unwrap());
        assert!(!verify_password("secret2", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_off_thread_hash_verifies() {
        let hash = hash_password_off_thread("secret1").await.unwrap();
        assert!(verify_password_off_thread("secret1", &hash).await.unwrap());
        assert!(!verify_password_off_thread("secret2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_off_thread_malformed_hash_is_internal_error() {
        let err = verify_password_off_thread("x", "not-a-hash").await.unwrap_err();
        assert!(matches!(err, WebError::InternalServerError(_)));
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let err = verify_password("x", "not-a-hash").unwrap_err();
        assert!(matches!(err, WebError::InternalServerError(_)));
    }
}
