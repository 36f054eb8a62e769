//! Password hashing using argon2
//!
//! New hashes are Argon2id with a random salt and the library's default
//! cost parameters. Hashes in bcrypt format (`$2a$`, `$2b$`, `$2y$`), as
//! written by the previous deployment, are still accepted on verification.
//!
//! # Performance Considerations
//!
//! Both algorithms are intentionally CPU-intensive. Async callers should use
//! the `_async` variants, which run on the blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    ///
    /// Fails only if the salt cannot be generated or hashing itself fails.
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Any mismatch, including a malformed stored hash, yields `false`.
    /// Comparison is delegated to the hashing libraries, which compare
    /// digests in constant time.
    pub fn verify(password: &str, hash: &str) -> bool {
        if Self::is_bcrypt(hash) {
            return bcrypt::verify(password, hash).unwrap_or(false);
        }

        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }

    fn is_bcrypt(hash: &str) -> bool {
        ["$2a$", "$2b$", "$2y$"]
            .iter()
            .any(|prefix| hash.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hash = PasswordService::hash(password).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordService::verify(password, &hash));
        assert!(!PasswordService::verify("wrong_password", &hash));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password";
        let hash1 = PasswordService::hash(password).unwrap();
        let hash2 = PasswordService::hash(password).unwrap();

        // Random salt
        assert_ne!(hash1, hash2);

        assert!(PasswordService::verify(password, &hash1));
        assert!(PasswordService::verify(password, &hash2));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!PasswordService::verify("p", ""));
        assert!(!PasswordService::verify("p", "not-a-hash"));
        assert!(!PasswordService::verify("p", "$argon2id$garbage"));
        assert!(!PasswordService::verify("p", "$2b$12$short"));
    }

    #[test]
    fn test_bcrypt_hashes_still_verify() {
        let legacy = bcrypt::hash("legacy-password", 4).unwrap();

        assert!(PasswordService::verify("legacy-password", &legacy));
        assert!(!PasswordService::verify("other", &legacy));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "p".to_string();
        let hash = PasswordService::hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password, hash.clone()).await.unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hash).await.unwrap());
    }
}
