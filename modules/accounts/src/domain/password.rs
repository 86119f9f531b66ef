//! Argon2id password hashing.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$...`). The cost
//! parameters are fixed; verification reads them back from the stored digest.
//! Both operations run on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use secrecy::{ExposeSecret as _, SecretString};

use super::error::DomainError;

const MEMORY_KIB: u32 = 19_456;
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// # Errors
    /// Returns `DomainError::Internal` if hashing fails or the blocking task panics.
    pub async fn hash(&self, plaintext: SecretString) -> Result<String, DomainError> {
        tokio::task::spawn_blocking(move || hash_blocking(plaintext.expose_secret()))
            .await
            .map_err(DomainError::internal)?
    }

    /// `Ok(false)` on mismatch and on a malformed stored digest.
    ///
    /// # Errors
    /// Returns `DomainError::Internal` if the blocking task panics.
    pub async fn verify(
        &self,
        plaintext: SecretString,
        digest: String,
    ) -> Result<bool, DomainError> {
        tokio::task::spawn_blocking(move || verify_blocking(plaintext.expose_secret(), &digest))
            .await
            .map_err(DomainError::internal)
    }
}

fn argon2() -> Result<Argon2<'static>, DomainError> {
    let params =
        Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, None).map_err(DomainError::internal)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn hash_blocking(plaintext: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()?
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| DomainError::internal(format!("failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

fn verify_blocking(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        tracing::warn!("stored password digest is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash(secret("correct horse")).await.unwrap();

        assert!(digest.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(!digest.contains("correct horse"));
        assert!(hasher.verify(secret("correct horse"), digest.clone()).await.unwrap());
        assert!(!hasher.verify(secret("wrong"), digest).await.unwrap());
    }

    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash(secret("same")).await.unwrap();
        let b = hasher.hash(secret("same")).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn malformed_digest_does_not_verify() {
        let hasher = PasswordHasher::new();
        let ok = hasher
            .verify(secret("pw"), "$2b$10$legacy-bcrypt".to_owned())
            .await
            .unwrap();
        assert!(!ok);
    }
}
