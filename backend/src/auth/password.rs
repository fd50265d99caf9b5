//! Password hashing with Argon2id
//!
//! Hashing and verification are CPU-bound; the async variants move the
//! work onto tokio's blocking pool so request tasks keep running.

use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Check a password against a PHC-format hash (blocking)
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .context("Password hashing task failed")?
    }

    /// Verify on the blocking pool.
    ///
    /// With `hash == None` (unknown account) a throwaway hash is checked
    /// instead, so both failure paths take the same time. Always `false`.
    pub async fn verify_async(password: String, hash: Option<String>) -> Result<bool> {
        tokio::task::spawn_blocking(move || match hash {
            Some(hash) => Self::verify(&password, &hash),
            None => {
                let _ = Self::verify(&password, dummy_hash()?);
                Ok(false)
            }
        })
        .await
        .context("Password verification task failed")?
    }
}

fn dummy_hash() -> Result<&'static str> {
    static DUMMY: OnceLock<String> = OnceLock::new();
    if let Some(hash) = DUMMY.get() {
        return Ok(hash);
    }
    let hash = PasswordService::hash("dummy-password-for-timing")?;
    Ok(DUMMY.get_or_init(|| hash))
}
