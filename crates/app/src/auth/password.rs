//! Password hashing.
//!
//! Argon2 is deliberately slow, so the async entry points run it on Tokio's
//! blocking pool.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tokio::task::{self, JoinError};
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("password task failed")]
    Task(#[source] JoinError),
}

/// Hash a password into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns an error if the hasher rejects its parameters or the blocking task
/// is cancelled.
pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    let password = Zeroizing::new(password.to_string());

    task::spawn_blocking(move || hash_password_blocking(&password))
        .await
        .map_err(PasswordError::Task)?
}

/// Check a password against a stored PHC hash.
///
/// A malformed stored hash is reported as a mismatch.
///
/// # Errors
///
/// Returns an error if the blocking task is cancelled.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let password = Zeroizing::new(password.to_string());
    let stored_hash = stored_hash.to_string();

    task::spawn_blocking(move || verify_password_blocking(&password, &stored_hash))
        .await
        .map_err(PasswordError::Task)
}

fn hash_password_blocking(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

fn verify_password_blocking(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
