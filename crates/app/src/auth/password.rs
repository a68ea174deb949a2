//! Password hashing.
//!
//! bcrypt work runs on the blocking pool.

use tokio::task::spawn_blocking;
use zeroize::Zeroizing;

use crate::auth::errors::AuthServiceError;

/// Hash a plaintext password with the default bcrypt cost.
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics.
pub async fn hash_password(password: Zeroizing<String>) -> Result<String, AuthServiceError> {
    let hashed = spawn_blocking(move || bcrypt::hash(password.as_bytes(), bcrypt::DEFAULT_COST))
        .await??;

    Ok(hashed)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the stored hash is malformed or the blocking task panics.
pub async fn verify_password(
    password: Zeroizing<String>,
    hash: String,
) -> Result<bool, AuthServiceError> {
    let matches = spawn_blocking(move || bcrypt::verify(password.as_bytes(), &hash)).await??;

    Ok(matches)
}
