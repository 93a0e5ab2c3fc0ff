//! One-way credential hashing (Argon2id, PHC string format).

use anyhow::{anyhow, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    // ---
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check `password` against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; only an unparsable stored hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    // ---
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| anyhow!("stored password hash is invalid: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
