//! Password hashing for stored credentials.
//!
//! Wraps argon2 to turn a plaintext password into a salted PHC string at
//! sign-up time and to verify a presented password against the stored hash
//! at sign-in. A fresh random salt is generated per hash; salts are never
//! reused across users.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::user::Password;

/// Stored password hash in PHC string format.
///
/// Opaque to the rest of the domain; only [`hash_password`] produces fresh
/// values and only [`verify_password`] interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a hash string loaded from storage.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The PHC string as persisted.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Failures raised while hashing or verifying passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hashing primitive rejected its inputs.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    /// A stored hash could not be parsed as a PHC string.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash { message: String },
}

/// Hash a plaintext password with a freshly generated salt.
pub fn hash_password(password: &Password) -> Result<HashedPassword, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(|err| PasswordHashError::Hash {
            message: err.to_string(),
        })?;
    Ok(HashedPassword(hash.to_string()))
}

/// Verify a presented plaintext password against a stored hash.
///
/// Returns `Ok(false)` on a mismatch; errors are reserved for hashes that
/// cannot be interpreted at all.
pub fn verify_password(
    password: &str,
    stored: &HashedPassword,
) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored.as_str()).map_err(|err| {
        PasswordHashError::MalformedHash {
            message: err.to_string(),
        }
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::MalformedHash {
            message: err.to_string(),
        }),
    }
}
