//! Password hashing contract.

use crate::error::AppError;

/// One-way password hashing.
///
/// Implemented by [`crate::infrastructure::security::Argon2PasswordHasher`].
/// Hashes are self-describing PHC strings, so `verify` needs no extra state.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes `password` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the hasher fails.
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Checks `password` against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if `hash` is not a valid PHC string.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}
