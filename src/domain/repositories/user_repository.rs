//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence contract for [`User`] records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or phone number is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Lists all users ordered by ID.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, AppError>;

    /// Writes every column of `user` back to its row and returns the stored state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row no longer exists.
    /// Returns [`AppError::Conflict`] on a unique constraint violation.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Deletes a user and, through cascading keys, its driver profile and rides.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
