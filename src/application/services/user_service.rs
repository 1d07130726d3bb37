//! User account management service.

use crate::domain::entities::{NewUser, User, UserPatch, UserRegistration};
use crate::domain::repositories::UserRepository;
use crate::domain::security::PasswordHasher;
use crate::error::AppError;
use std::sync::Arc;

/// Service for user accounts.
///
/// Enforces email and phone uniqueness ahead of the database constraints and
/// makes sure only password hashes reach the repository.
pub struct UserService<R: UserRepository + ?Sized, H: PasswordHasher + ?Sized> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository + ?Sized, H: PasswordHasher + ?Sized> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email, or the phone number when
    /// given, is already registered.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn create_user(&self, registration: UserRegistration) -> Result<User, AppError> {
        if self.repository.exists_by_email(&registration.email).await? {
            tracing::warn!(email = %registration.email, "duplicate email on user create");
            return Err(AppError::duplicate("User", "email", &registration.email));
        }

        if let Some(phone) = registration.phone_number.as_deref()
            && self.repository.exists_by_phone(phone).await?
        {
            tracing::warn!(phone, "duplicate phone number on user create");
            return Err(AppError::duplicate("User", "phone number", phone));
        }

        let password_hash = self.hasher.hash(&registration.password)?;

        let user = self
            .repository
            .create(NewUser {
                email: registration.email,
                password_hash,
                first_name: registration.first_name,
                last_name: registration.last_name,
                phone_number: registration.phone_number,
                profile_picture_url: registration.profile_picture_url,
                user_type: registration.user_type,
            })
            .await?;

        tracing::info!(user_id = user.id, user_type = ?user.user_type, "user created");
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("User", id))
    }

    /// Applies a partial update.
    ///
    /// Uniqueness is re-checked only for an email or phone number that
    /// actually changes. A new password is hashed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Conflict`] if the new email or phone number is taken.
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let mut user = self.get_user(id).await?;

        if let Some(email) = patch.email.as_deref()
            && email != user.email
            && self.repository.exists_by_email(email).await?
        {
            return Err(AppError::duplicate("User", "email", email));
        }

        if let Some(phone) = patch.phone_number.as_deref()
            && user.phone_number.as_deref() != Some(phone)
            && self.repository.exists_by_phone(phone).await?
        {
            return Err(AppError::duplicate("User", "phone number", phone));
        }

        let new_hash = match patch.password.as_deref() {
            Some(password) => Some(self.hasher.hash(password)?),
            None => None,
        };

        patch.apply_to(&mut user);
        if let Some(hash) = new_hash {
            user.password_hash = hash;
        }

        let updated = self.repository.update(&user).await?;
        tracing::info!(user_id = id, "user updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist; no delete is issued.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.exists(id).await? {
            return Err(AppError::entity_not_found("User", id));
        }

        self.repository.delete(id).await?;
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
