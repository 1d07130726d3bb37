//! User account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role a user account plays on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Passenger,
    Driver,
    Admin,
}

/// A registered account.
///
/// `password_hash` holds the one-way hash produced by
/// [`crate::domain::security::PasswordHasher`]; the plaintext is never stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub profile_picture_url: Option<String>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Last", as shown next to drivers and earnings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Registration input as received from a client. The password is still plaintext.
#[derive(Debug, Clone)]
pub struct UserRegistration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub profile_picture_url: Option<String>,
    pub user_type: UserType,
}

/// Row to insert. Built by the user service after hashing the password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub profile_picture_url: Option<String>,
    pub user_type: UserType,
}

/// Partial update for a user. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    /// Plaintext; hashed by the service, never applied directly.
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture_url: Option<String>,
    pub user_type: Option<UserType>,
}

impl UserPatch {
    /// Overwrites the fields present in the patch.
    ///
    /// The password is skipped: the caller hashes it and sets
    /// `password_hash` itself.
    pub fn apply_to(self, user: &mut User) {
        let UserPatch {
            email,
            password: _,
            first_name,
            last_name,
            phone_number,
            profile_picture_url,
            user_type,
        } = self;

        if let Some(v) = email {
            user.email = v;
        }
        if let Some(v) = first_name {
            user.first_name = v;
        }
        if let Some(v) = last_name {
            user.last_name = v;
        }
        if let Some(v) = phone_number {
            user.phone_number = Some(v);
        }
        if let Some(v) = profile_picture_url {
            user.profile_picture_url = Some(v);
        }
        if let Some(v) = user_type {
            user.user_type = v;
        }
    }
}
