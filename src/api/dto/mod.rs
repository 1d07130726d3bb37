//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization with camelCase
//! field names, and validator for input validation. Request DTOs convert
//! into domain inputs with `From`; response DTOs are built from entities.

pub mod admin_log;
pub mod driver;
pub mod earning;
pub mod health;
pub mod ride;
pub mod user;

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}
