//! Domain layer containing business entities and contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`security`] - Password hashing contract
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by
//! [`crate::infrastructure::persistence`]; business rules live in
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
pub mod security;
