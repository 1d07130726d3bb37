//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`security`] - Argon2 password hashing
//! - [`database`] - Connection pool setup and migrations

pub mod database;
pub mod persistence;
pub mod security;
