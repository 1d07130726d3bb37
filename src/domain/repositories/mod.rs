//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User accounts
//! - [`DriverRepository`] - Driver profiles and verification status
//! - [`RideRepository`] - Ride records and their filtered views
//! - [`EarningRepository`] - Driver earnings ledger
//! - [`AdminLogRepository`] - Admin audit trail
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod admin_log_repository;
pub mod driver_repository;
pub mod earning_repository;
pub mod ride_repository;
pub mod user_repository;

pub use admin_log_repository::AdminLogRepository;
pub use driver_repository::DriverRepository;
pub use earning_repository::EarningRepository;
pub use ride_repository::RideRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use admin_log_repository::MockAdminLogRepository;
#[cfg(test)]
pub use driver_repository::MockDriverRepository;
#[cfg(test)]
pub use earning_repository::MockEarningRepository;
#[cfg(test)]
pub use ride_repository::MockRideRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
