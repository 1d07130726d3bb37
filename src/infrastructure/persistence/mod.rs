//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through private `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgDriverRepository`] - Driver profiles joined with their owning user
//! - [`PgRideRepository`] - Rides and their filtered views
//! - [`PgEarningRepository`] - Earnings ledger with driver names
//! - [`PgAdminLogRepository`] - Admin audit trail

pub mod pg_admin_log_repository;
pub mod pg_driver_repository;
pub mod pg_earning_repository;
pub mod pg_ride_repository;
pub mod pg_user_repository;

pub use pg_admin_log_repository::PgAdminLogRepository;
pub use pg_driver_repository::PgDriverRepository;
pub use pg_earning_repository::PgEarningRepository;
pub use pg_ride_repository::PgRideRepository;
pub use pg_user_repository::PgUserRepository;
