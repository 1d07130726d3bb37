//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services are generic over repository traits
//! so tests can substitute `mockall` mocks, and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - Accounts and password hashing
//! - [`services::driver_service::DriverService`] - Driver registration and verification
//! - [`services::ride_service::RideService`] - Ride records and filtered views
//! - [`services::earning_service::EarningService`] - Driver earnings ledger
//! - [`services::admin_log_service::AdminLogService`] - Admin audit trail

pub mod services;
