//! Business logic services for the application layer.

pub mod admin_log_service;
pub mod driver_service;
pub mod earning_service;
pub mod ride_service;
pub mod user_service;

pub use admin_log_service::AdminLogService;
pub use driver_service::{DriverService, DriverStatusCounts};
pub use earning_service::EarningService;
pub use ride_service::RideService;
pub use user_service::UserService;
