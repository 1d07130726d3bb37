//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource. Handlers only translate
//! between DTOs and service calls; all rules live in the services.

pub mod admin_logs;
pub mod drivers;
pub mod earnings;
pub mod health;
pub mod rides;
pub mod users;

pub use admin_logs::{create_admin_log_handler, get_admin_log_handler, list_admin_logs_handler};
pub use drivers::{
    delete_driver_handler, get_driver_handler, list_drivers_handler, register_driver_handler,
    reject_driver_handler, update_driver_handler, verify_driver_handler,
};
pub use earnings::{
    create_earning_handler, earnings_by_date_range_handler, earnings_by_driver_handler,
    earnings_by_status_handler, get_earning_handler, list_earnings_handler,
};
pub use health::health_handler;
pub use rides::{
    cancelled_rides_handler, complaint_rides_handler, create_ride_handler, delete_ride_handler,
    driver_history_handler, feedback_rides_handler, get_ride_handler, list_rides_handler,
    passenger_history_handler, rides_by_driver_handler, rides_by_passenger_handler,
    update_ride_handler,
};
pub use users::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
