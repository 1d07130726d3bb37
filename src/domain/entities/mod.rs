//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Each resource has up to three shapes:
//!
//! - the persisted entity (`User`, `Driver`, `Ride`, `Earning`, `AdminLog`)
//! - a `New*` struct for inserts
//! - a `*Patch` struct for partial updates, merged with `apply_to`
//!
//! Closed vocabularies (user type, vehicle type, statuses, payment method)
//! are enums that map to PostgreSQL `ENUM` types and serialize as
//! `SCREAMING_SNAKE_CASE` strings.

pub mod admin_log;
pub mod driver;
pub mod earning;
pub mod payment;
pub mod ride;
pub mod user;

pub use admin_log::{AdminLog, NewAdminLog};
pub use driver::{
    Driver, DriverOwner, DriverPatch, DriverRegistration, DriverStatus, NewDriver, VehicleType,
};
pub use earning::{Earning, MIN_EARNING_AMOUNT, NewEarning};
pub use payment::{PaymentMethod, PaymentStatus};
pub use ride::{COMPLAINT_KEYWORD, COMPLAINT_RATING_THRESHOLD, NewRide, Ride, RidePatch, RideStatus};
pub use user::{NewUser, User, UserPatch, UserRegistration, UserType};
