//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AdminLogService, DriverService, EarningService, RideService, UserService,
};
use crate::domain::repositories::{
    AdminLogRepository, DriverRepository, EarningRepository, RideRepository, UserRepository,
};
use crate::domain::security::PasswordHasher;
use crate::infrastructure::persistence::{
    PgAdminLogRepository, PgDriverRepository, PgEarningRepository, PgRideRepository,
    PgUserRepository,
};
use crate::infrastructure::security::Argon2PasswordHasher;

pub type DynUserService = UserService<dyn UserRepository, dyn PasswordHasher>;
pub type DynDriverService = DriverService<dyn DriverRepository, dyn UserRepository>;
pub type DynRideService = RideService<dyn RideRepository, dyn UserRepository, dyn DriverRepository>;
pub type DynEarningService = EarningService<dyn EarningRepository, dyn DriverRepository>;
pub type DynAdminLogService = AdminLogService<dyn AdminLogRepository>;

/// The storage backends behind the services.
///
/// Production wiring comes from [`Repositories::postgres`]; tests can supply
/// any other implementation of the traits.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub rides: Arc<dyn RideRepository>,
    pub earnings: Arc<dyn EarningRepository>,
    pub admin_logs: Arc<dyn AdminLogRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl Repositories {
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            drivers: Arc::new(PgDriverRepository::new(pool.clone())),
            rides: Arc::new(PgRideRepository::new(pool.clone())),
            earnings: Arc::new(PgEarningRepository::new(pool.clone())),
            admin_logs: Arc::new(PgAdminLogRepository::new(pool)),
            hasher: Arc::new(Argon2PasswordHasher::new()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<DynUserService>,
    pub driver_service: Arc<DynDriverService>,
    pub ride_service: Arc<DynRideService>,
    pub earning_service: Arc<DynEarningService>,
    pub admin_log_service: Arc<DynAdminLogService>,
}

impl AppState {
    /// State backed by PostgreSQL repositories and the Argon2 hasher.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::from_repositories(Repositories::postgres(pool))
    }

    pub fn from_repositories(repos: Repositories) -> Self {
        Self {
            user_service: Arc::new(UserService::new(repos.users.clone(), repos.hasher)),
            driver_service: Arc::new(DriverService::new(
                repos.drivers.clone(),
                repos.users.clone(),
            )),
            ride_service: Arc::new(RideService::new(
                repos.rides,
                repos.users,
                repos.drivers.clone(),
            )),
            earning_service: Arc::new(EarningService::new(repos.earnings, repos.drivers)),
            admin_log_service: Arc::new(AdminLogService::new(repos.admin_logs)),
        }
    }
}
