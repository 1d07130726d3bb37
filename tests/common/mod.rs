#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use ride_admin::api::handlers::health_handler;
use ride_admin::api::routes::api_routes;
use ride_admin::domain::entities::{
    AdminLog, COMPLAINT_KEYWORD, COMPLAINT_RATING_THRESHOLD, Driver, DriverOwner, DriverStatus,
    Earning, NewAdminLog, NewDriver, NewEarning, NewRide, NewUser, PaymentStatus, Ride,
    RideStatus, User,
};
use ride_admin::domain::repositories::{
    AdminLogRepository, DriverRepository, EarningRepository, RideRepository, UserRepository,
};
use ride_admin::domain::security::PasswordHasher;
use ride_admin::error::AppError;
use ride_admin::state::{AppState, Repositories};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Every table of the schema held in memory, with the same cascade and
/// join behavior as PostgreSQL for what the handlers can observe.
#[derive(Default)]
pub struct InMemoryDb {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    drivers: Vec<Driver>,
    rides: Vec<Ride>,
    earnings: Vec<Earning>,
    logs: Vec<AdminLog>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn owner(&self, user_id: i64) -> Result<DriverOwner, AppError> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| DriverOwner {
                user_id: u.id,
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
                email: u.email.clone(),
            })
            .ok_or_else(|| AppError::entity_not_found("User", user_id))
    }

    /// Drivers are stored with the owner snapshot refreshed on every read,
    /// like the `JOIN users` in the SQL repository.
    fn hydrate_driver(&self, driver: &Driver) -> Driver {
        let mut driver = driver.clone();
        if let Ok(owner) = self.owner(driver.owner.user_id) {
            driver.owner = owner;
        }
        driver
    }

    fn hydrate_earning(&self, earning: &Earning) -> Earning {
        let mut earning = earning.clone();
        if let Some(driver) = self.drivers.iter().find(|d| d.id == earning.driver_id)
            && let Ok(owner) = self.owner(driver.owner.user_id)
        {
            earning.driver_name = owner.full_name();
        }
        earning
    }

    fn delete_driver_cascade(&mut self, driver_id: i64) {
        self.drivers.retain(|d| d.id != driver_id);
        self.rides.retain(|r| r.driver_id != driver_id);
        self.earnings.retain(|e| e.driver_id != driver_id);
    }
}

impl InMemoryDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every count query fail, as if the database went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }

    pub fn driver_status(&self, id: i64) -> Option<DriverStatus> {
        self.tables()
            .drivers
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.verification_status)
    }
}

#[async_trait]
impl UserRepository for InMemoryDb {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::duplicate("User", "email", &new_user.email));
        }
        let now = Utc::now();
        let user = User {
            id: t.next_id(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            phone_number: new_user.phone_number,
            profile_picture_url: new_user.profile_picture_url,
            user_type: new_user.user_type,
            created_at: now,
            updated_at: now,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables().users.clone())
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables().users.iter().any(|u| u.id == id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.tables().users.iter().any(|u| u.email == email))
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, AppError> {
        Ok(self
            .tables()
            .users
            .iter()
            .any(|u| u.phone_number.as_deref() == Some(phone_number)))
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut t = self.tables();
        let slot = t
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::entity_not_found("User", user.id))?;
        *slot = User {
            updated_at: Utc::now(),
            ..user.clone()
        };
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables();
        if !t.users.iter().any(|u| u.id == id) {
            return Err(AppError::entity_not_found("User", id));
        }
        t.users.retain(|u| u.id != id);
        t.rides.retain(|r| r.passenger_id != id);
        let owned: Vec<i64> = t
            .drivers
            .iter()
            .filter(|d| d.owner.user_id == id)
            .map(|d| d.id)
            .collect();
        for driver_id in owned {
            t.delete_driver_cascade(driver_id);
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check_available()?;
        Ok(self.tables().users.len() as i64)
    }
}

#[async_trait]
impl DriverRepository for InMemoryDb {
    async fn create(&self, new_driver: NewDriver) -> Result<Driver, AppError> {
        let mut t = self.tables();
        let owner = t.owner(new_driver.user_id)?;
        let now = Utc::now();
        let driver = Driver {
            id: t.next_id(),
            owner,
            license_number: new_driver.license_number,
            vehicle_type: new_driver.vehicle_type,
            vehicle_model: new_driver.vehicle_model,
            vehicle_color: new_driver.vehicle_color,
            vehicle_number: new_driver.vehicle_number,
            vehicle_image: new_driver.vehicle_image,
            license_image: new_driver.license_image,
            license_expiry_date: new_driver.license_expiry_date,
            verification_status: new_driver.verification_status,
            current_latitude: new_driver.current_latitude,
            current_longitude: new_driver.current_longitude,
            is_available: new_driver.is_available,
            is_online: new_driver.is_online,
            rating: new_driver.rating,
            total_earnings: new_driver.total_earnings,
            total_rides: new_driver.total_rides,
            created_at: now,
            updated_at: now,
        };
        t.drivers.push(driver.clone());
        Ok(driver)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Driver>, AppError> {
        let t = self.tables();
        Ok(t.drivers
            .iter()
            .find(|d| d.id == id)
            .map(|d| t.hydrate_driver(d)))
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Driver>, AppError> {
        let t = self.tables();
        Ok(t.drivers
            .iter()
            .find(|d| d.owner.user_id == user_id)
            .map(|d| t.hydrate_driver(d)))
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables().drivers.iter().any(|d| d.id == id))
    }

    async fn exists_by_license_number(&self, license_number: &str) -> Result<bool, AppError> {
        Ok(self
            .tables()
            .drivers
            .iter()
            .any(|d| d.license_number == license_number))
    }

    async fn list(&self) -> Result<Vec<Driver>, AppError> {
        let t = self.tables();
        Ok(t.drivers.iter().map(|d| t.hydrate_driver(d)).collect())
    }

    async fn update(&self, driver: &Driver) -> Result<Driver, AppError> {
        let mut t = self.tables();
        let slot = t
            .drivers
            .iter_mut()
            .find(|d| d.id == driver.id)
            .ok_or_else(|| AppError::entity_not_found("Driver", driver.id))?;
        *slot = Driver {
            updated_at: Utc::now(),
            ..driver.clone()
        };
        let stored = slot.clone();
        Ok(t.hydrate_driver(&stored))
    }

    async fn update_status(&self, id: i64, status: DriverStatus) -> Result<Driver, AppError> {
        let mut t = self.tables();
        let slot = t
            .drivers
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::entity_not_found("Driver", id))?;
        slot.verification_status = status;
        slot.updated_at = Utc::now();
        let stored = slot.clone();
        Ok(t.hydrate_driver(&stored))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables();
        if !t.drivers.iter().any(|d| d.id == id) {
            return Err(AppError::entity_not_found("Driver", id));
        }
        t.delete_driver_cascade(id);
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check_available()?;
        Ok(self.tables().drivers.len() as i64)
    }

    async fn count_by_status(&self, status: DriverStatus) -> Result<i64, AppError> {
        self.check_available()?;
        Ok(self
            .tables()
            .drivers
            .iter()
            .filter(|d| d.verification_status == status)
            .count() as i64)
    }
}

impl InMemoryDb {
    fn rides_where(&self, predicate: impl Fn(&Ride) -> bool) -> Vec<Ride> {
        self.tables()
            .rides
            .iter()
            .filter(|&r| predicate(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RideRepository for InMemoryDb {
    async fn create(&self, new_ride: NewRide) -> Result<Ride, AppError> {
        let mut t = self.tables();
        let ride = Ride {
            id: t.next_id(),
            passenger_id: new_ride.passenger_id,
            driver_id: new_ride.driver_id,
            vehicle_type: new_ride.vehicle_type,
            pickup_address: new_ride.pickup_address,
            pickup_latitude: new_ride.pickup_latitude,
            pickup_longitude: new_ride.pickup_longitude,
            dropoff_address: new_ride.dropoff_address,
            dropoff_latitude: new_ride.dropoff_latitude,
            dropoff_longitude: new_ride.dropoff_longitude,
            status: new_ride.status,
            actual_fare: new_ride.actual_fare,
            payment_method: new_ride.payment_method,
            payment_status: new_ride.payment_status,
            cancellation_reason: new_ride.cancellation_reason,
            customer_rating: new_ride.customer_rating,
            customer_feedback: new_ride.customer_feedback,
            driver_rating: new_ride.driver_rating,
            driver_feedback: new_ride.driver_feedback,
            requested_at: new_ride.requested_at,
            accepted_at: new_ride.accepted_at,
            started_at: new_ride.started_at,
            completed_at: new_ride.completed_at,
            cancelled_at: new_ride.cancelled_at,
            created_at: new_ride.created_at.unwrap_or_else(Utc::now),
        };
        t.rides.push(ride.clone());
        Ok(ride)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ride>, AppError> {
        Ok(self.tables().rides.iter().find(|r| r.id == id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables().rides.iter().any(|r| r.id == id))
    }

    async fn list(&self) -> Result<Vec<Ride>, AppError> {
        Ok(self.rides_where(|_| true))
    }

    async fn list_by_driver(&self, driver_id: i64) -> Result<Vec<Ride>, AppError> {
        Ok(self.rides_where(|r| r.driver_id == driver_id))
    }

    async fn list_by_passenger(&self, passenger_id: i64) -> Result<Vec<Ride>, AppError> {
        Ok(self.rides_where(|r| r.passenger_id == passenger_id))
    }

    async fn list_by_passenger_and_status(
        &self,
        passenger_id: i64,
        status: RideStatus,
    ) -> Result<Vec<Ride>, AppError> {
        Ok(self.rides_where(|r| r.passenger_id == passenger_id && r.status == status))
    }

    async fn list_by_driver_and_status(
        &self,
        driver_id: i64,
        status: RideStatus,
    ) -> Result<Vec<Ride>, AppError> {
        Ok(self.rides_where(|r| r.driver_id == driver_id && r.status == status))
    }

    async fn list_by_status(&self, status: RideStatus) -> Result<Vec<Ride>, AppError> {
        Ok(self.rides_where(|r| r.status == status))
    }

    async fn list_with_complaints(
        &self,
        max_rating: i32,
        keyword: &str,
    ) -> Result<Vec<Ride>, AppError> {
        // The entity predicate is fixed to the platform rule.
        assert_eq!(max_rating, COMPLAINT_RATING_THRESHOLD);
        assert_eq!(keyword, COMPLAINT_KEYWORD);
        Ok(self.rides_where(|r| r.is_complaint()))
    }

    async fn list_with_feedback(&self) -> Result<Vec<Ride>, AppError> {
        Ok(self.rides_where(|r| r.has_feedback()))
    }

    async fn update(&self, ride: &Ride) -> Result<Ride, AppError> {
        let mut t = self.tables();
        let slot = t
            .rides
            .iter_mut()
            .find(|r| r.id == ride.id)
            .ok_or_else(|| AppError::entity_not_found("Ride", ride.id))?;
        *slot = ride.clone();
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables();
        if !t.rides.iter().any(|r| r.id == id) {
            return Err(AppError::entity_not_found("Ride", id));
        }
        t.rides.retain(|r| r.id != id);
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check_available()?;
        Ok(self.tables().rides.len() as i64)
    }
}

impl InMemoryDb {
    fn earnings_where(&self, predicate: impl Fn(&Earning) -> bool) -> Vec<Earning> {
        let t = self.tables();
        t.earnings
            .iter()
            .filter(|&e| predicate(e))
            .map(|e| t.hydrate_earning(e))
            .collect()
    }
}

#[async_trait]
impl EarningRepository for InMemoryDb {
    async fn create(&self, new_earning: NewEarning) -> Result<Earning, AppError> {
        let mut t = self.tables();
        let earning = Earning {
            id: t.next_id(),
            driver_id: new_earning.driver_id,
            driver_name: String::new(),
            amount: new_earning.amount,
            transaction_date: new_earning.transaction_date,
            payment_method: new_earning.payment_method,
            payment_status: new_earning.payment_status,
        };
        t.earnings.push(earning.clone());
        Ok(t.hydrate_earning(&earning))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Earning>, AppError> {
        Ok(self.earnings_where(|e| e.id == id).into_iter().next())
    }

    async fn list(&self) -> Result<Vec<Earning>, AppError> {
        Ok(self.earnings_where(|_| true))
    }

    async fn list_by_driver(&self, driver_id: i64) -> Result<Vec<Earning>, AppError> {
        Ok(self.earnings_where(|e| e.driver_id == driver_id))
    }

    async fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Earning>, AppError> {
        Ok(self.earnings_where(|e| e.transaction_date >= start && e.transaction_date <= end))
    }

    async fn list_by_payment_status(
        &self,
        status: PaymentStatus,
    ) -> Result<Vec<Earning>, AppError> {
        Ok(self.earnings_where(|e| e.payment_status == status))
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check_available()?;
        Ok(self.tables().earnings.len() as i64)
    }
}

#[async_trait]
impl AdminLogRepository for InMemoryDb {
    async fn create(&self, new_log: NewAdminLog) -> Result<AdminLog, AppError> {
        let mut t = self.tables();
        let log = AdminLog {
            id: t.next_id(),
            action: new_log.action,
            admin_name: new_log.admin_name,
            timestamp: Utc::now(),
        };
        t.logs.push(log.clone());
        Ok(log)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AdminLog>, AppError> {
        Ok(self.tables().logs.iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self, limit: Option<i64>) -> Result<Vec<AdminLog>, AppError> {
        let mut logs = self.tables().logs.clone();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            // PostgreSQL refuses a negative LIMIT.
            let limit = usize::try_from(limit)
                .map_err(|_| AppError::internal("LIMIT must not be negative", json!({})))?;
            logs.truncate(limit);
        }
        Ok(logs)
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check_available()?;
        Ok(self.tables().logs.len() as i64)
    }
}

/// Reversible stand-in for Argon2 so tests stay fast.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        Ok(hash == format!("plain${password}"))
    }
}

pub fn create_test_state(db: Arc<InMemoryDb>) -> AppState {
    AppState::from_repositories(Repositories {
        users: db.clone(),
        drivers: db.clone(),
        rides: db.clone(),
        earnings: db.clone(),
        admin_logs: db,
        hasher: Arc::new(PlainHasher),
    })
}

/// The production route table without rate limiting, which needs a peer
/// address the test transport does not provide.
pub fn make_server(db: Arc<InMemoryDb>) -> TestServer {
    let app = Router::new()
        .route("/health", axum::routing::get(health_handler))
        .nest("/api", api_routes())
        .with_state(create_test_state(db));
    TestServer::new(app).unwrap()
}

// ─── FIXTURES ────────────────────────────────────────────────────────────────

pub fn user_body(email: &str, phone: Option<&str>) -> Value {
    let mut body = json!({
        "email": email,
        "password": "password123",
        "firstName": "John",
        "lastName": "Doe",
        "userType": "PASSENGER"
    });
    if let Some(phone) = phone {
        body["phoneNumber"] = json!(phone);
    }
    body
}

pub fn driver_body(user_id: i64, license: &str) -> Value {
    json!({
        "userId": user_id,
        "licenseNumber": license,
        "vehicleType": "SEDAN",
        "vehicleModel": "Camry",
        "licenseExpiryDate": "2030-12-31"
    })
}

pub fn ride_body(passenger_id: i64, driver_id: i64) -> Value {
    json!({
        "passengerId": passenger_id,
        "driverId": driver_id,
        "vehicleType": "SEDAN",
        "pickupAddress": "1 Main St",
        "pickupLatitude": 40.7128,
        "pickupLongitude": -74.0060,
        "dropoffAddress": "99 Broadway",
        "dropoffLatitude": 40.7306,
        "dropoffLongitude": -73.9352,
        "status": "REQUESTED",
        "paymentMethod": "CASH",
        "paymentStatus": "PENDING"
    })
}

pub async fn create_user(server: &TestServer, email: &str) -> i64 {
    let response = server.post("/api/users").json(&user_body(email, None)).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

/// Creates a user and registers them as a driver. Returns `(user_id, driver_id)`.
pub async fn create_driver(server: &TestServer, email: &str, license: &str) -> (i64, i64) {
    let user_id = create_user(server, email).await;
    let response = server
        .post("/api/drivers/register")
        .json(&driver_body(user_id, license))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    (user_id, response.json::<Value>()["id"].as_i64().unwrap())
}

pub async fn create_ride(server: &TestServer, body: &Value) -> i64 {
    let response = server.post("/api/rides").json(body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

// ─── POSTGRES SEEDING ────────────────────────────────────────────────────────

pub async fn seed_user(pool: &sqlx::PgPool, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, first_name, last_name, user_type)
         VALUES ($1, 'hash', 'John', 'Doe', 'PASSENGER') RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_driver(pool: &sqlx::PgPool, user_id: i64, license: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO drivers (user_id, license_number, vehicle_type, license_expiry_date)
         VALUES ($1, $2, 'SEDAN', '2030-12-31') RETURNING id",
    )
    .bind(user_id)
    .bind(license)
    .fetch_one(pool)
    .await
    .unwrap()
}
