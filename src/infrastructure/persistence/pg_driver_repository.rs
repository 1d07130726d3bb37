//! PostgreSQL implementation of the driver repository.
//!
//! Every read joins `users` so the owning user's name and email travel with
//! the profile. Writes use a `WITH ... RETURNING` CTE to get the same shape
//! back in one round trip.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Driver, DriverOwner, DriverStatus, NewDriver, VehicleType};
use crate::domain::repositories::DriverRepository;
use crate::error::AppError;

const DRIVER_SELECT: &str = r#"
    d.id, d.user_id, u.first_name, u.last_name, u.email,
    d.license_number, d.vehicle_type, d.vehicle_model, d.vehicle_color,
    d.vehicle_number, d.vehicle_image, d.license_image, d.license_expiry_date,
    d.verification_status, d.current_latitude, d.current_longitude,
    d.is_available, d.is_online, d.rating, d.total_earnings, d.total_rides,
    d.created_at, d.updated_at
"#;

#[derive(FromRow)]
struct DriverRow {
    id: i64,
    user_id: i64,
    first_name: String,
    last_name: String,
    email: String,
    license_number: String,
    vehicle_type: VehicleType,
    vehicle_model: Option<String>,
    vehicle_color: Option<String>,
    vehicle_number: Option<String>,
    vehicle_image: Option<String>,
    license_image: Option<String>,
    license_expiry_date: NaiveDate,
    verification_status: DriverStatus,
    current_latitude: Option<f64>,
    current_longitude: Option<f64>,
    is_available: bool,
    is_online: bool,
    rating: f64,
    total_earnings: f64,
    total_rides: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DriverRow> for Driver {
    fn from(r: DriverRow) -> Self {
        Driver {
            id: r.id,
            owner: DriverOwner {
                user_id: r.user_id,
                first_name: r.first_name,
                last_name: r.last_name,
                email: r.email,
            },
            license_number: r.license_number,
            vehicle_type: r.vehicle_type,
            vehicle_model: r.vehicle_model,
            vehicle_color: r.vehicle_color,
            vehicle_number: r.vehicle_number,
            vehicle_image: r.vehicle_image,
            license_image: r.license_image,
            license_expiry_date: r.license_expiry_date,
            verification_status: r.verification_status,
            current_latitude: r.current_latitude,
            current_longitude: r.current_longitude,
            is_available: r.is_available,
            is_online: r.is_online,
            rating: r.rating,
            total_earnings: r.total_earnings,
            total_rides: r.total_rides,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for driver profiles.
pub struct PgDriverRepository {
    pool: Arc<PgPool>,
}

impl PgDriverRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        value: i64,
    ) -> Result<Option<Driver>, AppError> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_SELECT} FROM drivers d JOIN users u ON u.id = d.user_id WHERE {condition}"
        ))
        .bind(value)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn create(&self, new_driver: NewDriver) -> Result<Driver, AppError> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            r#"
            WITH d AS (
                INSERT INTO drivers (
                    user_id, license_number, vehicle_type, vehicle_model, vehicle_color,
                    vehicle_number, vehicle_image, license_image, license_expiry_date,
                    verification_status, current_latitude, current_longitude,
                    is_available, is_online, rating, total_earnings, total_rides
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                RETURNING *
            )
            SELECT {DRIVER_SELECT} FROM d JOIN users u ON u.id = d.user_id
            "#
        ))
        .bind(new_driver.user_id)
        .bind(&new_driver.license_number)
        .bind(new_driver.vehicle_type)
        .bind(&new_driver.vehicle_model)
        .bind(&new_driver.vehicle_color)
        .bind(&new_driver.vehicle_number)
        .bind(&new_driver.vehicle_image)
        .bind(&new_driver.license_image)
        .bind(new_driver.license_expiry_date)
        .bind(new_driver.verification_status)
        .bind(new_driver.current_latitude)
        .bind(new_driver.current_longitude)
        .bind(new_driver.is_available)
        .bind(new_driver.is_online)
        .bind(new_driver.rating)
        .bind(new_driver.total_earnings)
        .bind(new_driver.total_rides)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Driver>, AppError> {
        self.fetch_one_where("d.id = $1", id).await
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Driver>, AppError> {
        self.fetch_one_where("d.user_id = $1", user_id).await
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM drivers WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn exists_by_license_number(&self, license_number: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE license_number = $1)",
        )
        .bind(license_number)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn list(&self) -> Result<Vec<Driver>, AppError> {
        let rows = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_SELECT} FROM drivers d JOIN users u ON u.id = d.user_id ORDER BY d.id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, driver: &Driver) -> Result<Driver, AppError> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            r#"
            WITH d AS (
                UPDATE drivers SET
                    license_number      = $2,
                    vehicle_type        = $3,
                    vehicle_model       = $4,
                    vehicle_color       = $5,
                    vehicle_number      = $6,
                    vehicle_image       = $7,
                    license_image       = $8,
                    license_expiry_date = $9,
                    current_latitude    = $10,
                    current_longitude   = $11,
                    is_available        = $12,
                    is_online           = $13,
                    rating              = $14,
                    total_earnings      = $15,
                    total_rides         = $16,
                    updated_at          = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {DRIVER_SELECT} FROM d JOIN users u ON u.id = d.user_id
            "#
        ))
        .bind(driver.id)
        .bind(&driver.license_number)
        .bind(driver.vehicle_type)
        .bind(&driver.vehicle_model)
        .bind(&driver.vehicle_color)
        .bind(&driver.vehicle_number)
        .bind(&driver.vehicle_image)
        .bind(&driver.license_image)
        .bind(driver.license_expiry_date)
        .bind(driver.current_latitude)
        .bind(driver.current_longitude)
        .bind(driver.is_available)
        .bind(driver.is_online)
        .bind(driver.rating)
        .bind(driver.total_earnings)
        .bind(driver.total_rides)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::entity_not_found("Driver", driver.id))
    }

    async fn update_status(&self, id: i64, status: DriverStatus) -> Result<Driver, AppError> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            r#"
            WITH d AS (
                UPDATE drivers SET verification_status = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {DRIVER_SELECT} FROM d JOIN users u ON u.id = d.user_id
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::entity_not_found("Driver", id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::entity_not_found("Driver", id));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM drivers")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_by_status(&self, status: DriverStatus) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM drivers WHERE verification_status = $1",
        )
        .bind(status)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
