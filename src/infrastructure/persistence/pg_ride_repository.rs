//! PostgreSQL implementation of the ride repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{
    NewRide, PaymentMethod, PaymentStatus, Ride, RideStatus, VehicleType,
};
use crate::domain::repositories::RideRepository;
use crate::error::AppError;

const RIDE_COLUMNS: &str = "id, passenger_id, driver_id, vehicle_type, \
     pickup_address, pickup_latitude, pickup_longitude, \
     dropoff_address, dropoff_latitude, dropoff_longitude, \
     status, actual_fare, payment_method, payment_status, cancellation_reason, \
     customer_rating, customer_feedback, driver_rating, driver_feedback, \
     requested_at, accepted_at, started_at, completed_at, cancelled_at, created_at";

#[derive(FromRow)]
struct RideRow {
    id: i64,
    passenger_id: i64,
    driver_id: i64,
    vehicle_type: VehicleType,
    pickup_address: String,
    pickup_latitude: f64,
    pickup_longitude: f64,
    dropoff_address: String,
    dropoff_latitude: f64,
    dropoff_longitude: f64,
    status: RideStatus,
    actual_fare: Option<f64>,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
    cancellation_reason: Option<String>,
    customer_rating: Option<i32>,
    customer_feedback: Option<String>,
    driver_rating: Option<i32>,
    driver_feedback: Option<String>,
    requested_at: Option<DateTime<Utc>>,
    accepted_at: Option<DateTime<Utc>>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<RideRow> for Ride {
    fn from(r: RideRow) -> Self {
        Ride {
            id: r.id,
            passenger_id: r.passenger_id,
            driver_id: r.driver_id,
            vehicle_type: r.vehicle_type,
            pickup_address: r.pickup_address,
            pickup_latitude: r.pickup_latitude,
            pickup_longitude: r.pickup_longitude,
            dropoff_address: r.dropoff_address,
            dropoff_latitude: r.dropoff_latitude,
            dropoff_longitude: r.dropoff_longitude,
            status: r.status,
            actual_fare: r.actual_fare,
            payment_method: r.payment_method,
            payment_status: r.payment_status,
            cancellation_reason: r.cancellation_reason,
            customer_rating: r.customer_rating,
            customer_feedback: r.customer_feedback,
            driver_rating: r.driver_rating,
            driver_feedback: r.driver_feedback,
            requested_at: r.requested_at,
            accepted_at: r.accepted_at,
            started_at: r.started_at,
            completed_at: r.completed_at,
            cancelled_at: r.cancelled_at,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for rides.
pub struct PgRideRepository {
    pool: Arc<PgPool>,
}

impl PgRideRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Runs `SELECT <columns> FROM rides WHERE <filter> ORDER BY id`, with the
    /// filter built by `push_filter`.
    async fn list_where<F>(&self, push_filter: F) -> Result<Vec<Ride>, AppError>
    where
        F: FnOnce(&mut QueryBuilder<'_, Postgres>),
    {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {RIDE_COLUMNS} FROM rides WHERE "));
        push_filter(&mut qb);
        qb.push(" ORDER BY id");

        let rows = qb
            .build_query_as::<RideRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl RideRepository for PgRideRepository {
    async fn create(&self, new_ride: NewRide) -> Result<Ride, AppError> {
        let row = sqlx::query_as::<_, RideRow>(&format!(
            r#"
            INSERT INTO rides (
                passenger_id, driver_id, vehicle_type,
                pickup_address, pickup_latitude, pickup_longitude,
                dropoff_address, dropoff_latitude, dropoff_longitude,
                status, actual_fare, payment_method, payment_status, cancellation_reason,
                customer_rating, customer_feedback, driver_rating, driver_feedback,
                requested_at, accepted_at, started_at, completed_at, cancelled_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23, COALESCE($24, NOW()))
            RETURNING {RIDE_COLUMNS}
            "#
        ))
        .bind(new_ride.passenger_id)
        .bind(new_ride.driver_id)
        .bind(new_ride.vehicle_type)
        .bind(&new_ride.pickup_address)
        .bind(new_ride.pickup_latitude)
        .bind(new_ride.pickup_longitude)
        .bind(&new_ride.dropoff_address)
        .bind(new_ride.dropoff_latitude)
        .bind(new_ride.dropoff_longitude)
        .bind(new_ride.status)
        .bind(new_ride.actual_fare)
        .bind(new_ride.payment_method)
        .bind(new_ride.payment_status)
        .bind(&new_ride.cancellation_reason)
        .bind(new_ride.customer_rating)
        .bind(&new_ride.customer_feedback)
        .bind(new_ride.driver_rating)
        .bind(&new_ride.driver_feedback)
        .bind(new_ride.requested_at)
        .bind(new_ride.accepted_at)
        .bind(new_ride.started_at)
        .bind(new_ride.completed_at)
        .bind(new_ride.cancelled_at)
        .bind(new_ride.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ride>, AppError> {
        let row = sqlx::query_as::<_, RideRow>(&format!(
            "SELECT {RIDE_COLUMNS} FROM rides WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rides WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn list(&self) -> Result<Vec<Ride>, AppError> {
        self.list_where(|qb| {
            qb.push("TRUE");
        })
        .await
    }

    async fn list_by_driver(&self, driver_id: i64) -> Result<Vec<Ride>, AppError> {
        self.list_where(|qb| {
            qb.push("driver_id = ").push_bind(driver_id);
        })
        .await
    }

    async fn list_by_passenger(&self, passenger_id: i64) -> Result<Vec<Ride>, AppError> {
        self.list_where(|qb| {
            qb.push("passenger_id = ").push_bind(passenger_id);
        })
        .await
    }

    async fn list_by_passenger_and_status(
        &self,
        passenger_id: i64,
        status: RideStatus,
    ) -> Result<Vec<Ride>, AppError> {
        self.list_where(|qb| {
            qb.push("passenger_id = ")
                .push_bind(passenger_id)
                .push(" AND status = ")
                .push_bind(status);
        })
        .await
    }

    async fn list_by_driver_and_status(
        &self,
        driver_id: i64,
        status: RideStatus,
    ) -> Result<Vec<Ride>, AppError> {
        self.list_where(|qb| {
            qb.push("driver_id = ")
                .push_bind(driver_id)
                .push(" AND status = ")
                .push_bind(status);
        })
        .await
    }

    async fn list_by_status(&self, status: RideStatus) -> Result<Vec<Ride>, AppError> {
        self.list_where(|qb| {
            qb.push("status = ").push_bind(status);
        })
        .await
    }

    async fn list_with_complaints(
        &self,
        max_rating: i32,
        keyword: &str,
    ) -> Result<Vec<Ride>, AppError> {
        let pattern = format!("%{keyword}%");
        self.list_where(|qb| {
            qb.push("customer_rating < ")
                .push_bind(max_rating)
                .push(" OR customer_feedback ILIKE ")
                .push_bind(pattern);
        })
        .await
    }

    async fn list_with_feedback(&self) -> Result<Vec<Ride>, AppError> {
        self.list_where(|qb| {
            qb.push("customer_feedback IS NOT NULL OR driver_feedback IS NOT NULL");
        })
        .await
    }

    async fn update(&self, ride: &Ride) -> Result<Ride, AppError> {
        let row = sqlx::query_as::<_, RideRow>(&format!(
            r#"
            UPDATE rides SET
                passenger_id        = $2,
                driver_id           = $3,
                vehicle_type        = $4,
                pickup_address      = $5,
                pickup_latitude     = $6,
                pickup_longitude    = $7,
                dropoff_address     = $8,
                dropoff_latitude    = $9,
                dropoff_longitude   = $10,
                status              = $11,
                actual_fare         = $12,
                payment_method      = $13,
                payment_status      = $14,
                cancellation_reason = $15,
                customer_rating     = $16,
                customer_feedback   = $17,
                driver_rating       = $18,
                driver_feedback     = $19,
                requested_at        = $20,
                accepted_at         = $21,
                started_at          = $22,
                completed_at        = $23,
                cancelled_at        = $24,
                created_at          = $25
            WHERE id = $1
            RETURNING {RIDE_COLUMNS}
            "#
        ))
        .bind(ride.id)
        .bind(ride.passenger_id)
        .bind(ride.driver_id)
        .bind(ride.vehicle_type)
        .bind(&ride.pickup_address)
        .bind(ride.pickup_latitude)
        .bind(ride.pickup_longitude)
        .bind(&ride.dropoff_address)
        .bind(ride.dropoff_latitude)
        .bind(ride.dropoff_longitude)
        .bind(ride.status)
        .bind(ride.actual_fare)
        .bind(ride.payment_method)
        .bind(ride.payment_status)
        .bind(&ride.cancellation_reason)
        .bind(ride.customer_rating)
        .bind(&ride.customer_feedback)
        .bind(ride.driver_rating)
        .bind(&ride.driver_feedback)
        .bind(ride.requested_at)
        .bind(ride.accepted_at)
        .bind(ride.started_at)
        .bind(ride.completed_at)
        .bind(ride.cancelled_at)
        .bind(ride.created_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::entity_not_found("Ride", ride.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rides WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::entity_not_found("Ride", id));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rides")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
