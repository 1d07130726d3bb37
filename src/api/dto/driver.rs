//! DTOs for driver registry endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::domain::entities::{Driver, DriverPatch, DriverRegistration, DriverStatus, VehicleType};

/// Request body for `POST /api/drivers/register`.
///
/// Verification status and the counters are not accepted here; a new
/// profile always starts PENDING with zeroed stats.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDriverRequest {
    #[validate(range(min = 1, message = "User ID must be a positive number"))]
    pub user_id: i64,

    #[validate(
        custom(function = "not_blank", message = "License number is mandatory"),
        length(max = 255)
    )]
    pub license_number: String,

    pub vehicle_type: VehicleType,

    #[validate(length(max = 255))]
    pub vehicle_model: Option<String>,

    #[validate(length(max = 255))]
    pub vehicle_color: Option<String>,

    #[validate(length(max = 255))]
    pub vehicle_number: Option<String>,

    #[validate(length(max = 255))]
    pub vehicle_image: Option<String>,

    #[validate(length(max = 255))]
    pub license_image: Option<String>,

    pub license_expiry_date: NaiveDate,

    #[validate(range(min = -90.0, max = 90.0))]
    pub current_latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub current_longitude: Option<f64>,
}

impl From<RegisterDriverRequest> for DriverRegistration {
    fn from(req: RegisterDriverRequest) -> Self {
        DriverRegistration {
            user_id: req.user_id,
            license_number: req.license_number,
            vehicle_type: req.vehicle_type,
            vehicle_model: req.vehicle_model,
            vehicle_color: req.vehicle_color,
            vehicle_number: req.vehicle_number,
            vehicle_image: req.vehicle_image,
            license_image: req.license_image,
            license_expiry_date: req.license_expiry_date,
            current_latitude: req.current_latitude,
            current_longitude: req.current_longitude,
        }
    }
}

/// Request body for `PUT /api/drivers/{id}`.
///
/// `userId` may be sent back unchanged; a different owner is refused.
/// Status changes go through the verify/reject endpoints.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    pub user_id: Option<i64>,

    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub license_number: Option<String>,

    pub vehicle_type: Option<VehicleType>,

    #[validate(length(max = 255))]
    pub vehicle_model: Option<String>,

    #[validate(length(max = 255))]
    pub vehicle_color: Option<String>,

    #[validate(length(max = 255))]
    pub vehicle_number: Option<String>,

    #[validate(length(max = 255))]
    pub vehicle_image: Option<String>,

    #[validate(length(max = 255))]
    pub license_image: Option<String>,

    pub license_expiry_date: Option<NaiveDate>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub current_latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub current_longitude: Option<f64>,

    pub is_available: Option<bool>,

    pub is_online: Option<bool>,

    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,

    #[validate(range(min = 0.0))]
    pub total_earnings: Option<f64>,

    #[validate(range(min = 0))]
    pub total_rides: Option<i32>,
}

impl From<UpdateDriverRequest> for DriverPatch {
    fn from(req: UpdateDriverRequest) -> Self {
        DriverPatch {
            user_id: req.user_id,
            license_number: req.license_number,
            vehicle_type: req.vehicle_type,
            vehicle_model: req.vehicle_model,
            vehicle_color: req.vehicle_color,
            vehicle_number: req.vehicle_number,
            vehicle_image: req.vehicle_image,
            license_image: req.license_image,
            license_expiry_date: req.license_expiry_date,
            current_latitude: req.current_latitude,
            current_longitude: req.current_longitude,
            is_available: req.is_available,
            is_online: req.is_online,
            rating: req.rating,
            total_earnings: req.total_earnings,
            total_rides: req.total_rides,
        }
    }
}

/// A driver profile together with its owner's name and email.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub license_number: String,
    pub vehicle_type: VehicleType,
    pub vehicle_model: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_image: Option<String>,
    pub license_image: Option<String>,
    pub license_expiry_date: NaiveDate,
    pub verification_status: DriverStatus,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub is_available: bool,
    pub is_online: bool,
    pub rating: f64,
    pub total_earnings: f64,
    pub total_rides: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        DriverResponse {
            id: driver.id,
            user_id: driver.owner.user_id,
            first_name: driver.owner.first_name,
            last_name: driver.owner.last_name,
            email: driver.owner.email,
            license_number: driver.license_number,
            vehicle_type: driver.vehicle_type,
            vehicle_model: driver.vehicle_model,
            vehicle_color: driver.vehicle_color,
            vehicle_number: driver.vehicle_number,
            vehicle_image: driver.vehicle_image,
            license_image: driver.license_image,
            license_expiry_date: driver.license_expiry_date,
            verification_status: driver.verification_status,
            current_latitude: driver.current_latitude,
            current_longitude: driver.current_longitude,
            is_available: driver.is_available,
            is_online: driver.is_online,
            rating: driver.rating,
            total_earnings: driver.total_earnings,
            total_rides: driver.total_rides,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}
