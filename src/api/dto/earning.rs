//! DTOs for earnings ledger endpoints.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::domain::entities::{Earning, NewEarning, PaymentMethod, PaymentStatus};

/// Parses an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

/// Request body for `POST /api/earnings`.
///
/// The driver's name is resolved server-side; a `driverName` sent by the
/// client is ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEarningRequest {
    #[validate(range(min = 1, message = "Driver ID must be a positive number"))]
    pub driver_id: i64,

    #[validate(range(
        min = 0.01,
        message = "Amount must be greater than or equal to 0.01"
    ))]
    pub amount: f64,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub transaction_date: DateTime<Utc>,

    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

impl From<CreateEarningRequest> for NewEarning {
    fn from(req: CreateEarningRequest) -> Self {
        NewEarning {
            driver_id: req.driver_id,
            amount: req.amount,
            transaction_date: req.transaction_date,
            payment_method: req.payment_method,
            payment_status: req.payment_status,
        }
    }
}

/// Query string for `GET /api/earnings/date-range`.
///
/// Both bounds are required; they are kept as strings so a missing or
/// malformed value is reported in the regular error envelope.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningResponse {
    pub id: i64,
    pub driver_id: i64,
    pub driver_name: String,
    pub amount: f64,
    pub transaction_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

impl From<Earning> for EarningResponse {
    fn from(earning: Earning) -> Self {
        EarningResponse {
            id: earning.id,
            driver_id: earning.driver_id,
            driver_name: earning.driver_name,
            amount: earning.amount,
            transaction_date: earning.transaction_date,
            payment_method: earning.payment_method,
            payment_status: earning.payment_status,
        }
    }
}
