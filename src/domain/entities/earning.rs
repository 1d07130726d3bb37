use chrono::{DateTime, Utc};

use super::payment::{PaymentMethod, PaymentStatus};

/// Smallest payout the ledger accepts.
pub const MIN_EARNING_AMOUNT: f64 = 0.01;

/// A payment record owed to or paid out to a driver.
///
/// `driver_name` is "First Last" of the owning user, joined in on every read.
#[derive(Debug, Clone)]
pub struct Earning {
    pub id: i64,
    pub driver_id: i64,
    pub driver_name: String,
    pub amount: f64,
    pub transaction_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone)]
pub struct NewEarning {
    pub driver_id: i64,
    pub amount: f64,
    pub transaction_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}
