mod common;

use chrono::NaiveDate;
use ride_admin::domain::entities::{DriverRegistration, DriverStatus, NewDriver, VehicleType};
use ride_admin::domain::repositories::DriverRepository;
use ride_admin::error::AppError;
use ride_admin::infrastructure::persistence::PgDriverRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_driver(user_id: i64, license: &str) -> NewDriver {
    NewDriver::from_registration(DriverRegistration {
        user_id,
        license_number: license.to_string(),
        vehicle_type: VehicleType::Suv,
        vehicle_model: Some("Model X".to_string()),
        vehicle_color: None,
        vehicle_number: None,
        vehicle_image: None,
        license_image: None,
        license_expiry_date: NaiveDate::from_ymd_opt(2031, 6, 30).unwrap(),
        current_latitude: Some(51.5),
        current_longitude: Some(-0.12),
    })
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_create_driver_joins_owner(pool: PgPool) {
    let user_id = common::seed_user(&pool, "driver@test.com").await;
    let repo = PgDriverRepository::new(Arc::new(pool));

    let driver = repo.create(new_driver(user_id, "LIC12345")).await.unwrap();

    assert_eq!(driver.owner.user_id, user_id);
    assert_eq!(driver.owner.full_name(), "John Doe");
    assert_eq!(driver.owner.email, "driver@test.com");
    assert_eq!(driver.verification_status, DriverStatus::Pending);
    assert_eq!(driver.total_rides, 0);
    assert_eq!(driver.rating, 0.0);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_license_is_conflict(pool: PgPool) {
    let first = common::seed_user(&pool, "a@test.com").await;
    let second = common::seed_user(&pool, "b@test.com").await;
    let repo = PgDriverRepository::new(Arc::new(pool));
    repo.create(new_driver(first, "LIC-DUP")).await.unwrap();

    let result = repo.create(new_driver(second, "LIC-DUP")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    assert!(repo.exists_by_license_number("LIC-DUP").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_find_by_user_id(pool: PgPool) {
    let user_id = common::seed_user(&pool, "driver@test.com").await;
    let driver_id = common::seed_driver(&pool, user_id, "LIC1").await;
    let repo = PgDriverRepository::new(Arc::new(pool));

    let found = repo.find_by_user_id(user_id).await.unwrap();

    assert_eq!(found.map(|d| d.id), Some(driver_id));
    assert!(repo.find_by_user_id(user_id + 1000).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_update_status_and_counts(pool: PgPool) {
    let a = common::seed_user(&pool, "a@test.com").await;
    let b = common::seed_user(&pool, "b@test.com").await;
    let driver_a = common::seed_driver(&pool, a, "LIC-A").await;
    common::seed_driver(&pool, b, "LIC-B").await;
    let repo = PgDriverRepository::new(Arc::new(pool));

    let verified = repo
        .update_status(driver_a, DriverStatus::Verified)
        .await
        .unwrap();

    assert_eq!(verified.verification_status, DriverStatus::Verified);
    assert_eq!(verified.license_number, "LIC-A");
    assert_eq!(
        repo.count_by_status(DriverStatus::Verified).await.unwrap(),
        1
    );
    assert_eq!(repo.count_by_status(DriverStatus::Pending).await.unwrap(), 1);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_update_status_missing_driver(pool: PgPool) {
    let repo = PgDriverRepository::new(Arc::new(pool));

    let result = repo.update_status(999, DriverStatus::Rejected).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_update_driver_fields(pool: PgPool) {
    let user_id = common::seed_user(&pool, "driver@test.com").await;
    let repo = PgDriverRepository::new(Arc::new(pool));
    let mut driver = repo.create(new_driver(user_id, "LIC1")).await.unwrap();

    driver.vehicle_color = Some("Red".to_string());
    driver.is_online = true;
    driver.rating = 4.8;
    let updated = repo.update(&driver).await.unwrap();

    assert_eq!(updated.vehicle_color.as_deref(), Some("Red"));
    assert!(updated.is_online);
    assert_eq!(updated.rating, 4.8);
    assert_eq!(updated.owner.user_id, user_id);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_delete_driver(pool: PgPool) {
    let user_id = common::seed_user(&pool, "driver@test.com").await;
    let driver_id = common::seed_driver(&pool, user_id, "LIC1").await;
    let repo = PgDriverRepository::new(Arc::new(pool));

    repo.delete(driver_id).await.unwrap();

    assert!(!repo.exists(driver_id).await.unwrap());
    assert!(matches!(
        repo.delete(driver_id).await,
        Err(AppError::NotFound { .. })
    ));
}
