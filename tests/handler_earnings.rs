mod common;

use axum::http::StatusCode;
use common::{InMemoryDb, create_driver, make_server};
use serde_json::{Value, json};

fn earning_body(driver_id: i64, amount: f64, date: &str, status: &str) -> Value {
    json!({
        "driverId": driver_id,
        "amount": amount,
        "transactionDate": date,
        "paymentMethod": "CREDIT_CARD",
        "paymentStatus": status
    })
}

async fn create_earning(server: &axum_test::TestServer, body: &Value) -> i64 {
    let response = server.post("/api/earnings").json(body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

fn ids(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect()
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_earning_resolves_driver_name() {
    let server = make_server(InMemoryDb::new());
    let (_, driver_id) = create_driver(&server, "driver@test.com", "LIC1").await;

    let mut body = earning_body(driver_id, 42.5, "2025-01-15T08:00:00", "PAID");
    body["driverName"] = json!("Somebody Else");

    let response = server.post("/api/earnings").json(&body).await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["driverId"], driver_id);
    assert_eq!(json["driverName"], "John Doe");
    assert_eq!(json["amount"], 42.5);
    assert_eq!(json["paymentStatus"], "PAID");
}

#[tokio::test]
async fn test_create_earning_amount_too_small() {
    let server = make_server(InMemoryDb::new());
    let (_, driver_id) = create_driver(&server, "driver@test.com", "LIC1").await;

    let response = server
        .post("/api/earnings")
        .json(&earning_body(driver_id, 0.0, "2025-01-15T08:00:00Z", "PAID"))
        .await;

    response.assert_status_bad_request();
    assert!(
        response.json::<Value>()["error"]["details"]
            .get("amount")
            .is_some()
    );
}

#[tokio::test]
async fn test_create_earning_future_date() {
    let server = make_server(InMemoryDb::new());
    let (_, driver_id) = create_driver(&server, "driver@test.com", "LIC1").await;

    server
        .post("/api/earnings")
        .json(&earning_body(driver_id, 10.0, "2999-01-01T00:00:00Z", "PENDING"))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_create_earning_unknown_driver() {
    let server = make_server(InMemoryDb::new());

    server
        .post("/api/earnings")
        .json(&earning_body(555, 10.0, "2025-01-15T08:00:00Z", "PAID"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_create_earning_bad_timestamp() {
    let server = make_server(InMemoryDb::new());
    let (_, driver_id) = create_driver(&server, "driver@test.com", "LIC1").await;

    let response = server
        .post("/api/earnings")
        .json(&earning_body(driver_id, 10.0, "last tuesday", "PAID"))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

// ─── READ ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_and_list_earnings() {
    let server = make_server(InMemoryDb::new());
    let (_, driver_id) = create_driver(&server, "driver@test.com", "LIC1").await;
    let id = create_earning(
        &server,
        &earning_body(driver_id, 12.0, "2025-02-01T00:00:00Z", "PAID"),
    )
    .await;

    let single = server.get(&format!("/api/earnings/{id}")).await;
    single.assert_status_ok();
    assert_eq!(single.json::<Value>()["id"], id);

    let list = server.get("/api/earnings").await;
    list.assert_status_ok();
    assert_eq!(ids(&list.json::<Value>()), vec![id]);

    server
        .get("/api/earnings/123456")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_earnings_by_driver() {
    let server = make_server(InMemoryDb::new());
    let (_, first) = create_driver(&server, "a@test.com", "LIC-A").await;
    let (_, second) = create_driver(&server, "b@test.com", "LIC-B").await;

    let mine = create_earning(
        &server,
        &earning_body(first, 12.0, "2025-02-01T00:00:00Z", "PAID"),
    )
    .await;
    create_earning(
        &server,
        &earning_body(second, 30.0, "2025-02-02T00:00:00Z", "PAID"),
    )
    .await;

    let response = server.get(&format!("/api/earnings/driver/{first}")).await;

    response.assert_status_ok();
    assert_eq!(ids(&response.json::<Value>()), vec![mine]);
}

#[tokio::test]
async fn test_earnings_by_unknown_driver() {
    let server = make_server(InMemoryDb::new());

    server
        .get("/api/earnings/driver/8080")
        .await
        .assert_status_not_found();
}

// ─── DATE RANGE ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_earnings_by_date_range_inclusive() {
    let server = make_server(InMemoryDb::new());
    let (_, driver_id) = create_driver(&server, "driver@test.com", "LIC1").await;

    let inside = create_earning(
        &server,
        &earning_body(driver_id, 10.0, "2025-03-01T00:00:00Z", "PAID"),
    )
    .await;
    let edge = create_earning(
        &server,
        &earning_body(driver_id, 11.0, "2025-03-31T23:59:59Z", "PAID"),
    )
    .await;
    create_earning(
        &server,
        &earning_body(driver_id, 12.0, "2025-04-01T00:00:00Z", "PAID"),
    )
    .await;

    let response = server
        .get("/api/earnings/date-range")
        .add_query_param("start", "2025-03-01T00:00:00")
        .add_query_param("end", "2025-03-31T23:59:59")
        .await;

    response.assert_status_ok();
    let mut found = ids(&response.json::<Value>());
    found.sort();
    assert_eq!(found, vec![inside, edge]);
}

#[tokio::test]
async fn test_earnings_by_date_range_inverted() {
    let server = make_server(InMemoryDb::new());

    let response = server
        .get("/api/earnings/date-range")
        .add_query_param("start", "2025-04-01T00:00:00Z")
        .add_query_param("end", "2025-03-01T00:00:00Z")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Start date must be before end date"
    );
}

#[tokio::test]
async fn test_earnings_by_date_range_missing_bound() {
    let server = make_server(InMemoryDb::new());

    let response = server
        .get("/api/earnings/date-range")
        .add_query_param("start", "2025-04-01T00:00:00Z")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["details"]["field"],
        "end"
    );
}

#[tokio::test]
async fn test_earnings_by_date_range_malformed_bound() {
    let server = make_server(InMemoryDb::new());

    server
        .get("/api/earnings/date-range")
        .add_query_param("start", "soon")
        .add_query_param("end", "2025-03-01T00:00:00Z")
        .await
        .assert_status_bad_request();
}

// ─── STATUS ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_earnings_by_status() {
    let server = make_server(InMemoryDb::new());
    let (_, driver_id) = create_driver(&server, "driver@test.com", "LIC1").await;

    let pending = create_earning(
        &server,
        &earning_body(driver_id, 10.0, "2025-03-01T00:00:00Z", "PENDING"),
    )
    .await;
    create_earning(
        &server,
        &earning_body(driver_id, 20.0, "2025-03-02T00:00:00Z", "PAID"),
    )
    .await;

    let response = server.get("/api/earnings/status/PENDING").await;

    response.assert_status_ok();
    assert_eq!(ids(&response.json::<Value>()), vec![pending]);
}

#[tokio::test]
async fn test_earnings_by_unknown_status() {
    let server = make_server(InMemoryDb::new());

    let response = server.get("/api/earnings/status/REFUNDED").await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(
        json["error"]["details"]["allowed"]
            .as_array()
            .unwrap()
            .contains(&json!("PAID"))
    );
}
