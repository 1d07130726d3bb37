//! API route configuration.
//!
//! Mounted under `/api` by [`crate::routes::app_router`].

use crate::api::handlers::{
    cancelled_rides_handler, complaint_rides_handler, create_admin_log_handler,
    create_earning_handler, create_ride_handler, create_user_handler, delete_driver_handler,
    delete_ride_handler, delete_user_handler, driver_history_handler,
    earnings_by_date_range_handler, earnings_by_driver_handler, earnings_by_status_handler,
    feedback_rides_handler, get_admin_log_handler, get_driver_handler, get_earning_handler,
    get_ride_handler, get_user_handler, list_admin_logs_handler, list_drivers_handler,
    list_earnings_handler, list_rides_handler, list_users_handler, passenger_history_handler,
    register_driver_handler, reject_driver_handler, rides_by_driver_handler,
    rides_by_passenger_handler, update_driver_handler, update_ride_handler, update_user_handler,
    verify_driver_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All REST routes.
///
/// # Endpoints
///
/// - `GET|POST        /users`
/// - `GET|PUT|DELETE  /users/{id}`
/// - `POST            /drivers/register`
/// - `GET             /drivers`
/// - `GET|PUT|DELETE  /drivers/{id}`
/// - `PUT             /drivers/{id}/verify`, `/drivers/{id}/reject`
/// - `GET|POST        /rides`
/// - `GET|PUT|DELETE  /rides/{id}`
/// - `GET             /rides/driver/{driverId}`, `/rides/passenger/{passengerId}`
/// - `GET             /rides/history/passenger/{id}`, `/rides/history/driver/{id}`
/// - `GET             /rides/cancelled`, `/rides/complaints`, `/rides/feedback`
/// - `GET|POST        /earnings`
/// - `GET             /earnings/{id}`, `/earnings/driver/{driverId}`
/// - `GET             /earnings/date-range?start=&end=`, `/earnings/status/{status}`
/// - `GET|POST        /admin-logs`
/// - `GET             /admin-logs/{id}`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(driver_routes())
        .merge(ride_routes())
        .merge(earning_routes())
        .merge(admin_log_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
}

fn driver_routes() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers_handler))
        .route("/drivers/register", post(register_driver_handler))
        .route(
            "/drivers/{id}",
            get(get_driver_handler)
                .put(update_driver_handler)
                .delete(delete_driver_handler),
        )
        .route("/drivers/{id}/verify", put(verify_driver_handler))
        .route("/drivers/{id}/reject", put(reject_driver_handler))
}

fn ride_routes() -> Router<AppState> {
    Router::new()
        .route("/rides", get(list_rides_handler).post(create_ride_handler))
        .route("/rides/cancelled", get(cancelled_rides_handler))
        .route("/rides/complaints", get(complaint_rides_handler))
        .route("/rides/feedback", get(feedback_rides_handler))
        .route("/rides/driver/{driver_id}", get(rides_by_driver_handler))
        .route(
            "/rides/passenger/{passenger_id}",
            get(rides_by_passenger_handler),
        )
        .route(
            "/rides/history/passenger/{id}",
            get(passenger_history_handler),
        )
        .route("/rides/history/driver/{id}", get(driver_history_handler))
        .route(
            "/rides/{id}",
            get(get_ride_handler)
                .put(update_ride_handler)
                .delete(delete_ride_handler),
        )
}

fn earning_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/earnings",
            get(list_earnings_handler).post(create_earning_handler),
        )
        .route(
            "/earnings/date-range",
            get(earnings_by_date_range_handler),
        )
        .route("/earnings/status/{status}", get(earnings_by_status_handler))
        .route(
            "/earnings/driver/{driver_id}",
            get(earnings_by_driver_handler),
        )
        .route("/earnings/{id}", get(get_earning_handler))
}

fn admin_log_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin-logs",
            get(list_admin_logs_handler).post(create_admin_log_handler),
        )
        .route("/admin-logs/{id}", get(get_admin_log_handler))
}
