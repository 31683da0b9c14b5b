use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{admin, auth, customer, driver};
use crate::middleware::auth::{auth_middleware, require_admin, require_customer, require_driver};
use crate::middleware::rate_limit::create_public_governor;
use crate::middleware::role_rate_limit::{create_role_governor, RateLimitedRole};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Create role-specific governor layers
    let driver_governor = create_role_governor(RateLimitedRole::Driver);
    let customer_governor = create_role_governor(RateLimitedRole::Customer);
    // Create IP-based governor for public routes (with customer-level limits)
    let public_governor = create_public_governor();

    // Public routes (with customer-level rate limiting per IP)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(public_governor.clone());

    // Public reference data and package tracking
    let public_routes = Router::new()
        .route("/cities", get(customer::list_cities))
        .route("/centers", get(customer::list_centers))
        .route("/delivery-types", get(customer::list_delivery_types))
        .route("/tracking/{code}", get(customer::track_package))
        .layer(public_governor);

    // Customer routes (requires auth + customer role)
    let customer_routes = Router::new()
        .route("/", post(customer::create_request))
        .route("/", get(customer::my_requests))
        .route("/{id}", get(customer::get_request))
        .route("/{id}", put(customer::update_request))
        .route("/{id}", delete(customer::delete_request))
        .layer(customer_governor)
        .layer(middleware::from_fn(require_customer))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Admin routes (requires auth + admin role)
    let admin_routes = Router::new()
        // Request administration
        .route("/requests", get(admin::list_requests))
        .route("/requests/{id}", delete(admin::delete_request))
        .route("/requests/{id}/status", patch(admin::change_request_status))
        .route("/requests/{id}/payment-status", patch(admin::change_payment_status))
        .route("/requests/{id}/payments", post(admin::record_payment))
        .route("/requests/{id}/payments", get(admin::list_payments))
        .route("/requests/{id}/assign-driver", post(admin::assign_driver))
        // Rate card
        .route("/tariffs", get(admin::list_tariffs))
        .route("/tariffs", post(admin::create_tariff))
        .route("/tariffs/{id}", put(admin::update_tariff))
        // Driver roster
        .route("/drivers", get(admin::list_drivers))
        .route("/drivers", post(admin::create_driver))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Driver routes (requires auth + driver role)
    let driver_routes = Router::new()
        .route("/deliveries", get(driver::my_deliveries))
        .route("/deliveries/{id}/status", patch(driver::update_delivery_status))
        .route("/position", post(driver::update_position))
        .layer(driver_governor)
        .layer(middleware::from_fn(require_driver))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", public_routes)
        .nest("/api/requests", customer_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/driver", driver_routes)
        .with_state(state)
}
