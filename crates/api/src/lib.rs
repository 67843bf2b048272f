//! HTTP API server for the food ordering system.
//!
//! Provides REST endpoints for order creation, lifecycle management, and
//! reporting, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use common::{MenuItemId, UserId};
use domain::{Money, UuidOrderNumberGenerator};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderStore;
use queries::OrderQueries;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use workflow::{InMemoryMenuCatalog, InMemoryUserDirectory, OrderWorkflow};

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/orders", post(routes::orders::create::<S>))
        .route("/api/orders", get(routes::orders::list::<S>))
        .route("/api/orders/count", get(routes::orders::count::<S>))
        .route("/api/orders/revenue", get(routes::orders::revenue::<S>))
        .route(
            "/api/orders/date-range",
            get(routes::orders::by_date_range::<S>),
        )
        .route(
            "/api/orders/order-number/{order_number}",
            get(routes::orders::get_by_number::<S>),
        )
        .route(
            "/api/orders/user/{user_id}",
            get(routes::orders::list_for_user::<S>),
        )
        .route(
            "/api/orders/user/{user_id}/status/{status}",
            get(routes::orders::list_for_user_with_status::<S>),
        )
        .route(
            "/api/orders/status/{status}",
            get(routes::orders::list_with_status::<S>),
        )
        .route("/api/orders/{id}", get(routes::orders::get::<S>))
        .route(
            "/api/orders/{id}/status",
            put(routes::orders::update_status::<S>),
        )
        .route(
            "/api/orders/{id}/cancel",
            delete(routes::orders::cancel::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over the given store, wired to in-memory
/// menu and user services seeded with demo data.
///
/// The returned service handles share state with the workflow, so tests
/// can add items or toggle availability after the fact.
pub fn create_default_state<S: OrderStore + Clone + 'static>(
    store: S,
) -> (
    Arc<AppState<S>>,
    InMemoryMenuCatalog,
    InMemoryUserDirectory,
) {
    let menu = InMemoryMenuCatalog::new();
    menu.add_item(MenuItemId::from_i64(1), "Margherita Pizza", Money::from_cents(1250));
    menu.add_item(MenuItemId::from_i64(2), "Pepperoni Pizza", Money::from_cents(1450));
    menu.add_item(MenuItemId::from_i64(3), "Caesar Salad", Money::from_cents(850));
    menu.add_item(MenuItemId::from_i64(4), "Garlic Bread", Money::from_cents(450));
    menu.add_unavailable_item(MenuItemId::from_i64(5), "Seasonal Soup", Money::from_cents(600));

    let users = InMemoryUserDirectory::new();
    for id in 1..=5 {
        users.add_user(UserId::from_i64(id));
    }

    let workflow = OrderWorkflow::new(
        store.clone(),
        menu.clone(),
        users.clone(),
        UuidOrderNumberGenerator::new(),
    );
    let queries = OrderQueries::new(store);

    let state = Arc::new(AppState { workflow, queries });

    (state, menu, users)
}
