//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p order-store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{MenuItemId, OrderId, UserId};
use domain::{Money, NewOrder, NewOrderItem, OrderNumber, OrderStatus, OrderType};
use order_store::{OrderStore, PostgresOrderStore, StoreError};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for migrations
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            // Run migrations using raw_sql to execute multiple statements
            sqlx::raw_sql(include_str!("../../../migrations/001_create_orders.sql"))
                .execute(&temp_pool)
                .await
                .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresOrderStore {
    let info = get_container_info().await;

    // Create a fresh pool for each test to avoid connection issues
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    // Clear tables for test isolation
    sqlx::query("TRUNCATE TABLE orders, order_items RESTART IDENTITY")
        .execute(&pool)
        .await
        .unwrap();

    PostgresOrderStore::new(pool)
}

fn draft_order(number: &str, user: i64, created_at: DateTime<Utc>) -> NewOrder {
    NewOrder::new(
        OrderNumber::new(number),
        UserId::from_i64(user),
        Some(OrderType::Delivery),
        "123 Main St",
        "555-0100",
        Some("Ring twice".to_string()),
        vec![
            NewOrderItem::new(
                MenuItemId::from_i64(7),
                "Margherita Pizza",
                2,
                Money::from_cents(1250),
            ),
            NewOrderItem::new(
                MenuItemId::from_i64(12),
                "Caesar Salad",
                1,
                Money::from_cents(850),
            ),
        ],
        created_at,
    )
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn create_and_fetch_round_trip() {
    let store = get_test_store().await;

    let created = store
        .create_order(draft_order("ORD-0001", 1, base_time()))
        .await
        .unwrap();

    assert_eq!(created.order_number.as_str(), "ORD-0001");
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.total_amount.cents(), 3350);
    assert_eq!(created.order_type, Some(OrderType::Delivery));
    assert_eq!(created.items.len(), 2);
    assert_eq!(created.items[0].unit_price.cents(), 1250);
    assert_eq!(created.items[0].total_price.cents(), 2500);
    assert_eq!(created.items[1].total_price.cents(), 850);
    assert_eq!(
        created.estimated_delivery_time,
        created.created_at + Duration::minutes(30)
    );

    let fetched = store.get_order(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_order_missing_returns_none() {
    let store = get_test_store().await;

    let result = store.get_order(OrderId::from_i64(4242)).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn get_order_by_number_round_trip() {
    let store = get_test_store().await;

    let created = store
        .create_order(draft_order("ORD-0001", 1, base_time()))
        .await
        .unwrap();

    let fetched = store
        .get_order_by_number(&OrderNumber::new("ORD-0001"))
        .await
        .unwrap();
    assert_eq!(fetched, Some(created));

    let missing = store
        .get_order_by_number(&OrderNumber::new("ORD-9999"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn unique_constraint_rejects_duplicate_order_number() {
    let store = get_test_store().await;

    store
        .create_order(draft_order("ORD-0001", 1, base_time()))
        .await
        .unwrap();

    let result = store
        .create_order(draft_order("ORD-0001", 2, base_time()))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::OrderNumberTaken(number)) if number.as_str() == "ORD-0001"
    ));

    // The losing write must leave nothing behind, items included.
    assert_eq!(store.count_orders().await.unwrap(), 1);
    let item_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(item_rows, 2);
}

#[tokio::test]
async fn transition_status_guarded_update() {
    let store = get_test_store().await;

    let created = store
        .create_order(draft_order("ORD-0001", 1, base_time()))
        .await
        .unwrap();

    let updated = store
        .transition_status(created.id, OrderStatus::Pending, OrderStatus::Confirmed)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, OrderStatus::Confirmed);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.items.len(), 2);

    // A writer still holding the old status loses.
    let stale = store
        .transition_status(created.id, OrderStatus::Pending, OrderStatus::Cancelled)
        .await;

    assert!(matches!(
        stale,
        Err(StoreError::StatusConflict {
            expected: OrderStatus::Pending,
            actual: OrderStatus::Confirmed,
            ..
        })
    ));

    let current = store.get_order(created.id).await.unwrap().unwrap();
    assert_eq!(current.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn transition_status_missing_order_returns_none() {
    let store = get_test_store().await;

    let result = store
        .transition_status(
            OrderId::from_i64(4242),
            OrderStatus::Pending,
            OrderStatus::Confirmed,
        )
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn orders_for_user_newest_first() {
    let store = get_test_store().await;
    let base = base_time();

    store
        .create_order(draft_order("ORD-0001", 1, base))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0002", 2, base + Duration::minutes(1)))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0003", 1, base + Duration::minutes(2)))
        .await
        .unwrap();

    let orders = store.orders_for_user(UserId::from_i64(1)).await.unwrap();
    let numbers: Vec<_> = orders.iter().map(|o| o.order_number.as_str()).collect();
    assert_eq!(numbers, vec!["ORD-0003", "ORD-0001"]);

    // Items come back attached on list queries too.
    assert!(orders.iter().all(|o| o.items.len() == 2));
}

#[tokio::test]
async fn all_orders_newest_first() {
    let store = get_test_store().await;
    let base = base_time();

    store
        .create_order(draft_order("ORD-0001", 1, base))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0002", 2, base + Duration::minutes(1)))
        .await
        .unwrap();

    let orders = store.all_orders().await.unwrap();
    let numbers: Vec<_> = orders.iter().map(|o| o.order_number.as_str()).collect();
    assert_eq!(numbers, vec!["ORD-0002", "ORD-0001"]);
}

#[tokio::test]
async fn orders_with_status_oldest_first() {
    let store = get_test_store().await;
    let base = base_time();

    let first = store
        .create_order(draft_order("ORD-0001", 1, base))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0002", 1, base + Duration::minutes(1)))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0003", 1, base + Duration::minutes(2)))
        .await
        .unwrap();
    store
        .transition_status(first.id, OrderStatus::Pending, OrderStatus::Confirmed)
        .await
        .unwrap();

    let pending = store
        .orders_with_status(OrderStatus::Pending)
        .await
        .unwrap();
    let numbers: Vec<_> = pending.iter().map(|o| o.order_number.as_str()).collect();
    assert_eq!(numbers, vec!["ORD-0002", "ORD-0003"]);
}

#[tokio::test]
async fn orders_for_user_with_status_filters_both() {
    let store = get_test_store().await;
    let base = base_time();

    let first = store
        .create_order(draft_order("ORD-0001", 1, base))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0002", 1, base + Duration::minutes(1)))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0003", 2, base + Duration::minutes(2)))
        .await
        .unwrap();
    store
        .transition_status(first.id, OrderStatus::Pending, OrderStatus::Confirmed)
        .await
        .unwrap();

    let orders = store
        .orders_for_user_with_status(UserId::from_i64(1), OrderStatus::Pending)
        .await
        .unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_number.as_str(), "ORD-0002");
}

#[tokio::test]
async fn date_range_includes_both_bounds() {
    let store = get_test_store().await;
    let base = base_time();

    store
        .create_order(draft_order("ORD-0001", 1, base))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0002", 1, base + Duration::minutes(5)))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0003", 1, base + Duration::minutes(10)))
        .await
        .unwrap();

    let orders = store
        .orders_created_between(base, base + Duration::minutes(5))
        .await
        .unwrap();

    let numbers: Vec<_> = orders.iter().map(|o| o.order_number.as_str()).collect();
    assert_eq!(numbers, vec!["ORD-0001", "ORD-0002"]);
}

#[tokio::test]
async fn count_orders_tracks_creations() {
    let store = get_test_store().await;

    assert_eq!(store.count_orders().await.unwrap(), 0);

    store
        .create_order(draft_order("ORD-0001", 1, base_time()))
        .await
        .unwrap();
    store
        .create_order(draft_order("ORD-0002", 1, base_time() + Duration::minutes(1)))
        .await
        .unwrap();

    assert_eq!(store.count_orders().await.unwrap(), 2);
}

#[tokio::test]
async fn revenue_sums_only_delivered_orders_in_range() {
    let store = get_test_store().await;
    let base = base_time();

    let delivered = store
        .create_order(draft_order("ORD-0001", 1, base))
        .await
        .unwrap();
    store
        .transition_status(delivered.id, OrderStatus::Pending, OrderStatus::Delivered)
        .await
        .unwrap();

    // Still pending, not counted.
    store
        .create_order(draft_order("ORD-0002", 1, base + Duration::minutes(1)))
        .await
        .unwrap();

    // Delivered but outside the window.
    let outside = store
        .create_order(draft_order("ORD-0003", 1, base + Duration::hours(2)))
        .await
        .unwrap();
    store
        .transition_status(outside.id, OrderStatus::Pending, OrderStatus::Delivered)
        .await
        .unwrap();

    let revenue = store
        .delivered_revenue_between(base, base + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(revenue.cents(), 3350);
}

#[tokio::test]
async fn revenue_empty_window_is_zero() {
    let store = get_test_store().await;
    let base = base_time();

    store
        .create_order(draft_order("ORD-0001", 1, base))
        .await
        .unwrap();

    let revenue = store
        .delivered_revenue_between(base + Duration::days(30), base + Duration::days(31))
        .await
        .unwrap();

    assert!(revenue.is_zero());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let info = get_container_info().await;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&info.connection_string)
        .await
        .unwrap();

    // The schema was already created with raw_sql; IF NOT EXISTS guards
    // make a second pass harmless.
    sqlx::raw_sql(include_str!("../../../migrations/001_create_orders.sql"))
        .execute(&pool)
        .await
        .unwrap();
}
