use common::OrderId;
use domain::{OrderNumber, OrderStatus};
use thiserror::Error;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The order number is already in use by another order.
    #[error("Order number already taken: {0}")]
    OrderNumberTaken(OrderNumber),

    /// The stored status no longer matches the status the caller observed.
    /// Another writer got there first.
    #[error("Status conflict for order {id}: expected {expected}, found {actual}")]
    StatusConflict {
        id: OrderId,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    /// A stored column value does not map to a domain value.
    #[error("Invalid value in column {column}: {value}")]
    Decode {
        column: &'static str,
        value: String,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
