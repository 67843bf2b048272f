//! Query error types.

use common::OrderId;
use domain::OrderNumber;
use order_store::StoreError;
use thiserror::Error;

/// Errors that can occur on the read side.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No order exists with the given ID.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// No order exists with the given order number.
    #[error("Order not found: {0}")]
    OrderNumberNotFound(OrderNumber),

    /// Order store error.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
