//! Order entities and lifecycle rules.

mod commands;
mod model;
mod number;
mod status;
mod value_objects;

pub use commands::{CreateOrder, OrderLine};
pub use model::{DEFAULT_DELIVERY_LEAD_MINUTES, NewOrder, NewOrderItem, Order, OrderItem};
pub use number::{OrderNumberGenerator, SequentialOrderNumberGenerator, UuidOrderNumberGenerator};
pub use status::OrderStatus;
pub use value_objects::{Money, OrderNumber, OrderType};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Status change not allowed by the lifecycle rules.
    #[error("Invalid state transition: cannot move from {from} to {to}")]
    InvalidStateTransition { from: OrderStatus, to: OrderStatus },

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Invalid price.
    #[error("Invalid price: {price} (must be greater than 0)")]
    InvalidPrice { price: i64 },

    /// Order has no items.
    #[error("Order has no items")]
    NoItems,

    /// A required field is missing or blank.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// Status value not recognized.
    #[error("Unknown order status: {value}")]
    UnknownStatus { value: String },

    /// Order type value not recognized.
    #[error("Unknown order type: {value}")]
    UnknownOrderType { value: String },
}
