//! Domain model for the food ordering system.
//!
//! This crate provides the core order types including:
//! - Order and OrderItem entities carrying frozen price snapshots
//! - OrderStatus lifecycle with forward-only transitions
//! - Money arithmetic in integer cents
//! - Order number generation

pub mod order;

pub use order::{
    CreateOrder, DEFAULT_DELIVERY_LEAD_MINUTES, Money, NewOrder, NewOrderItem, Order, OrderError,
    OrderItem, OrderLine, OrderNumber, OrderNumberGenerator, OrderStatus, OrderType,
    SequentialOrderNumberGenerator, UuidOrderNumberGenerator,
};
