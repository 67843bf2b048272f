//! Workflow error types.

use common::{MenuItemId, OrderId, UserId};
use domain::{OrderError, OrderNumber};
use order_store::StoreError;
use thiserror::Error;

/// Errors that can occur while driving an order through its lifecycle.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No order exists with the given ID.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// No order exists with the given order number.
    #[error("Order not found: {0}")]
    OrderNumberNotFound(OrderNumber),

    /// No user exists with the given ID, or the directory could not
    /// confirm one.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// The menu item is missing or cannot currently be ordered.
    #[error("Menu item not available: {0}")]
    MenuItemNotFound(MenuItemId),

    /// Menu catalog error.
    #[error("Menu catalog error: {0}")]
    MenuService(String),

    /// User directory error.
    #[error("User directory error: {0}")]
    UserService(String),

    /// Domain rule violation.
    #[error("Domain error: {0}")]
    Domain(#[from] OrderError),

    /// Order store error.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for workflow results.
pub type Result<T> = std::result::Result<T, WorkflowError>;
