//! Order status lifecycle.

use serde::{Deserialize, Serialize};

use super::OrderError;

/// The status of an order in its lifecycle.
///
/// Status transitions:
/// ```text
/// Pending ──► Confirmed ──► Preparing ──► Ready ──► Dispatched ──► Delivered
///    │            │
///    └────────────┴──► Cancelled
/// ```
///
/// Preparation statuses only move forward, skipping steps is allowed.
/// `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order placed, awaiting kitchen confirmation.
    #[default]
    Pending,

    /// Kitchen has accepted the order.
    Confirmed,

    /// Food is being prepared.
    Preparing,

    /// Ready for pickup or courier handoff.
    Ready,

    /// Courier is on the way to the customer.
    Dispatched,

    /// Order reached the customer (terminal state).
    Delivered,

    /// Order was cancelled before preparation started (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the lifecycle allows moving from this status to `to`.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if to == OrderStatus::Cancelled {
            return self.can_cancel();
        }
        match (self.step(), to.step()) {
            (Some(current), Some(target)) => target > current,
            _ => false,
        }
    }

    /// Returns true if the order can still be cancelled from this status.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Position in the preparation sequence, or `None` for `Cancelled`,
    /// which sits outside it.
    fn step(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Preparing => Some(2),
            OrderStatus::Ready => Some(3),
            OrderStatus::Dispatched => Some(4),
            OrderStatus::Delivered => Some(5),
            OrderStatus::Cancelled => None,
        }
    }

    /// Returns the status name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Dispatched => "DISPATCHED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// All statuses in lifecycle order.
    pub fn all() -> [OrderStatus; 7] {
        [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Dispatched,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ]
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "PREPARING" => Ok(OrderStatus::Preparing),
            "READY" => Ok(OrderStatus::Ready),
            "DISPATCHED" => Ok(OrderStatus::Dispatched),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(OrderError::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}
