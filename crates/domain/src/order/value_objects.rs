//! Value objects for the order domain.

use serde::{Deserialize, Serialize};

use super::OrderError;

/// Monetary amount in integer minor units (cents).
///
/// All order arithmetic stays in cents so totals come out exact; rendering
/// as dollars only happens in `Display`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Wraps an amount given in cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The zero amount.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// True for amounts strictly above zero.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// True for the zero amount.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Scales the amount by a line quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Self(self.0 * i64::from(quantity))
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Money {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |total, amount| total + amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}${}.{:02}",
            (self.0 / 100).abs(),
            (self.0 % 100).abs()
        )
    }
}

/// Externally visible order number, distinct from the internal numeric ID.
///
/// Assigned once at creation and never changed; the store enforces
/// uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Creates a new order number from a string.
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Returns the order number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Delivered to the customer's address.
    Delivery,

    /// Collected by the customer.
    Pickup,

    /// Served at a table.
    DineIn,

    /// Packed to go.
    Takeaway,
}

impl OrderType {
    /// Returns the order type name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Delivery => "DELIVERY",
            OrderType::Pickup => "PICKUP",
            OrderType::DineIn => "DINE_IN",
            OrderType::Takeaway => "TAKEAWAY",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DELIVERY" => Ok(OrderType::Delivery),
            "PICKUP" => Ok(OrderType::Pickup),
            "DINE_IN" => Ok(OrderType::DineIn),
            "TAKEAWAY" => Ok(OrderType::Takeaway),
            _ => Err(OrderError::UnknownOrderType {
                value: s.to_string(),
            }),
        }
    }
}
