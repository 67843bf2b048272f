use serde::{Deserialize, Serialize};

/// Unique identifier for an order.
///
/// Wraps the store-generated numeric key to provide type safety and
/// prevent mixing up order IDs with other numeric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Creates an order ID from a raw numeric key.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<OrderId> for i64 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// Unique identifier for a line item within an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderItemId(i64);

impl OrderItemId {
    /// Creates an item ID from a raw numeric key.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<OrderItemId> for i64 {
    fn from(id: OrderItemId) -> Self {
        id.0
    }
}

/// Unique identifier for the user who placed an order.
///
/// Users live in a separate service; this is a foreign reference, never
/// dereferenced locally beyond the existence check at order creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user ID from a raw numeric key.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Unique identifier for a menu item in the catalog service.
///
/// Orders keep this as a reference alongside the frozen name and price;
/// the referenced item may change or disappear after the order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(i64);

impl MenuItemId {
    /// Creates a menu item ID from a raw numeric key.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MenuItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<MenuItemId> for i64 {
    fn from(id: MenuItemId) -> Self {
        id.0
    }
}
