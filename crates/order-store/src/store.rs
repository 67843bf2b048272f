use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use domain::{Money, NewOrder, Order, OrderNumber, OrderStatus};

use crate::Result;

/// Core trait for order store implementations.
///
/// The store assigns numeric IDs, enforces order number uniqueness and
/// performs the guarded status update. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order together with all of its line items.
    ///
    /// The write is atomic: either the order and every item land, or
    /// nothing does. Fails with `OrderNumberTaken` when the order number
    /// is already in use.
    async fn create_order(&self, order: NewOrder) -> Result<Order>;

    /// Looks up an order by its internal numeric ID.
    ///
    /// Returns None if the order doesn't exist.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Looks up an order by its external order number.
    ///
    /// Returns None if the order doesn't exist.
    async fn get_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>>;

    /// Moves an order from `expected` status to `target`, guarded by the
    /// status the caller last observed.
    ///
    /// Returns the updated order, or None when the order doesn't exist.
    /// Fails with `StatusConflict` when the stored status no longer
    /// matches `expected`.
    async fn transition_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        target: OrderStatus,
    ) -> Result<Option<Order>>;

    /// Returns every order, newest first.
    async fn all_orders(&self) -> Result<Vec<Order>>;

    /// Returns a user's orders, newest first.
    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>>;

    /// Returns orders in a given status, oldest first.
    async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>>;

    /// Returns a user's orders in a given status, newest first.
    async fn orders_for_user_with_status(
        &self,
        user_id: UserId,
        status: OrderStatus,
    ) -> Result<Vec<Order>>;

    /// Returns orders created inside an inclusive time range, oldest first.
    async fn orders_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>>;

    /// Returns the total number of orders.
    async fn count_orders(&self) -> Result<i64>;

    /// Sums the totals of delivered orders created inside an inclusive
    /// time range.
    ///
    /// Returns zero when nothing matches.
    async fn delivered_revenue_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Money>;
}
