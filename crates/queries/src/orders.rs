//! Read paths over persisted orders.

use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use domain::{Money, Order, OrderNumber, OrderStatus};
use order_store::OrderStore;

use crate::error::{QueryError, Result};

/// Query service over the order store.
///
/// All reads go straight to the store; orders come back fully
/// materialized with their items attached.
#[derive(Clone)]
pub struct OrderQueries<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderQueries<S> {
    /// Creates a new query service.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetches an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<Order> {
        metrics::counter!("order_queries_total").increment(1);
        self.store
            .get_order(id)
            .await?
            .ok_or(QueryError::OrderNotFound(id))
    }

    /// Fetches an order by its public order number.
    #[tracing::instrument(skip(self))]
    pub async fn order_by_number(&self, number: &OrderNumber) -> Result<Order> {
        metrics::counter!("order_queries_total").increment(1);
        self.store
            .get_order_by_number(number)
            .await?
            .ok_or_else(|| QueryError::OrderNumberNotFound(number.clone()))
    }

    /// Lists every order, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn all_orders(&self) -> Result<Vec<Order>> {
        metrics::counter!("order_queries_total").increment(1);
        Ok(self.store.all_orders().await?)
    }

    /// Lists a user's orders, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        metrics::counter!("order_queries_total").increment(1);
        Ok(self.store.orders_for_user(user_id).await?)
    }

    /// Lists orders in the given status, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        metrics::counter!("order_queries_total").increment(1);
        Ok(self.store.orders_with_status(status).await?)
    }

    /// Lists a user's orders in the given status, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn orders_for_user_with_status(
        &self,
        user_id: UserId,
        status: OrderStatus,
    ) -> Result<Vec<Order>> {
        metrics::counter!("order_queries_total").increment(1);
        Ok(self
            .store
            .orders_for_user_with_status(user_id, status)
            .await?)
    }

    /// Lists orders created inside the inclusive time range, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn orders_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        metrics::counter!("order_queries_total").increment(1);
        Ok(self.store.orders_created_between(start, end).await?)
    }

    /// Counts all orders ever created, regardless of status.
    #[tracing::instrument(skip(self))]
    pub async fn count_orders(&self) -> Result<i64> {
        metrics::counter!("order_queries_total").increment(1);
        Ok(self.store.count_orders().await?)
    }

    /// Sums the totals of delivered orders created inside the inclusive
    /// time range. An empty window yields zero.
    #[tracing::instrument(skip(self))]
    pub async fn revenue_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Money> {
        metrics::counter!("order_queries_total").increment(1);
        Ok(self.store.delivered_revenue_between(start, end).await?)
    }
}
