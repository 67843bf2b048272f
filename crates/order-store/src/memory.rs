use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{OrderId, OrderItemId, UserId};
use domain::{Money, NewOrder, Order, OrderItem, OrderNumber, OrderStatus};
use tokio::sync::RwLock;

use crate::{Result, StoreError, store::OrderStore};

/// In-memory order store implementation.
///
/// Backs tests and the standalone server mode, providing the same
/// interface as the PostgreSQL implementation. IDs count up from one,
/// mirroring the database sequences.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    inner: Arc<RwLock<State>>,
}

#[derive(Default)]
struct State {
    orders: Vec<Order>,
    next_order_id: i64,
    next_item_id: i64,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.inner.read().await.orders.len()
    }

    /// Clears all orders and resets the ID sequences.
    pub async fn clear(&self) {
        let mut state = self.inner.write().await;
        state.orders.clear();
        state.next_order_id = 0;
        state.next_item_id = 0;
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order(&self, order: NewOrder) -> Result<Order> {
        let mut state = self.inner.write().await;

        if state
            .orders
            .iter()
            .any(|o| o.order_number == order.order_number)
        {
            return Err(StoreError::OrderNumberTaken(order.order_number));
        }

        state.next_order_id += 1;
        let order_id = OrderId::from_i64(state.next_order_id);

        let mut items = Vec::with_capacity(order.items.len());
        for line in &order.items {
            state.next_item_id += 1;
            items.push(OrderItem {
                id: OrderItemId::from_i64(state.next_item_id),
                menu_item_id: line.menu_item_id,
                menu_item_name: line.menu_item_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                total_price: line.total_price(),
                created_at: order.created_at,
            });
        }

        let stored = Order {
            id: order_id,
            order_number: order.order_number,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status,
            order_type: order.order_type,
            delivery_address: order.delivery_address,
            phone_number: order.phone_number,
            special_instructions: order.special_instructions,
            estimated_delivery_time: order.estimated_delivery_time,
            created_at: order.created_at,
            updated_at: order.created_at,
            items,
        };

        state.orders.push(stored.clone());
        Ok(stored)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let state = self.inner.read().await;
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn get_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>> {
        let state = self.inner.read().await;
        Ok(state
            .orders
            .iter()
            .find(|o| &o.order_number == number)
            .cloned())
    }

    async fn transition_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        target: OrderStatus,
    ) -> Result<Option<Order>> {
        let mut state = self.inner.write().await;

        match state.orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                if order.status != expected {
                    return Err(StoreError::StatusConflict {
                        id,
                        expected,
                        actual: order.status,
                    });
                }

                order.status = target;
                order.updated_at = Utc::now();
                Ok(Some(order.clone()))
            }
            None => Ok(None),
        }
    }

    async fn all_orders(&self) -> Result<Vec<Order>> {
        let state = self.inner.read().await;
        let mut orders = state.orders.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        let state = self.inner.read().await;
        let mut orders: Vec<_> = state
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let state = self.inner.read().await;
        let mut orders: Vec<_> = state
            .orders
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(orders)
    }

    async fn orders_for_user_with_status(
        &self,
        user_id: UserId,
        status: OrderStatus,
    ) -> Result<Vec<Order>> {
        let state = self.inner.read().await;
        let mut orders: Vec<_> = state
            .orders
            .iter()
            .filter(|o| o.user_id == user_id && o.status == status)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn orders_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let state = self.inner.read().await;
        let mut orders: Vec<_> = state
            .orders
            .iter()
            .filter(|o| o.created_at >= start && o.created_at <= end)
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(orders)
    }

    async fn count_orders(&self) -> Result<i64> {
        let state = self.inner.read().await;
        Ok(state.orders.len() as i64)
    }

    async fn delivered_revenue_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Money> {
        let state = self.inner.read().await;
        let revenue = state
            .orders
            .iter()
            .filter(|o| {
                o.status == OrderStatus::Delivered && o.created_at >= start && o.created_at <= end
            })
            .map(|o| o.total_amount)
            .sum();
        Ok(revenue)
    }
}
