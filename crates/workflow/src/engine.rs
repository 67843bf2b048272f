//! The order workflow engine.

use chrono::Utc;
use common::OrderId;
use domain::{
    CreateOrder, NewOrder, NewOrderItem, Order, OrderError, OrderNumber, OrderNumberGenerator,
    OrderStatus,
};
use order_store::OrderStore;

use crate::error::{Result, WorkflowError};
use crate::services::menu::MenuLookup;
use crate::services::users::UserDirectory;

/// Drives orders through their lifecycle.
///
/// Creation resolves every line against the menu catalog before anything
/// is written, so a rejected order leaves no rows behind. Status changes
/// are compare-and-set writes against the status the order was read
/// with, so two concurrent transitions cannot both win.
pub struct OrderWorkflow<S, M, U, G>
where
    S: OrderStore,
    M: MenuLookup,
    U: UserDirectory,
    G: OrderNumberGenerator,
{
    store: S,
    menu: M,
    users: U,
    numbers: G,
}

impl<S, M, U, G> OrderWorkflow<S, M, U, G>
where
    S: OrderStore,
    M: MenuLookup,
    U: UserDirectory,
    G: OrderNumberGenerator,
{
    /// Creates a new order workflow.
    pub fn new(store: S, menu: M, users: U, numbers: G) -> Self {
        Self {
            store,
            menu,
            users,
            numbers,
        }
    }

    /// Places a new order.
    ///
    /// Validates the request shape, confirms the user, resolves every
    /// line against the menu (freezing name and unit price), computes
    /// the total, and persists the order with all items atomically.
    /// The returned order carries its generated IDs and timestamps.
    #[tracing::instrument(skip(self, command), fields(user_id = %command.user_id))]
    pub async fn create_order(&self, command: CreateOrder) -> Result<Order> {
        let start = std::time::Instant::now();

        command.validate()?;

        // Fail closed: a user the directory cannot confirm is treated
        // as missing.
        match self.users.user_exists(command.user_id).await {
            Ok(true) => {}
            Ok(false) => return Err(WorkflowError::UserNotFound(command.user_id)),
            Err(e) => {
                tracing::warn!(user_id = %command.user_id, error = %e, "user lookup failed");
                return Err(WorkflowError::UserNotFound(command.user_id));
            }
        }

        // Resolve every line before writing anything. Missing,
        // unavailable, and unreachable all reject the whole order.
        let mut items = Vec::with_capacity(command.lines.len());
        for line in &command.lines {
            let entry = match self.menu.menu_item(line.menu_item_id).await {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        menu_item_id = %line.menu_item_id,
                        error = %e,
                        "menu lookup failed"
                    );
                    return Err(WorkflowError::MenuItemNotFound(line.menu_item_id));
                }
            };
            let entry = entry
                .filter(|item| item.available)
                .ok_or(WorkflowError::MenuItemNotFound(line.menu_item_id))?;

            if !entry.price.is_positive() {
                return Err(OrderError::InvalidPrice {
                    price: entry.price.cents(),
                }
                .into());
            }

            items.push(NewOrderItem::new(
                line.menu_item_id,
                entry.name,
                line.quantity,
                entry.price,
            ));
        }

        let draft = NewOrder::new(
            self.numbers.next(),
            command.user_id,
            command.order_type,
            command.delivery_address,
            command.phone_number,
            command.special_instructions,
            items,
            Utc::now(),
        );

        let order = self.store.create_order(draft).await?;

        metrics::counter!("orders_created_total").increment(1);
        metrics::histogram!("order_creation_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        tracing::info!(
            id = %order.id,
            number = %order.order_number,
            total = %order.total_amount,
            "order created"
        );

        Ok(order)
    }

    /// Fetches an order by ID.
    pub async fn order(&self, id: OrderId) -> Result<Order> {
        self.store
            .get_order(id)
            .await?
            .ok_or(WorkflowError::OrderNotFound(id))
    }

    /// Fetches an order by its public order number.
    pub async fn order_by_number(&self, number: &OrderNumber) -> Result<Order> {
        self.store
            .get_order_by_number(number)
            .await?
            .ok_or_else(|| WorkflowError::OrderNumberNotFound(number.clone()))
    }

    /// Moves an order to a new status.
    ///
    /// The transition must be legal under the forward-only status
    /// machine; an illegal one fails with `InvalidStateTransition`
    /// carrying the current and requested statuses.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, target: OrderStatus) -> Result<Order> {
        let order = self.order(id).await?;
        order.check_transition(target)?;

        let updated = self
            .store
            .transition_status(id, order.status, target)
            .await?
            .ok_or(WorkflowError::OrderNotFound(id))?;

        metrics::counter!("order_status_updates_total").increment(1);
        tracing::info!(%id, from = %order.status, to = %target, "order status updated");

        Ok(updated)
    }

    /// Cancels an order.
    ///
    /// Only pending and confirmed orders can be cancelled. The record
    /// stays in the store with status `Cancelled`; orders are never
    /// hard deleted.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order> {
        let order = self.order(id).await?;
        order.check_cancel()?;

        let cancelled = self
            .store
            .transition_status(id, order.status, OrderStatus::Cancelled)
            .await?
            .ok_or(WorkflowError::OrderNotFound(id))?;

        metrics::counter!("orders_cancelled_total").increment(1);
        tracing::info!(%id, from = %order.status, "order cancelled");

        Ok(cancelled)
    }
}
