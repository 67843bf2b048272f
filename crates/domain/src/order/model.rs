//! Order entities.

use chrono::{DateTime, Duration, Utc};
use common::{MenuItemId, OrderId, OrderItemId, UserId};
use serde::{Deserialize, Serialize};

use super::{Money, OrderError, OrderNumber, OrderStatus, OrderType};

/// Default lead time promised to the customer at creation, in minutes.
pub const DEFAULT_DELIVERY_LEAD_MINUTES: i64 = 30;

/// A priced line captured while assembling a new order.
///
/// Name and unit price are copies of the menu item taken at the moment the
/// order is placed; later menu edits never touch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    /// The menu item this line refers to.
    pub menu_item_id: MenuItemId,

    /// Menu item name frozen at order time.
    pub menu_item_name: String,

    /// Quantity ordered.
    pub quantity: u32,

    /// Price per unit frozen at order time.
    pub unit_price: Money,
}

impl NewOrderItem {
    /// Creates a new order line from a resolved menu item.
    pub fn new(
        menu_item_id: MenuItemId,
        menu_item_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            menu_item_id,
            menu_item_name: menu_item_name.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns the total price for this line (quantity * unit price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A fully priced order ready to be persisted.
///
/// The store assigns the numeric IDs and the `updated_at` timestamp when it
/// writes the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_number: OrderNumber,
    pub user_id: UserId,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub order_type: Option<OrderType>,
    pub delivery_address: String,
    pub phone_number: String,
    pub special_instructions: Option<String>,
    pub estimated_delivery_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// Assembles a draft order from resolved lines.
    ///
    /// The total is summed from the lines, the status starts at `Pending`
    /// and the estimated delivery time is the creation time plus the
    /// default lead.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_number: OrderNumber,
        user_id: UserId,
        order_type: Option<OrderType>,
        delivery_address: impl Into<String>,
        phone_number: impl Into<String>,
        special_instructions: Option<String>,
        items: Vec<NewOrderItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total_amount: Money = items.iter().map(|item| item.total_price()).sum();

        Self {
            order_number,
            user_id,
            total_amount,
            status: OrderStatus::Pending,
            order_type,
            delivery_address: delivery_address.into(),
            phone_number: phone_number.into(),
            special_instructions,
            estimated_delivery_time: created_at + Duration::minutes(DEFAULT_DELIVERY_LEAD_MINUTES),
            created_at,
            items,
        }
    }
}

/// A persisted order with its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Internal numeric key assigned by the store.
    pub id: OrderId,

    /// Externally visible order number.
    pub order_number: OrderNumber,

    /// The user who placed the order.
    pub user_id: UserId,

    /// Sum of all line totals.
    pub total_amount: Money,

    /// Where the order is in its lifecycle.
    pub status: OrderStatus,

    /// How the order reaches the customer, if specified.
    pub order_type: Option<OrderType>,

    /// Address the order ships to.
    pub delivery_address: String,

    /// Contact number for the courier.
    pub phone_number: String,

    /// Free-form notes from the customer.
    pub special_instructions: Option<String>,

    /// Promised delivery time set at creation.
    pub estimated_delivery_time: DateTime<Utc>,

    /// When the order was placed.
    pub created_at: DateTime<Utc>,

    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,

    /// Line items with frozen prices.
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Validates a status change against the lifecycle rules.
    pub fn check_transition(&self, to: OrderStatus) -> Result<(), OrderError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(OrderError::InvalidStateTransition {
                from: self.status,
                to,
            })
        }
    }

    /// Validates cancellation against the cancellation policy.
    pub fn check_cancel(&self) -> Result<(), OrderError> {
        self.check_transition(OrderStatus::Cancelled)
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the sum of all line quantities.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// A persisted line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Internal numeric key assigned by the store.
    pub id: OrderItemId,

    /// The menu item this line refers to.
    pub menu_item_id: MenuItemId,

    /// Menu item name frozen at order time.
    pub menu_item_name: String,

    /// Quantity ordered.
    pub quantity: u32,

    /// Price per unit frozen at order time.
    pub unit_price: Money,

    /// Quantity * unit price, stored with the line.
    pub total_price: Money,

    /// When the line was persisted.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with_items(items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder::new(
            OrderNumber::new("ORD-0001"),
            UserId::from_i64(1),
            None,
            "123 Main St",
            "555-0100",
            None,
            items,
            Utc::now(),
        )
    }

    fn persisted_order(status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: OrderId::from_i64(1),
            order_number: OrderNumber::new("ORD-0001"),
            user_id: UserId::from_i64(1),
            total_amount: Money::from_cents(2500),
            status,
            order_type: Some(OrderType::Delivery),
            delivery_address: "123 Main St".to_string(),
            phone_number: "555-0100".to_string(),
            special_instructions: None,
            estimated_delivery_time: now + Duration::minutes(DEFAULT_DELIVERY_LEAD_MINUTES),
            created_at: now,
            updated_at: now,
            items: vec![OrderItem {
                id: OrderItemId::from_i64(1),
                menu_item_id: MenuItemId::from_i64(7),
                menu_item_name: "Margherita Pizza".to_string(),
                quantity: 2,
                unit_price: Money::from_cents(1250),
                total_price: Money::from_cents(2500),
                created_at: now,
            }],
        }
    }

    #[test]
    fn test_new_order_item_total_price() {
        let item = NewOrderItem::new(MenuItemId::from_i64(7), "Margherita Pizza", 3, Money::from_cents(1000));
        assert_eq!(item.total_price().cents(), 3000);
    }

    #[test]
    fn test_new_order_sums_line_totals() {
        // 2 x $10.00 + 3 x $5.50 + 1 x $25.99 = $62.49
        let draft = draft_with_items(vec![
            NewOrderItem::new(MenuItemId::from_i64(1), "Widget A", 2, Money::from_cents(1000)),
            NewOrderItem::new(MenuItemId::from_i64(2), "Widget B", 3, Money::from_cents(550)),
            NewOrderItem::new(MenuItemId::from_i64(3), "Widget C", 1, Money::from_cents(2599)),
        ]);

        assert_eq!(draft.total_amount.cents(), 6249);
    }

    #[test]
    fn test_new_order_starts_pending() {
        let draft = draft_with_items(vec![NewOrderItem::new(
            MenuItemId::from_i64(1),
            "Widget",
            1,
            Money::from_cents(100),
        )]);

        assert_eq!(draft.status, OrderStatus::Pending);
    }

    #[test]
    fn test_estimated_delivery_uses_default_lead() {
        let created_at = Utc::now();
        let draft = NewOrder::new(
            OrderNumber::new("ORD-0001"),
            UserId::from_i64(1),
            None,
            "123 Main St",
            "555-0100",
            None,
            vec![NewOrderItem::new(
                MenuItemId::from_i64(1),
                "Widget",
                1,
                Money::from_cents(100),
            )],
            created_at,
        );

        assert_eq!(
            draft.estimated_delivery_time,
            created_at + Duration::minutes(30)
        );
    }

    #[test]
    fn test_check_transition_allows_forward_move() {
        let order = persisted_order(OrderStatus::Pending);
        assert!(order.check_transition(OrderStatus::Confirmed).is_ok());
    }

    #[test]
    fn test_check_transition_reports_current_status() {
        let order = persisted_order(OrderStatus::Delivered);
        let result = order.check_transition(OrderStatus::Preparing);

        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Preparing,
            })
        ));
    }

    #[test]
    fn test_check_cancel_allowed_while_pending() {
        let order = persisted_order(OrderStatus::Pending);
        assert!(order.check_cancel().is_ok());
    }

    #[test]
    fn test_check_cancel_rejected_after_delivery() {
        let order = persisted_order(OrderStatus::Delivered);
        let result = order.check_cancel();

        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Cancelled,
            })
        ));
    }

    #[test]
    fn test_order_counters() {
        let order = persisted_order(OrderStatus::Pending);
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total_quantity(), 2);
    }

    #[test]
    fn test_order_serialization_round_trips() {
        let order = persisted_order(OrderStatus::Confirmed);
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
