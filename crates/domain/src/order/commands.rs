//! Order creation command.

use common::{MenuItemId, UserId};
use serde::{Deserialize, Serialize};

use super::{OrderError, OrderType};

/// One requested (menu item, quantity) pairing, before prices are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The menu item being ordered.
    pub menu_item_id: MenuItemId,

    /// Quantity requested.
    pub quantity: u32,
}

impl OrderLine {
    /// Creates a new order line.
    pub fn new(menu_item_id: MenuItemId, quantity: u32) -> Self {
        Self {
            menu_item_id,
            quantity,
        }
    }
}

/// Command to create a new order.
///
/// Carries everything the customer submits; names and prices come from the
/// menu catalog when the command is executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrder {
    /// The user placing the order.
    pub user_id: UserId,

    /// How the order reaches the customer, if specified.
    pub order_type: Option<OrderType>,

    /// Address the order ships to.
    pub delivery_address: String,

    /// Contact number for the courier.
    pub phone_number: String,

    /// Free-form notes from the customer.
    pub special_instructions: Option<String>,

    /// Requested lines.
    pub lines: Vec<OrderLine>,
}

impl CreateOrder {
    /// Creates a new CreateOrder command.
    pub fn new(
        user_id: UserId,
        delivery_address: impl Into<String>,
        phone_number: impl Into<String>,
        lines: Vec<OrderLine>,
    ) -> Self {
        Self {
            user_id,
            order_type: None,
            delivery_address: delivery_address.into(),
            phone_number: phone_number.into(),
            special_instructions: None,
            lines,
        }
    }

    /// Sets the order type.
    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    /// Sets the special instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.special_instructions = Some(instructions.into());
        self
    }

    /// Validates the command shape before any catalog or user lookups run.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.delivery_address.trim().is_empty() {
            return Err(OrderError::MissingField {
                field: "delivery_address",
            });
        }
        if self.phone_number.trim().is_empty() {
            return Err(OrderError::MissingField {
                field: "phone_number",
            });
        }
        if self.lines.is_empty() {
            return Err(OrderError::NoItems);
        }
        for line in &self.lines {
            if line.quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    quantity: line.quantity,
                });
            }
        }
        Ok(())
    }
}
