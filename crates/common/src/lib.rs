pub mod types;

pub use types::{MenuItemId, OrderId, OrderItemId, UserId};
