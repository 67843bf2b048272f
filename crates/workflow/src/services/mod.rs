//! Collaborator contracts and in-memory implementations.

pub mod menu;
pub mod users;

pub use menu::{InMemoryMenuCatalog, MenuItem, MenuLookup};
pub use users::{InMemoryUserDirectory, UserDirectory};
