//! Order workflow engine.
//!
//! This crate drives the write side of the ordering system. Placing an
//! order runs these steps:
//! 1. Validate the request shape
//! 2. Confirm the user exists
//! 3. Resolve every line against the menu, freezing names and prices
//! 4. Persist the order and all of its items in one transaction
//!
//! Status changes and cancellation go through the same engine, which
//! checks the forward-only status machine before touching the store.

pub mod engine;
pub mod error;
pub mod services;

pub use engine::OrderWorkflow;
pub use error::WorkflowError;
pub use services::{
    InMemoryMenuCatalog, InMemoryUserDirectory, MenuItem, MenuLookup, UserDirectory,
};
