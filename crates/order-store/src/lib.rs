//! Order persistence layer.
//!
//! Provides the [`OrderStore`] trait along with a PostgreSQL-backed
//! implementation for production and an in-memory implementation for tests
//! and standalone runs. The store owns numeric ID assignment, order number
//! uniqueness and the guarded status update.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use store::OrderStore;
