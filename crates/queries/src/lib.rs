//! Read side of the ordering system.
//!
//! This crate provides [`OrderQueries`], the query service the HTTP
//! surface reads through: single-order lookups, filtered listings, and
//! the count and revenue aggregates. Every query goes straight to the
//! order store; there is no caching layer.

pub mod error;
pub mod orders;

pub use error::{QueryError, Result};
pub use orders::OrderQueries;
