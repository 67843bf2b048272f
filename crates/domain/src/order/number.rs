//! Order number generation.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use super::OrderNumber;

/// Produces unique order numbers.
///
/// Injected into the workflow so production gets collision-safe numbers
/// while tests can supply a deterministic sequence.
pub trait OrderNumberGenerator: Send + Sync {
    /// Returns the next order number.
    fn next(&self) -> OrderNumber;
}

/// Production generator backed by random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidOrderNumberGenerator;

impl UuidOrderNumberGenerator {
    /// Creates a new UUID-backed generator.
    pub fn new() -> Self {
        Self
    }
}

impl OrderNumberGenerator for UuidOrderNumberGenerator {
    fn next(&self) -> OrderNumber {
        OrderNumber::new(format!("ORD-{}", Uuid::new_v4().simple()))
    }
}

/// Deterministic generator counting up from ORD-0001.
#[derive(Debug, Default)]
pub struct SequentialOrderNumberGenerator {
    counter: AtomicU64,
}

impl SequentialOrderNumberGenerator {
    /// Creates a new sequential generator starting at one.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderNumberGenerator for SequentialOrderNumberGenerator {
    fn next(&self) -> OrderNumber {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        OrderNumber::new(format!("ORD-{n:04}"))
    }
}
