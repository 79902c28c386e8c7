//! Common test utilities for integration tests.
//!
//! Helpers for building initialized inventories and deterministic booking
//! ids.

use std::sync::atomic::{AtomicU64, Ordering};

use tablebook::{BookingId, BookingIdSource, Inventory, ReservationPolicy};

/// Creates an inventory initialized through the policy.
#[allow(dead_code)]
pub fn initialized_inventory(table_count: i64, percentage: Option<f64>) -> Inventory {
    let inventory = Inventory::new();
    ReservationPolicy::new(&inventory)
        .initialize_tables(Some(table_count), percentage)
        .expect("failed to initialize test inventory");
    inventory
}

/// Id source yielding `TEST-1`, `TEST-2`, ...
#[allow(dead_code)]
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

#[allow(dead_code)]
impl SequentialIds {
    /// Creates a source yielding `<prefix>-1`, `<prefix>-2`, ...
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::with_prefix("TEST")
    }
}

impl BookingIdSource for SequentialIds {
    fn next_id(&self) -> BookingId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        BookingId::try_from(format!("{}-{n}", self.prefix)).expect("generated id is never blank")
    }
}

/// Asserts the table conservation law on `inventory`.
#[allow(dead_code)]
pub fn assert_conserved(inventory: &Inventory) {
    let reserved: u32 = inventory
        .bookings()
        .iter()
        .map(tablebook::Booking::tables_reserved)
        .sum();
    assert_eq!(
        inventory.available_count() + reserved,
        inventory.total_count(),
        "available + reserved must equal total"
    );
    assert!(inventory.is_consistent());
}
