//! The inventory store: canonical table capacity and booking state.
//!
//! [`Inventory`] owns the mutable reservation state behind a single mutex.
//! Every mutating operation performs its checks and its mutation inside one
//! critical section, so concurrent callers can never both observe enough
//! free tables and both succeed when only one fits.
//!
//! The store enforces structural invariants only. Business rules (seat
//! packing, percentage caps, request validation) live in
//! [`crate::policy`].
//!
//! # Examples
//!
//! ```
//! use tablebook::{BookingId, Inventory};
//!
//! let inventory = Inventory::new();
//! inventory.initialize(10, 0).unwrap();
//!
//! let id = BookingId::try_from("BOOKING-1-SSSSSSSSSS").unwrap();
//! let remaining = inventory.add_booking(id.clone(), 3, 12, "123").unwrap();
//! assert_eq!(remaining, 7);
//!
//! let released = inventory.release_booking(&id).unwrap();
//! assert_eq!(released.freed_tables, 3);
//! assert_eq!(released.remaining_tables, 10);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::booking::{Booking, BookingId};
use crate::error::{Error, Result};

#[cfg(test)]
mod proptests;

/// State guarded by the inventory lock.
#[derive(Debug, Default)]
struct InventoryState {
    total_tables: u32,
    available_tables: u32,
    max_seats_per_reservation: u32,
    cap_enabled: bool,
    initialized: bool,
    bookings: HashMap<BookingId, Booking>,
}

impl InventoryState {
    fn reserved_tables(&self) -> u64 {
        self.bookings
            .values()
            .map(|b| u64::from(b.tables_reserved()))
            .sum()
    }

    fn is_consistent(&self) -> bool {
        if !self.initialized {
            return self.bookings.is_empty() && self.available_tables == 0;
        }
        self.available_tables <= self.total_tables
            && u64::from(self.available_tables) + self.reserved_tables()
                == u64::from(self.total_tables)
    }
}

/// A point-in-time copy of the inventory counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InventorySnapshot {
    /// Whether the inventory has been initialized.
    pub initialized: bool,
    /// Total tables in the restaurant.
    pub total_tables: u32,
    /// Tables not held by any booking.
    pub available_tables: u32,
    /// Per-reservation customer cap (0 when disabled).
    pub max_reserve_seats: u32,
    /// Number of live bookings.
    pub booking_count: usize,
}

/// Tables returned to the pool by [`Inventory::release_booking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleasedTables {
    /// Tables the booking held.
    pub freed_tables: u32,
    /// Free tables right after the release.
    pub remaining_tables: u32,
}

/// The inventory store.
///
/// One instance is owned by the composition root and shared by reference
/// with the reservation policy and any other caller.
#[derive(Debug, Default)]
pub struct Inventory {
    state: Mutex<InventoryState>,
}

impl Inventory {
    /// Creates an uninitialized inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, InventoryState>> {
        Ok(self.state.lock()?)
    }

    /// Initializes the table count and per-reservation cap.
    ///
    /// A `max_seats_per_reservation` of zero disables the cap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] on a second call without an
    /// intervening [`reset`](Self::reset), or [`Error::InvalidParameters`]
    /// when `total_tables` is zero.
    pub fn initialize(&self, total_tables: u32, max_seats_per_reservation: u32) -> Result<()> {
        let mut state = self.lock()?;
        if state.initialized {
            return Err(Error::AlreadyInitialized);
        }
        if total_tables == 0 {
            return Err(Error::InvalidParameters {
                reason: "total_tables must be greater than 0".into(),
            });
        }

        state.total_tables = total_tables;
        state.available_tables = total_tables;
        state.max_seats_per_reservation = max_seats_per_reservation;
        state.cap_enabled = max_seats_per_reservation > 0;
        state.initialized = true;

        log::debug!(
            "inventory initialized: {total_tables} tables, cap {max_seats_per_reservation}"
        );
        Ok(())
    }

    /// Stores a booking and takes its tables out of the free pool.
    ///
    /// The capacity check and the mutation happen under the same lock; on
    /// failure nothing changes. Returns the free tables left by this booking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`], [`Error::InsufficientCapacity`] when
    /// `tables_needed` exceeds the free tables, [`Error::DuplicateBooking`]
    /// when the id is already stored, or [`Error::InvalidParameters`] when
    /// `tables_needed` is zero.
    pub fn add_booking(
        &self,
        booking_id: BookingId,
        tables_needed: u32,
        customer_count: u32,
        contact_no: &str,
    ) -> Result<u32> {
        let mut state = self.lock()?;
        if !state.initialized {
            return Err(Error::NotInitialized);
        }
        if tables_needed == 0 {
            return Err(Error::InvalidParameters {
                reason: "a booking must hold at least one table".into(),
            });
        }
        if tables_needed > state.available_tables {
            return Err(Error::InsufficientCapacity {
                requested: tables_needed,
                available: state.available_tables,
            });
        }
        if state.bookings.contains_key(&booking_id) {
            return Err(Error::DuplicateBooking {
                booking_id: booking_id.into_string(),
            });
        }

        state.available_tables -= tables_needed;
        let booking = Booking::new(booking_id.clone(), tables_needed, customer_count, contact_no);
        state.bookings.insert(booking_id, booking);
        Ok(state.available_tables)
    }

    /// Returns a copy of the booking with the given id, if any.
    #[must_use]
    pub fn retrieve_booking(&self, booking_id: &BookingId) -> Option<Booking> {
        self.read(|s| s.bookings.get(booking_id).cloned())
    }

    /// Removes a booking and returns its tables to the free pool.
    ///
    /// Returns the tables freed and the free count right after the release.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BookingNotFound`] when no booking has the id.
    pub fn release_booking(&self, booking_id: &BookingId) -> Result<ReleasedTables> {
        let mut state = self.lock()?;
        let booking = state
            .bookings
            .remove(booking_id)
            .ok_or_else(|| Error::BookingNotFound {
                booking_id: booking_id.to_string(),
            })?;

        let freed_tables = booking.tables_reserved();
        state.available_tables += freed_tables;
        Ok(ReleasedTables {
            freed_tables,
            remaining_tables: state.available_tables,
        })
    }

    /// Returns the number of free tables.
    #[must_use]
    pub fn available_count(&self) -> u32 {
        self.read(|s| s.available_tables)
    }

    /// Returns the total number of tables.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.read(|s| s.total_tables)
    }

    /// Returns the per-reservation customer cap (0 when disabled).
    #[must_use]
    pub fn cap_value(&self) -> u32 {
        self.read(|s| s.max_seats_per_reservation)
    }

    /// Returns whether [`initialize`](Self::initialize) has succeeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.read(|s| s.initialized)
    }

    /// Returns whether the per-reservation cap is enforced.
    #[must_use]
    pub fn cap_enabled(&self) -> bool {
        self.read(|s| s.cap_enabled)
    }

    /// Returns a consistent copy of all counters.
    #[must_use]
    pub fn snapshot(&self) -> InventorySnapshot {
        self.read(|s| InventorySnapshot {
            initialized: s.initialized,
            total_tables: s.total_tables,
            available_tables: s.available_tables,
            max_reserve_seats: s.max_seats_per_reservation,
            booking_count: s.bookings.len(),
        })
    }

    /// Returns all live bookings ordered by id.
    #[must_use]
    pub fn bookings(&self) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self.read(|s| s.bookings.values().cloned().collect());
        bookings.sort_by(|a, b| a.booking_id().cmp(b.booking_id()));
        bookings
    }

    /// Checks that free plus reserved tables add up to the total.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.read(InventoryState::is_consistent)
    }

    /// Clears all state back to the uninitialized condition.
    ///
    /// Intended for test harnesses and administrative tooling.
    pub fn reset(&self) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *state = InventoryState::default();
        self.state.clear_poison();
    }

    // Mutations finish their checks before writing, so a poisoned lock
    // still guards consistent state.
    fn read<T>(&self, f: impl FnOnce(&InventoryState) -> T) -> T {
        let state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&state)
    }
}
