//! Reservation policy: business rules on top of the inventory store.
//!
//! The policy validates caller input, converts party sizes into whole
//! tables ([`SEATS_PER_TABLE`] seats each), enforces the optional
//! per-reservation cap, and drives the [`Inventory`]. Input is validated
//! before the store is touched, so a rejected request never mutates state.
//!
//! # Examples
//!
//! ```
//! use tablebook::{Error, Inventory, ReservationPolicy};
//!
//! let inventory = Inventory::new();
//! let policy = ReservationPolicy::new(&inventory);
//!
//! let init = policy.initialize_tables(Some(100), Some(0.8)).unwrap();
//! assert_eq!(init.max_reserve_seats, 80);
//!
//! let booking = policy.reserve_tables(Some(12), Some("123")).unwrap();
//! assert_eq!(booking.tables_reserved, 3);
//! assert_eq!(booking.remaining_tables, 97);
//!
//! let err = policy.reserve_tables(Some(81), Some("x")).unwrap_err();
//! assert!(matches!(err, Error::ReservationExceedsLimit { max_reserve_seats: 80 }));
//!
//! let cancel = policy.cancel_booking(Some(booking.booking_id.as_str())).unwrap();
//! assert_eq!(cancel.remaining_tables, 100);
//! ```

use serde::Serialize;

use crate::booking::{tables_for, Booking, BookingId, BookingIdSource, TimestampedIdSource};
use crate::error::{Error, Result};
use crate::inventory::{Inventory, InventorySnapshot, ReleasedTables};

pub use crate::booking::SEATS_PER_TABLE;

/// Outcome of a successful table initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InitializeResult {
    /// Total tables now managed.
    pub table_count: u32,
    /// Per-reservation customer cap (0 when disabled).
    pub max_reserve_seats: u32,
}

/// Outcome of a successful reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReserveResult {
    /// The new booking's id.
    pub booking_id: BookingId,
    /// Tables taken by the booking.
    #[serde(rename = "table_reserved_count")]
    pub tables_reserved: u32,
    /// Free tables after the booking.
    #[serde(rename = "remaining_tables_count")]
    pub remaining_tables: u32,
}

/// Outcome of a successful cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CancelResult {
    /// Tables returned to the pool.
    #[serde(rename = "freed_tables_count")]
    pub freed_tables: u32,
    /// Free tables after the cancellation.
    #[serde(rename = "remaining_table_count")]
    pub remaining_tables: u32,
}

/// Applies reservation rules to a borrowed [`Inventory`].
pub struct ReservationPolicy<'a> {
    inventory: &'a Inventory,
    ids: Box<dyn BookingIdSource>,
}

impl<'a> ReservationPolicy<'a> {
    /// Creates a policy that generates ids with [`TimestampedIdSource`].
    #[must_use]
    pub fn new(inventory: &'a Inventory) -> Self {
        Self {
            inventory,
            ids: Box::new(TimestampedIdSource::default()),
        }
    }

    /// Replaces the booking id source.
    #[must_use]
    pub fn with_id_source(mut self, source: impl BookingIdSource + 'static) -> Self {
        self.ids = Box::new(source);
        self
    }

    /// Returns the inventory this policy drives.
    #[must_use]
    pub const fn inventory(&self) -> &'a Inventory {
        self.inventory
    }

    /// Initializes the inventory with `table_count` tables.
    ///
    /// When `max_allowed_percentage` is given, the per-reservation cap is
    /// `floor(table_count * max_allowed_percentage)` customers; when it is
    /// omitted, or floors to zero, the cap is disabled.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyInitialized`] if the inventory is already set up
    /// - [`Error::InvalidTableCount`] unless `table_count` is a positive integer
    /// - [`Error::InvalidPercentage`] unless the percentage is in `(0, 1]`
    pub fn initialize_tables(
        &self,
        table_count: Option<i64>,
        max_allowed_percentage: Option<f64>,
    ) -> Result<InitializeResult> {
        log::info!(
            "initializing tables: count={table_count:?} max_allowed_percentage={max_allowed_percentage:?}"
        );

        if self.inventory.is_initialized() {
            log::warn!("tables are already initialized");
            return Err(Error::AlreadyInitialized);
        }

        let table_count = table_count
            .and_then(|count| u32::try_from(count).ok())
            .filter(|&count| count > 0)
            .ok_or_else(|| {
                log::warn!("invalid table count: {table_count:?}");
                Error::InvalidTableCount
            })?;

        let max_reserve_seats = match max_allowed_percentage {
            Some(percentage) => reserve_seats_for(table_count, percentage)?,
            None => 0,
        };

        self.inventory.initialize(table_count, max_reserve_seats)?;
        log::info!("tables initialized: count={table_count} max_reserve_seats={max_reserve_seats}");

        Ok(InitializeResult {
            table_count,
            max_reserve_seats,
        })
    }

    /// Reserves whole tables for a party of `customer_count`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingParameters`] if either argument is absent
    /// - [`Error::NotInitialized`] if the inventory is not set up
    /// - [`Error::InvalidCustomerCount`] unless the count is a positive integer
    /// - [`Error::ReservationExceedsLimit`] if the party exceeds an active cap
    /// - [`Error::InsufficientCapacity`] if not enough tables are free
    pub fn reserve_tables(
        &self,
        customer_count: Option<i64>,
        contact_no: Option<&str>,
    ) -> Result<ReserveResult> {
        let (Some(customer_count), Some(contact_no)) = (customer_count, contact_no) else {
            let parameter = if customer_count.is_none() {
                "number_of_customers"
            } else {
                "contact_no"
            };
            return Err(Error::MissingParameters { parameter });
        };

        if !self.inventory.is_initialized() {
            return Err(Error::NotInitialized);
        }

        let customer_count = u32::try_from(customer_count)
            .ok()
            .filter(|&count| count > 0)
            .ok_or(Error::InvalidCustomerCount)?;

        if self.inventory.cap_enabled() {
            let max_reserve_seats = self.inventory.cap_value();
            if customer_count > max_reserve_seats {
                log::warn!(
                    "rejected reservation of {customer_count} customers: cap is {max_reserve_seats}"
                );
                return Err(Error::ReservationExceedsLimit { max_reserve_seats });
            }
        }

        let tables_needed = tables_for(customer_count);
        let available = self.inventory.available_count();
        if tables_needed > available {
            log::warn!("rejected reservation needing {tables_needed} tables: {available} free");
            return Err(Error::InsufficientCapacity {
                requested: tables_needed,
                available,
            });
        }

        let booking_id = self.ids.next_id();
        let remaining_tables = self.inventory.add_booking(
            booking_id.clone(),
            tables_needed,
            customer_count,
            contact_no,
        )?;
        log::info!(
            "reserved {tables_needed} table(s) for {customer_count} customer(s) as {booking_id}; {remaining_tables} remaining"
        );

        Ok(ReserveResult {
            booking_id,
            tables_reserved: tables_needed,
            remaining_tables,
        })
    }

    /// Cancels a booking and returns its tables to the pool.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingParameters`] if the id is absent or blank
    /// - [`Error::NotInitialized`] if the inventory is not set up
    /// - [`Error::BookingNotFound`] if no booking has the id
    pub fn cancel_booking(&self, booking_id: Option<&str>) -> Result<CancelResult> {
        let booking_id = BookingId::try_from(booking_id.unwrap_or_default())?;

        if !self.inventory.is_initialized() {
            return Err(Error::NotInitialized);
        }

        let released = self.inventory.release_booking(&booking_id)?;
        let ReleasedTables {
            freed_tables,
            remaining_tables,
        } = released;
        log::info!(
            "cancelled {booking_id}: freed {freed_tables} table(s); {remaining_tables} remaining"
        );

        Ok(CancelResult {
            freed_tables,
            remaining_tables,
        })
    }

    /// Looks up a live booking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameters`], [`Error::NotInitialized`] or
    /// [`Error::BookingNotFound`] like [`cancel_booking`](Self::cancel_booking).
    pub fn booking(&self, booking_id: &str) -> Result<Booking> {
        let booking_id = BookingId::try_from(booking_id)?;
        if !self.inventory.is_initialized() {
            return Err(Error::NotInitialized);
        }
        self.inventory
            .retrieve_booking(&booking_id)
            .ok_or_else(|| Error::BookingNotFound {
                booking_id: booking_id.into_string(),
            })
    }

    /// Returns the current inventory counters.
    #[must_use]
    pub fn status(&self) -> InventorySnapshot {
        self.inventory.snapshot()
    }
}

/// Converts a cap percentage into a per-reservation seat count.
///
/// A result of zero leaves the cap disabled.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn reserve_seats_for(table_count: u32, percentage: f64) -> Result<u32> {
    if !(percentage > 0.0 && percentage <= 1.0) {
        log::warn!("invalid max allowed percentage: {percentage}");
        return Err(Error::InvalidPercentage {
            reason: format!("{percentage} is not in (0, 1]"),
        });
    }

    Ok((f64::from(table_count) * percentage).floor() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::MockBookingIdSource;

    fn setup(total: i64, percentage: Option<f64>) -> Inventory {
        let inventory = Inventory::new();
        ReservationPolicy::new(&inventory)
            .initialize_tables(Some(total), percentage)
            .unwrap();
        inventory
    }

    #[test]
    fn test_initialize_with_percentage() {
        let inventory = Inventory::new();
        let policy = ReservationPolicy::new(&inventory);
        let result = policy.initialize_tables(Some(66), Some(0.2)).unwrap();
        assert_eq!(
            result,
            InitializeResult {
                table_count: 66,
                max_reserve_seats: 13,
            }
        );
        assert!(inventory.cap_enabled());
    }

    #[test]
    fn test_initialize_without_percentage_disables_cap() {
        let inventory = Inventory::new();
        let policy = ReservationPolicy::new(&inventory);
        let result = policy.initialize_tables(Some(10), None).unwrap();
        assert_eq!(result.max_reserve_seats, 0);
        assert!(!inventory.cap_enabled());
    }

    #[test]
    fn test_initialize_full_percentage() {
        let inventory = Inventory::new();
        let policy = ReservationPolicy::new(&inventory);
        let result = policy.initialize_tables(Some(10), Some(1.0)).unwrap();
        assert_eq!(result.max_reserve_seats, 10);
    }

    #[test]
    fn test_initialize_rejects_bad_table_counts() {
        let inventory = Inventory::new();
        let policy = ReservationPolicy::new(&inventory);
        for count in [None, Some(0), Some(-3), Some(i64::from(u32::MAX) + 1)] {
            let err = policy.initialize_tables(count, None).unwrap_err();
            assert!(matches!(err, Error::InvalidTableCount), "{count:?}");
        }
        assert!(!inventory.is_initialized());
    }

    #[test]
    fn test_initialize_rejects_bad_percentages() {
        let inventory = Inventory::new();
        let policy = ReservationPolicy::new(&inventory);
        for p in [0.0, -0.5, 1.01, f64::NAN, f64::INFINITY] {
            let err = policy.initialize_tables(Some(10), Some(p)).unwrap_err();
            assert!(matches!(err, Error::InvalidPercentage { .. }), "{p}");
        }
        assert!(!inventory.is_initialized());
    }

    #[test]
    fn test_initialize_percentage_flooring_to_zero_disables_cap() {
        let inventory = Inventory::new();
        let policy = ReservationPolicy::new(&inventory);
        let result = policy.initialize_tables(Some(3), Some(0.2)).unwrap();
        assert_eq!(
            result,
            InitializeResult {
                table_count: 3,
                max_reserve_seats: 0,
            }
        );
        assert!(inventory.is_initialized());
        assert!(!inventory.cap_enabled());

        let booked = policy.reserve_tables(Some(12), Some("1")).unwrap();
        assert_eq!(booked.tables_reserved, 3);
    }

    #[test]
    fn test_initialize_twice_reports_already_initialized_first() {
        let inventory = setup(100, Some(0.8));
        let policy = ReservationPolicy::new(&inventory);
        let err = policy.initialize_tables(Some(-1), Some(7.0)).unwrap_err();
        assert!(matches!(err, Error::AlreadyInitialized));
        assert_eq!(inventory.total_count(), 100);
        assert_eq!(inventory.cap_value(), 80);
    }

    #[test]
    fn test_reserve_missing_parameters() {
        let inventory = setup(10, None);
        let policy = ReservationPolicy::new(&inventory);

        let err = policy.reserve_tables(None, Some("1")).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParameters {
                parameter: "number_of_customers"
            }
        ));

        let err = policy.reserve_tables(Some(2), None).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParameters {
                parameter: "contact_no"
            }
        ));
    }

    #[test]
    fn test_reserve_before_initialize() {
        let inventory = Inventory::new();
        let policy = ReservationPolicy::new(&inventory);
        let err = policy.reserve_tables(Some(2), Some("1")).unwrap_err();
        assert!(matches!(err, Error::NotInitialized));
    }

    #[test]
    fn test_reserve_invalid_customer_count() {
        let inventory = setup(10, None);
        let policy = ReservationPolicy::new(&inventory);
        for count in [0, -1, i64::MAX] {
            let err = policy.reserve_tables(Some(count), Some("1")).unwrap_err();
            assert!(matches!(err, Error::InvalidCustomerCount), "{count}");
        }
        assert_eq!(inventory.available_count(), 10);
    }

    #[test]
    fn test_reserve_ceiling_rule() {
        let inventory = setup(100, None);
        let policy = ReservationPolicy::new(&inventory);
        assert_eq!(policy.reserve_tables(Some(12), Some("1")).unwrap().tables_reserved, 3);
        assert_eq!(policy.reserve_tables(Some(13), Some("1")).unwrap().tables_reserved, 4);
        assert_eq!(policy.reserve_tables(Some(1), Some("1")).unwrap().tables_reserved, 1);
        assert_eq!(inventory.available_count(), 92);
    }

    #[test]
    fn test_reserve_cap_boundary() {
        let inventory = setup(100, Some(0.8));
        let policy = ReservationPolicy::new(&inventory);

        let err = policy.reserve_tables(Some(81), Some("x")).unwrap_err();
        assert!(matches!(
            err,
            Error::ReservationExceedsLimit {
                max_reserve_seats: 80
            }
        ));
        assert_eq!(inventory.available_count(), 100);

        let ok = policy.reserve_tables(Some(80), Some("x")).unwrap();
        assert_eq!(ok.tables_reserved, 20);
        assert_eq!(ok.remaining_tables, 80);
    }

    #[test]
    fn test_reserve_capacity_exhaustion() {
        let inventory = setup(100, None);
        let policy = ReservationPolicy::new(&inventory);
        let err = policy.reserve_tables(Some(500), Some("x")).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientCapacity {
                requested: 125,
                available: 100
            }
        ));
        assert_eq!(inventory.available_count(), 100);
    }

    #[test]
    fn test_reserve_uses_id_source() {
        let inventory = setup(10, None);
        let mut source = MockBookingIdSource::new();
        source
            .expect_next_id()
            .times(1)
            .returning(|| BookingId::try_from("BOOKING-FIXED").unwrap());
        let policy = ReservationPolicy::new(&inventory).with_id_source(source);

        let result = policy.reserve_tables(Some(4), Some("555")).unwrap();
        assert_eq!(result.booking_id.as_str(), "BOOKING-FIXED");
        assert_eq!(policy.booking("BOOKING-FIXED").unwrap().contact_no(), "555");
    }

    #[test]
    fn test_reserve_with_colliding_id_source_is_rejected() {
        let inventory = setup(10, None);
        let mut source = MockBookingIdSource::new();
        source
            .expect_next_id()
            .times(2)
            .returning(|| BookingId::try_from("BOOKING-SAME").unwrap());
        let policy = ReservationPolicy::new(&inventory).with_id_source(source);

        policy.reserve_tables(Some(4), Some("1")).unwrap();
        let err = policy.reserve_tables(Some(4), Some("2")).unwrap_err();
        assert!(matches!(err, Error::DuplicateBooking { .. }));
        assert_eq!(inventory.available_count(), 9);
        assert!(inventory.is_consistent());
    }

    #[test]
    fn test_cancel_round_trip() {
        let inventory = setup(20, None);
        let policy = ReservationPolicy::new(&inventory);
        let reserved = policy.reserve_tables(Some(9), Some("1")).unwrap();
        assert_eq!(reserved.remaining_tables, 17);

        let cancelled = policy
            .cancel_booking(Some(reserved.booking_id.as_str()))
            .unwrap();
        assert_eq!(
            cancelled,
            CancelResult {
                freed_tables: 3,
                remaining_tables: 20,
            }
        );
    }

    #[test]
    fn test_cancel_errors() {
        let uninitialized = Inventory::new();
        let policy = ReservationPolicy::new(&uninitialized);
        assert!(matches!(
            policy.cancel_booking(None).unwrap_err(),
            Error::MissingParameters { .. }
        ));
        assert!(matches!(
            policy.cancel_booking(Some("NOPE")).unwrap_err(),
            Error::NotInitialized
        ));

        let inventory = setup(10, None);
        let policy = ReservationPolicy::new(&inventory);
        assert!(matches!(
            policy.cancel_booking(Some("")).unwrap_err(),
            Error::MissingParameters { .. }
        ));
        assert!(matches!(
            policy.cancel_booking(Some("NOPE")).unwrap_err(),
            Error::BookingNotFound { .. }
        ));
        assert_eq!(inventory.available_count(), 10);
    }

    #[test]
    fn test_booking_lookup() {
        let inventory = setup(10, None);
        let policy = ReservationPolicy::new(&inventory);
        let reserved = policy.reserve_tables(Some(6), Some("42")).unwrap();

        let booking = policy.booking(reserved.booking_id.as_str()).unwrap();
        assert_eq!(booking.customer_count(), 6);
        assert_eq!(booking.tables_reserved(), 2);
        assert!(matches!(
            policy.booking("missing").unwrap_err(),
            Error::BookingNotFound { .. }
        ));
    }

    #[test]
    fn test_status() {
        let inventory = setup(10, Some(0.5));
        let policy = ReservationPolicy::new(&inventory);
        policy.reserve_tables(Some(5), Some("1")).unwrap();
        let status = policy.status();
        assert_eq!(status.total_tables, 10);
        assert_eq!(status.available_tables, 8);
        assert_eq!(status.max_reserve_seats, 5);
        assert_eq!(status.booking_count, 1);
    }

    #[test]
    fn test_results_serialize_with_wire_names() {
        let reserve = ReserveResult {
            booking_id: BookingId::try_from("B-1").unwrap(),
            tables_reserved: 3,
            remaining_tables: 97,
        };
        let json = serde_json::to_value(&reserve).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "booking_id": "B-1",
                "table_reserved_count": 3,
                "remaining_tables_count": 97
            })
        );

        let cancel = CancelResult {
            freed_tables: 3,
            remaining_tables: 100,
        };
        let json = serde_json::to_value(cancel).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"freed_tables_count": 3, "remaining_table_count": 100})
        );

        let init = InitializeResult {
            table_count: 100,
            max_reserve_seats: 80,
        };
        let json = serde_json::to_value(init).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"table_count": 100, "max_reserve_seats": 80})
        );
    }
}
