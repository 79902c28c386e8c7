#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tablebook
//!
//! A library for managing table reservations in a single restaurant.
//!
//! The restaurant is initialized once with a fixed number of four-seat
//! tables and an optional per-reservation customer cap. Parties then reserve
//! whole tables and may cancel by booking id. The table count is conserved:
//! free tables plus reserved tables always equals the total.
//!
//! ## Core Types
//!
//! - [`Inventory`]: Thread-safe table and booking store
//! - [`ReservationPolicy`]: Validation and reservation rules over an inventory
//! - [`Booking`] and [`BookingId`]: A live reservation and its identifier
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//! - [`Config`] and [`ConfigBuilder`]: Layered YAML configuration
//!
//! ## Examples
//!
//! ```
//! use tablebook::{Inventory, ReservationPolicy};
//!
//! let inventory = Inventory::new();
//! let policy = ReservationPolicy::new(&inventory);
//!
//! policy.initialize_tables(Some(10), None).unwrap();
//! let booking = policy.reserve_tables(Some(5), Some("555-0100")).unwrap();
//! assert_eq!(booking.tables_reserved, 2);
//! assert_eq!(inventory.available_count(), 8);
//! ```

pub mod booking;
pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod output;
pub mod policy;

// Re-export key types at crate root for convenience
pub use booking::{Booking, BookingId, BookingIdSource, TimestampedIdSource, SEATS_PER_TABLE};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use error::{Error, Result};
pub use inventory::{Inventory, InventorySnapshot, ReleasedTables};
pub use logging::{init_logger, LogLevel, Logger};
pub use output::{OutputFormatter, Response};
pub use policy::{CancelResult, InitializeResult, ReservationPolicy, ReserveResult};
