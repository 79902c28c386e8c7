//! Booking records and booking identifiers.
//!
//! A [`Booking`] is created by the reservation policy when tables are
//! allocated and destroyed when the booking is cancelled. Identifiers are
//! produced by a [`BookingIdSource`]; the default [`TimestampedIdSource`]
//! yields ids of the form `BOOKING-<epoch millis>-<10 random symbols>`.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of customers seated at a single table.
pub const SEATS_PER_TABLE: u32 = 4;

/// Symbols used for the random suffix of generated booking ids.
const SUFFIX_ALPHABET: &[u8] = b"SIPMWTCLTD195876";

/// Length of the random suffix of generated booking ids.
const SUFFIX_LEN: usize = 10;

/// Default leading word of generated booking ids.
pub const DEFAULT_PREFIX: &str = "BOOKING";

/// Returns how many whole tables a party of `customer_count` occupies.
///
/// # Examples
///
/// ```
/// use tablebook::booking::tables_for;
///
/// assert_eq!(tables_for(12), 3);
/// assert_eq!(tables_for(13), 4);
/// assert_eq!(tables_for(1), 1);
/// ```
#[must_use]
pub const fn tables_for(customer_count: u32) -> u32 {
    customer_count.div_ceil(SEATS_PER_TABLE)
}

/// A unique booking identifier.
///
/// # Examples
///
/// ```
/// use tablebook::BookingId;
///
/// let id = BookingId::try_from("BOOKING-1-SIPMWTCLTD").unwrap();
/// assert_eq!(id.as_str(), "BOOKING-1-SIPMWTCLTD");
///
/// assert!(BookingId::try_from("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id, returning the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for BookingId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_from(value.to_string())
    }
}

impl TryFrom<String> for BookingId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        if value.trim().is_empty() {
            return Err(Error::MissingParameters {
                parameter: "booking_id",
            });
        }
        Ok(Self(value))
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BookingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A confirmed reservation consuming a whole number of tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    booking_id: BookingId,
    tables_reserved: u32,
    customer_count: u32,
    contact_no: String,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a booking record stamped with the current time.
    #[must_use]
    pub fn new(
        booking_id: BookingId,
        tables_reserved: u32,
        customer_count: u32,
        contact_no: impl Into<String>,
    ) -> Self {
        Self {
            booking_id,
            tables_reserved,
            customer_count,
            contact_no: contact_no.into(),
            created_at: Utc::now(),
        }
    }

    /// Returns the booking id.
    #[must_use]
    pub const fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    /// Returns how many tables the booking holds.
    #[must_use]
    pub const fn tables_reserved(&self) -> u32 {
        self.tables_reserved
    }

    /// Returns the party size.
    #[must_use]
    pub const fn customer_count(&self) -> u32 {
        self.customer_count
    }

    /// Returns the contact number as supplied by the caller.
    #[must_use]
    pub fn contact_no(&self) -> &str {
        &self.contact_no
    }

    /// Returns when the booking was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Produces fresh booking identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait BookingIdSource: Send + Sync {
    /// Returns an id that has never been returned before.
    fn next_id(&self) -> BookingId;
}

/// Generates `<prefix>-<epoch millis>-<random suffix>` ids.
///
/// # Examples
///
/// ```
/// use tablebook::booking::{BookingIdSource, TimestampedIdSource};
///
/// let source = TimestampedIdSource::default();
/// let id = source.next_id();
/// assert!(id.as_str().starts_with("BOOKING-"));
/// ```
#[derive(Debug, Clone)]
pub struct TimestampedIdSource {
    prefix: String,
}

impl TimestampedIdSource {
    /// Creates a source using the given leading word.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the leading word of generated ids.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn random_suffix() -> String {
        let mut rng = rand::thread_rng();
        (0..SUFFIX_LEN)
            .map(|_| char::from(SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())]))
            .collect()
    }
}

impl Default for TimestampedIdSource {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl BookingIdSource for TimestampedIdSource {
    fn next_id(&self) -> BookingId {
        BookingId(format!(
            "{}-{}-{}",
            self.prefix,
            Utc::now().timestamp_millis(),
            Self::random_suffix()
        ))
    }
}
