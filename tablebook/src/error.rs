//! Error types for the tablebook library.
//!
//! Every failure is a fresh value of [`Error`]. Each variant carries a stable
//! machine-checkable code (see [`Error::code`]), a transport status
//! (see [`Error::status_code`]) and a human-readable message via `Display`.

use thiserror::Error;

/// Result type alias for operations that may fail with a tablebook error.
///
/// # Examples
///
/// ```
/// use tablebook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the tablebook library.
#[derive(Debug, Error)]
pub enum Error {
    /// The inventory has already been initialized.
    #[error("Tables are already initialized.")]
    AlreadyInitialized,

    /// The requested table count is not a positive integer.
    #[error("Invalid table count.")]
    InvalidTableCount,

    /// The requested percentage is not in `(0, 1]`.
    #[error("Invalid max_allowed_percentage: {reason}")]
    InvalidPercentage {
        /// Why the percentage was rejected.
        reason: String,
    },

    /// The inventory store rejected its initialization parameters.
    #[error("Invalid parameters for initialization: {reason}")]
    InvalidParameters {
        /// Why the parameters were rejected.
        reason: String,
    },

    /// The inventory has not been initialized yet.
    #[error(
        "Tables are not initialized yet, Please ensure to initialize the number of tables first and try again."
    )]
    NotInitialized,

    /// A required request parameter is absent.
    #[error("Missing required parameter '{parameter}'.")]
    MissingParameters {
        /// The first missing parameter.
        parameter: &'static str,
    },

    /// The customer count is not a positive integer.
    #[error("Invalid customer count.")]
    InvalidCustomerCount,

    /// The party is larger than the per-reservation cap.
    #[error(
        "Requested seats exceed the allowed limit per one reservation (max {max_reserve_seats})."
    )]
    ReservationExceedsLimit {
        /// The active per-reservation cap.
        max_reserve_seats: u32,
    },

    /// Not enough free tables for the request.
    #[error("Not enough tables available: requested {requested}, available {available}.")]
    InsufficientCapacity {
        /// Tables the request needed.
        requested: u32,
        /// Tables free at the time of the check.
        available: u32,
    },

    /// No booking exists with the given id.
    #[error("Booking ID '{booking_id}' not found.")]
    BookingNotFound {
        /// The id that did not resolve.
        booking_id: String,
    },

    /// A booking with the given id is already stored.
    #[error("Booking ID '{booking_id}' already exists.")]
    DuplicateBooking {
        /// The colliding id.
        booking_id: String,
    },

    /// An unexpected internal failure.
    #[error("An internal server error occurred: {details}")]
    InternalFault {
        /// Details about the failure.
        details: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Returns the stable, machine-checkable kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::Error;
    ///
    /// assert_eq!(Error::NotInitialized.code(), "TABLES_NOT_INITIALIZED");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized => "TABLES_ALREADY_INITIALIZED",
            Self::InvalidTableCount => "INVALID_TABLE_COUNT",
            Self::InvalidPercentage { .. } => "INVALID_MAX_ALLOWED_PERCENTAGE",
            Self::InvalidParameters { .. } => "INVALID_PARAMETERS",
            Self::NotInitialized => "TABLES_NOT_INITIALIZED",
            Self::MissingParameters { .. } => "MISSING_PARAMETERS",
            Self::InvalidCustomerCount => "INVALID_CUSTOMER_COUNT",
            Self::ReservationExceedsLimit { .. } => "MAX_RESERVATION_EXCEEDED",
            Self::InsufficientCapacity { .. } => "NOT_ENOUGH_TABLES",
            Self::BookingNotFound { .. } => "BOOKING_NOT_FOUND",
            Self::DuplicateBooking { .. } => "DUPLICATE_BOOKING",
            Self::InternalFault { .. } => "INTERNAL_SERVER_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
        }
    }

    /// Returns the transport status a collaborator should answer with.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::Error;
    ///
    /// let err = Error::BookingNotFound { booking_id: "NOPE".into() };
    /// assert_eq!(err.status_code(), 404);
    /// ```
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTableCount
            | Self::InvalidPercentage { .. }
            | Self::InvalidParameters { .. }
            | Self::InvalidCustomerCount
            | Self::MissingParameters { .. }
            | Self::ReservationExceedsLimit { .. }
            | Self::InsufficientCapacity { .. }
            | Self::Validation { .. } => 400,
            Self::AlreadyInitialized | Self::NotInitialized | Self::DuplicateBooking { .. } => 409,
            Self::BookingNotFound { .. } => 404,
            Self::InternalFault { .. } | Self::Configuration(_) | Self::Io(_) => 500,
        }
    }

    /// Returns `true` if the caller supplied bad input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        let status = self.status_code();
        status >= 400 && status < 500
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::InternalFault {
            details: format!("inventory lock poisoned: {err}"),
        }
    }
}
