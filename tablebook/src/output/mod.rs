//! Transport-neutral responses and their printed forms.
//!
//! A [`Response`] pairs a status code with a JSON body. Successful policy
//! results become `200` responses; errors become the status returned by
//! [`Error::status_code`] with a `{code, message, ...}` body.

mod formatters;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::OutputFormat;
use crate::{Error, Result};

pub use formatters::{JsonFormatter, TextFormatter};

/// A status code and JSON body answering one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Transport status (200 on success).
    pub status: u16,
    /// Response payload.
    pub body: Value,
}

impl Response {
    /// Builds a `200` response from any serializable result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalFault`] if the result cannot be serialized.
    pub fn ok(result: &impl Serialize) -> Result<Self> {
        let body = serde_json::to_value(result).map_err(|e| Error::InternalFault {
            details: format!("failed to serialize response: {e}"),
        })?;
        Ok(Self { status: 200, body })
    }

    /// Builds a `200` response with a plain string body.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: Value::String(body.into()),
        }
    }

    /// Builds the error response for `err`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::output::Response;
    /// use tablebook::Error;
    ///
    /// let response = Response::from_error(&Error::ReservationExceedsLimit { max_reserve_seats: 80 });
    /// assert_eq!(response.status, 400);
    /// assert_eq!(response.body["code"], "MAX_RESERVATION_EXCEEDED");
    /// assert_eq!(response.body["max_reserve_seats"], 80);
    /// ```
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let mut body = Map::new();
        body.insert("code".into(), json!(err.code()));
        body.insert("message".into(), json!(err.to_string()));

        match err {
            Error::ReservationExceedsLimit { max_reserve_seats } => {
                body.insert("max_reserve_seats".into(), json!(max_reserve_seats));
            }
            Error::InsufficientCapacity {
                requested,
                available,
            } => {
                body.insert("requested_tables".into(), json!(requested));
                body.insert("remaining_tables_count".into(), json!(available));
            }
            Error::BookingNotFound { booking_id } | Error::DuplicateBooking { booking_id } => {
                body.insert("booking_id".into(), json!(booking_id));
            }
            Error::MissingParameters { parameter } => {
                body.insert("parameter".into(), json!(parameter));
            }
            _ => {}
        }

        Self {
            status: err.status_code(),
            body: Value::Object(body),
        }
    }

    /// Returns `true` for a `2xx` status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl<T: Serialize> From<Result<T>> for Response {
    fn from(result: Result<T>) -> Self {
        match result.and_then(|value| Self::ok(&value)) {
            Ok(response) => response,
            Err(err) => Self::from_error(&err),
        }
    }
}

/// Renders responses for output.
pub trait OutputFormatter {
    /// Formats a single response as one line (without trailing newline).
    fn format(&self, response: &Response) -> String;
}

/// Creates the formatter for `format`.
#[must_use]
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Text => Box::new(TextFormatter),
    }
}
