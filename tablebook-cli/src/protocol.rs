//! Request-line protocol spoken by `tablebook session`.
//!
//! Each non-blank line that does not start with `#` is one request:
//!
//! ```text
//! POST /api/initialize-tables {"table_count": 100, "max_allowed_percentage": 0.8}
//! POST /api/reserve {"number_of_customers": 12, "contact_no": "123"}
//! GET /api/reserve/<booking_id>
//! DELETE /api/reserve/<booking_id>
//! GET /api/tables
//! GET /
//! ```
//!
//! Every request is answered with exactly one [`Response`].

use std::fmt;

use serde_json::{json, Map, Value};
use tablebook::output::Response;
use tablebook::ReservationPolicy;

const RESERVE_PATH: &str = "/api/reserve";

/// A parsed request line.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// `GET /`
    Health,
    /// `POST /api/initialize-tables`
    InitializeTables {
        /// Requested table count; `Some(0)` marks a present but non-integer value.
        table_count: Option<i64>,
        /// Cap percentage; `NaN` marks a present but non-numeric value.
        max_allowed_percentage: Option<f64>,
    },
    /// `POST /api/reserve`
    Reserve {
        /// Party size; `Some(0)` marks a present but non-integer value.
        number_of_customers: Option<i64>,
        /// Caller contact number.
        contact_no: Option<String>,
    },
    /// `GET /api/reserve/<id>`
    Lookup {
        /// Booking to show.
        booking_id: String,
    },
    /// `DELETE /api/reserve/<id>`
    Cancel {
        /// Booking to cancel.
        booking_id: String,
    },
    /// `GET /api/tables`
    Status,
}

/// A request line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// No handler for the method and path.
    UnknownRoute {
        /// Request method as written.
        method: String,
        /// Request path as written.
        path: String,
    },
    /// The body is not a JSON object.
    MalformedBody(String),
}

impl ProtocolError {
    /// Converts the error into its response.
    #[must_use]
    pub fn to_response(&self) -> Response {
        match self {
            ProtocolError::UnknownRoute { .. } => Response {
                status: 404,
                body: json!({"code": "ROUTE_NOT_FOUND", "message": self.to_string()}),
            },
            ProtocolError::MalformedBody(_) => Response {
                status: 400,
                body: json!({"code": "INVALID_PARAMETERS", "message": self.to_string()}),
            },
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownRoute { method, path } => {
                write!(f, "No route for {method} {path}.")
            }
            ProtocolError::MalformedBody(reason) => write!(f, "Malformed request body: {reason}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Parses one line. Returns `Ok(None)` for blank lines and comments.
///
/// # Errors
///
/// Returns a [`ProtocolError`] for unknown routes or bodies that are not
/// JSON objects.
pub fn parse_line(line: &str) -> Result<Option<Request>, ProtocolError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (method, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();
    let (path, body) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let method = method.to_ascii_uppercase();

    let request = match (method.as_str(), path, booking_path(path)) {
        ("GET", "/", _) => Request::Health,
        ("GET", "/api/tables", _) => Request::Status,
        ("POST", "/api/initialize-tables", _) => {
            let body = parse_body(body)?;
            Request::InitializeTables {
                table_count: count_field(&body, "table_count"),
                max_allowed_percentage: percentage_field(&body),
            }
        }
        ("POST", RESERVE_PATH, _) => {
            let body = parse_body(body)?;
            Request::Reserve {
                number_of_customers: count_field(&body, "number_of_customers"),
                contact_no: contact_field(&body),
            }
        }
        ("GET", _, Some(booking_id)) => Request::Lookup {
            booking_id: booking_id.to_string(),
        },
        ("DELETE", _, Some(booking_id)) => Request::Cancel {
            booking_id: booking_id.to_string(),
        },
        _ => {
            return Err(ProtocolError::UnknownRoute {
                method,
                path: path.to_string(),
            })
        }
    };

    Ok(Some(request))
}

/// Answers `request` through `policy`.
#[must_use]
pub fn respond(policy: &ReservationPolicy<'_>, request: Request) -> Response {
    match request {
        Request::Health => Response::text("OK"),
        Request::Status => {
            Response::ok(&policy.status()).unwrap_or_else(|e| Response::from_error(&e))
        }
        Request::InitializeTables {
            table_count,
            max_allowed_percentage,
        } => policy
            .initialize_tables(table_count, max_allowed_percentage)
            .into(),
        Request::Reserve {
            number_of_customers,
            contact_no,
        } => policy
            .reserve_tables(number_of_customers, contact_no.as_deref())
            .into(),
        Request::Lookup { booking_id } => policy.booking(&booking_id).into(),
        Request::Cancel { booking_id } => policy.cancel_booking(Some(&booking_id)).into(),
    }
}

/// Parses and answers one line. Returns `None` for blank lines and comments.
#[must_use]
pub fn handle_line(policy: &ReservationPolicy<'_>, line: &str) -> Option<Response> {
    match parse_line(line) {
        Ok(Some(request)) => {
            log::debug!("handling {request:?}");
            Some(respond(policy, request))
        }
        Ok(None) => None,
        Err(err) => {
            log::warn!("{err}");
            Some(err.to_response())
        }
    }
}

/// Returns the booking id of `/api/reserve/<id>`, which may be empty.
fn booking_path(path: &str) -> Option<&str> {
    path.strip_prefix(RESERVE_PATH)?.strip_prefix('/')
}

fn parse_body(body: &str) -> Result<Map<String, Value>, ProtocolError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(ProtocolError::MalformedBody(
            "expected a JSON object".to_string(),
        )),
        Err(e) => Err(ProtocolError::MalformedBody(e.to_string())),
    }
}

/// Reads an integer field. Present values that are not integers become
/// `Some(0)` so the policy rejects them as invalid rather than missing.
#[allow(clippy::cast_possible_truncation)]
fn count_field(body: &Map<String, Value>, name: &str) -> Option<i64> {
    let value = body.get(name).filter(|v| !v.is_null())?;
    let count = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
            .map(|f| f as i64)
    });
    Some(count.unwrap_or(0))
}

fn percentage_field(body: &Map<String, Value>) -> Option<f64> {
    let value = body
        .get("max_allowed_percentage")
        .or_else(|| body.get("max_reserve_percentage"))
        .filter(|v| !v.is_null())?;
    Some(value.as_f64().unwrap_or(f64::NAN))
}

fn contact_field(body: &Map<String, Value>) -> Option<String> {
    match body.get("contact_no")? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
