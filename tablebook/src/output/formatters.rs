//! Output formatter implementations.

use serde_json::Value;

use super::{OutputFormatter, Response};

/// Formatter for compact JSON lines.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, response: &Response) -> String {
        // Response holds only a u16 and a Value, which always serialize.
        serde_json::to_string(response).unwrap_or_default()
    }
}

/// Formatter for human-readable `<status> key=value ...` lines.
///
/// Object keys are printed in sorted order.
pub struct TextFormatter;

impl TextFormatter {
    fn render_value(value: &Value) -> String {
        match value {
            Value::String(s) if s.contains(' ') => format!("{s:?}"),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, response: &Response) -> String {
        let mut line = response.status.to_string();
        match &response.body {
            Value::Object(fields) => {
                let mut keys: Vec<_> = fields.keys().collect();
                keys.sort();
                for key in keys {
                    line.push(' ');
                    line.push_str(key);
                    line.push('=');
                    line.push_str(&Self::render_value(&fields[key]));
                }
            }
            Value::Null => {}
            other => {
                line.push(' ');
                line.push_str(&Self::render_value(other));
            }
        }
        line
    }
}
