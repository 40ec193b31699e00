//! Alert Request Extraction
//!
//! Turns a raw request body into an [`AlertRequest`] or one of the
//! [`SummarizeError`] kinds.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SummarizeError;

/// Validated alert text, never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    pub alert: String,
}

/// Shape of the request body. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RequestBody {
    #[serde(default = "missing_alert")]
    alert: Value,
}

fn missing_alert() -> Value {
    Value::String(String::new())
}

impl AlertRequest {
    /// Parse and validate a JSON request body
    pub fn from_json(body: &[u8]) -> Result<Self, SummarizeError> {
        let root: Value = serde_json::from_slice(body)
            .map_err(|e| SummarizeError::InvalidJson(e.to_string()))?;

        // A non-object root parses fine but has no fields to read
        if !root.is_object() {
            return Err(SummarizeError::Internal(format!(
                "request body must be a JSON object, got {}",
                kind_of(&root)
            )));
        }

        let body: RequestBody = serde_json::from_value(root)
            .map_err(|e| SummarizeError::Internal(e.to_string()))?;

        if is_blank(&body.alert) {
            return Err(SummarizeError::MissingAlert);
        }

        Ok(Self {
            alert: into_text(body.alert),
        })
    }
}

/// Values that count as "no alert": null, false, zero and empty containers
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Strings pass through, anything else becomes its JSON text
fn into_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
