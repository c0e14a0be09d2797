use serde_json::{Map, Value};
use thiserror::Error;

/// Sentinel used when an identifier field is absent from the event data.
pub const UNKNOWN: &str = "unknown";

/// Sentinel used when a name field is absent from the event data.
pub const UNNAMED: &str = "unnamed";

/// Errors raised while reading an inbound request body.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The request carried no body at all.
    #[error("request body is empty")]
    Empty,

    /// The body is not a JSON document.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// A single property lifecycle notification.
///
/// Deliveries arrive either wrapped as `{"body": {"action": ..., "data": ...}}`
/// or unwrapped as `{"action": ..., "data": ...}`. The `body` key is checked
/// first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundEvent {
    /// Event type, e.g. `property.created`. `None` when absent, empty, or not a
    /// string.
    pub action: Option<String>,

    /// Event payload. Empty when absent or not an object.
    pub data: Map<String, Value>,
}

impl InboundEvent {
    /// Parse a raw request body into an event.
    ///
    /// Any well-formed JSON document parses; shapes that carry no usable
    /// action produce an event whose [`action`](Self::action) is `None`.
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }
        let document: Value = serde_json::from_slice(raw)?;
        Ok(Self::from_document(&document))
    }

    /// Extract the event envelope from an already-parsed JSON document.
    pub fn from_document(document: &Value) -> Self {
        let envelope = document.get("body").unwrap_or(document);

        let action = envelope
            .get("action")
            .and_then(Value::as_str)
            .filter(|a| !a.is_empty())
            .map(str::to_owned);

        let data = envelope
            .get("data")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Self { action, data }
    }

    /// Render a data field for interpolation into message text.
    ///
    /// Strings are returned verbatim, without any escaping of markup.
    pub fn field(&self, name: &str, default: &str) -> String {
        render_field(&self.data, name, default)
    }
}

/// Render `data[name]` as message text, falling back to `default` when the
/// key is missing or `null`.
pub fn render_field(data: &Map<String, Value>, name: &str, default: &str) -> String {
    match data.get(name) {
        None | Some(Value::Null) => default.to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
