use serde_json::{Value, json};

use crate::event::ParseError;

/// Final result of handling one webhook delivery.
///
/// Each variant maps to exactly one HTTP status and one JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The request body was empty.
    NoData,
    /// The request body was not valid JSON.
    InvalidJson,
    /// No action, or an action the relay does not announce.
    Ignored,
    /// The outbound bearer token is not configured.
    ConfigurationError,
    /// The message was accepted by the destination.
    Sent,
    /// The outbound call failed.
    Failed,
}

impl RelayOutcome {
    /// HTTP status code reported to the webhook sender.
    pub fn status_code(self) -> u16 {
        match self {
            Self::NoData | Self::InvalidJson => 400,
            Self::Ignored | Self::Sent => 200,
            Self::ConfigurationError | Self::Failed => 500,
        }
    }

    /// JSON body reported to the webhook sender.
    pub fn body(self) -> Value {
        match self {
            Self::NoData => json!({ "error": "No data" }),
            Self::InvalidJson => json!({ "error": "Invalid JSON" }),
            Self::Ignored => json!({ "status": "ignored" }),
            Self::ConfigurationError => json!({ "error": "Configuration error" }),
            Self::Sent => json!({ "status": "sent" }),
            Self::Failed => json!({ "status": "failed" }),
        }
    }
}

impl From<&ParseError> for RelayOutcome {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::Empty => Self::NoData,
            ParseError::InvalidJson(_) => Self::InvalidJson,
        }
    }
}
