use hookrelay_core::MessageBlocks;
use serde::{Deserialize, Serialize};

// ─── chat.postMessage ────────────────────────────────────────────────

/// JSON request body for the Slack `chat.postMessage` API.
#[derive(Debug, Clone, Serialize)]
pub struct SlackPostMessageRequest<'a> {
    /// Target channel ID.
    pub channel: &'a str,

    /// Block Kit layout blocks.
    pub blocks: &'a MessageBlocks,
}

/// Form-encoded request body for `chat.postMessage`, with the token passed as
/// a field and the blocks as a JSON string.
#[derive(Serialize)]
pub struct SlackFormMessageRequest<'a> {
    pub token: &'a str,
    pub channel: &'a str,
    pub blocks: String,
}

// ─── API Responses ───────────────────────────────────────────────────

/// Envelope returned by all Slack Web API methods.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackApiResponse {
    /// Whether the API call succeeded.
    pub ok: bool,

    /// Human-readable error code when `ok` is `false`.
    pub error: Option<String>,

    /// Channel the message was posted to (present on success).
    pub channel: Option<String>,

    /// Timestamp identifier of the posted message (present on success).
    pub ts: Option<String>,
}
