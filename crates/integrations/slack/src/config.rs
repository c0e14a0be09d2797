use std::time::Duration;

use serde::Deserialize;

/// Default Slack Web API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";

/// Default ceiling for a single outbound call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How the `chat.postMessage` request is encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlackTransport {
    /// JSON body `{channel, blocks}` with a bearer `Authorization` header.
    #[default]
    Json,
    /// Form-encoded body carrying `token`, `channel` and the JSON-encoded
    /// `blocks`. No `Authorization` header.
    Form,
}

/// Configuration for the Slack notifier.
#[derive(Clone)]
pub struct SlackConfig {
    /// Bot OAuth token used to authenticate API requests.
    pub token: String,

    /// Base URL for the Slack Web API. Override this for testing against a
    /// mock server.
    pub api_base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Request encoding.
    pub transport: SlackTransport,
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport)
            .finish()
    }
}

impl SlackConfig {
    /// Create a new configuration with the given token.
    ///
    /// Uses the default Slack API base URL (`https://slack.com/api`), a
    /// 10 second timeout and the JSON transport.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            transport: SlackTransport::Json,
        }
    }

    /// Override the API base URL (useful for testing).
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_transport(mut self, transport: SlackTransport) -> Self {
        self.transport = transport;
        self
    }
}
