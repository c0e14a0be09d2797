use async_trait::async_trait;
use hookrelay_core::{MessageBlocks, Notifier, NotifyError};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::{SlackConfig, SlackTransport};
use crate::error::SlackError;
use crate::types::{SlackApiResponse, SlackFormMessageRequest, SlackPostMessageRequest};

/// Slack notifier that posts messages via the Slack Web API.
///
/// A delivery counts as sent when Slack answers with HTTP 200. Nothing is
/// retried.
pub struct SlackNotifier {
    config: SlackConfig,
    client: Client,
}

impl SlackNotifier {
    /// Create a new Slack notifier with the given configuration.
    ///
    /// The HTTP client verifies TLS certificates and applies the configured
    /// timeout to every request.
    pub fn new(config: SlackConfig) -> Result<Self, SlackError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SlackConfig {
        &self.config
    }

    /// Build the full URL for a Slack API method.
    fn api_url(&self, method: &str) -> String {
        format!("{}/{method}", self.config.api_base_url.trim_end_matches('/'))
    }

    /// Send a `chat.postMessage` request and interpret the response.
    async fn post_message(&self, channel: &str, blocks: &MessageBlocks) -> Result<(), SlackError> {
        let url = self.api_url("chat.postMessage");

        debug!(channel, transport = ?self.config.transport, "posting message to Slack");

        let request = match self.config.transport {
            SlackTransport::Json => self
                .client
                .post(&url)
                .bearer_auth(&self.config.token)
                .json(&SlackPostMessageRequest { channel, blocks }),
            SlackTransport::Form => self.client.post(&url).form(&SlackFormMessageRequest {
                token: &self.config.token,
                channel,
                blocks: blocks.to_json_string()?,
            }),
        };

        let response = request.send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Slack rejected message");
            return Err(SlackError::Status(status.as_u16()));
        }

        // HTTP 200 is the delivery criterion; the `ok` flag is only reported.
        match response.json::<SlackApiResponse>().await {
            Ok(api) if !api.ok => {
                warn!(
                    error = api.error.as_deref().unwrap_or("unknown_error"),
                    "Slack answered 200 but reported an API error"
                );
            }
            Ok(api) => {
                debug!(
                    channel = api.channel.as_deref().unwrap_or(channel),
                    ts = api.ts.as_deref().unwrap_or_default(),
                    "message posted to Slack"
                );
            }
            Err(e) => debug!(error = %e, "Slack response body was not a JSON envelope"),
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "slack"
    }

    #[instrument(skip(self, blocks), fields(notifier = "slack", block_count = blocks.len()))]
    async fn notify(&self, channel: &str, blocks: &MessageBlocks) -> Result<(), NotifyError> {
        self.post_message(channel, blocks).await.map_err(Into::into)
    }
}
