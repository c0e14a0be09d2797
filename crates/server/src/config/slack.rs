use std::time::Duration;

use serde::Deserialize;

use hookrelay_core::ChannelRouter;
use hookrelay_core::route::{DEFAULT_CHANGED_CHANNEL, DEFAULT_CHANNEL};
use hookrelay_slack::config::DEFAULT_API_BASE_URL;
use hookrelay_slack::{SlackConfig, SlackTransport};

/// Slack delivery configuration.
///
/// The bearer token itself never lives in this file; it is read from the
/// variable named by `token_var`.
#[derive(Debug, Deserialize)]
pub struct SlackSettings {
    /// Base URL for the Slack Web API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Name of the env-file / environment variable holding the bot token.
    #[serde(default = "default_token_var")]
    pub token_var: String,
    /// Channel for every announcement except `property.changed`.
    #[serde(default = "default_channel")]
    pub default_channel: String,
    /// Channel for `property.changed` announcements.
    #[serde(default = "default_changed_channel")]
    pub changed_channel: String,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Request encoding: `"json"` (bearer header) or `"form"` (token field).
    #[serde(default)]
    pub transport: SlackTransport,
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token_var: default_token_var(),
            default_channel: default_channel(),
            changed_channel: default_changed_channel(),
            timeout_seconds: default_timeout(),
            transport: SlackTransport::default(),
        }
    }
}

impl SlackSettings {
    /// Notifier configuration for the given token.
    pub fn notifier_config(&self, token: impl Into<String>) -> SlackConfig {
        SlackConfig::new(token)
            .with_api_base_url(&self.api_base_url)
            .with_timeout(Duration::from_secs(self.timeout_seconds))
            .with_transport(self.transport)
    }

    pub fn channel_router(&self) -> ChannelRouter {
        ChannelRouter::new(&self.default_channel, &self.changed_channel)
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_owned()
}

fn default_token_var() -> String {
    "SLACK_BOT_TOKEN".to_owned()
}

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_owned()
}

fn default_changed_channel() -> String {
    DEFAULT_CHANGED_CHANNEL.to_owned()
}

fn default_timeout() -> u64 {
    10
}
