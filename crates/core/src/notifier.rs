use async_trait::async_trait;
use thiserror::Error;

use crate::message::MessageBlocks;

/// Errors raised while delivering a message.
///
/// Every variant is terminal for the current request; the relay does not
/// retry.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The destination answered with a status other than 200.
    #[error("rejected with HTTP {status}")]
    Rejected {
        /// HTTP status returned by the destination.
        status: u16,
    },

    /// The request never completed (connect failure, timeout, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// The outbound request could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Delivers rendered messages to a messaging platform.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name used in logs and the health endpoint.
    fn name(&self) -> &str;

    /// Post `blocks` to `channel` with a single outbound call.
    async fn notify(&self, channel: &str, blocks: &MessageBlocks) -> Result<(), NotifyError>;
}
