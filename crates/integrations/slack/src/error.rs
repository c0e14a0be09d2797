use hookrelay_core::NotifyError;
use thiserror::Error;

/// Errors specific to the Slack notifier.
///
/// These are internal errors that get converted into [`NotifyError`] at the
/// public API boundary.
#[derive(Debug, Error)]
pub enum SlackError {
    /// An HTTP-level transport error occurred (connect, timeout, reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack answered with a status other than 200.
    #[error("Slack returned HTTP {0}")]
    Status(u16),

    /// The block payload could not be encoded.
    #[error("failed to encode blocks: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<SlackError> for NotifyError {
    fn from(err: SlackError) -> Self {
        match err {
            SlackError::Http(e) => NotifyError::Transport(e.to_string()),
            SlackError::Status(status) => NotifyError::Rejected { status },
            SlackError::Encode(e) => NotifyError::Encoding(e.to_string()),
        }
    }
}
