use thiserror::Error;

/// Errors that can occur when starting the relay server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. reading config or binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The Slack notifier could not be constructed.
    #[error("slack error: {0}")]
    Slack(#[from] hookrelay_slack::SlackError),
}
