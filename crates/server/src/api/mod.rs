pub mod health;
pub mod webhook;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use hookrelay_core::{ChannelRouter, MessageBuilder, Notifier};

use crate::oplog::OpLog;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Renders events into Slack blocks.
    pub builder: Arc<MessageBuilder>,
    /// Picks the destination channel per action.
    pub channels: Arc<ChannelRouter>,
    /// Outbound notifier (None when no bearer token is configured).
    pub notifier: Option<Arc<dyn Notifier>>,
    /// Operational error log.
    pub oplog: Arc<OpLog>,
    /// Name of the token variable, reported when it is missing.
    pub token_var: Arc<str>,
}

/// Build the Axum router with the webhook receiver and health check.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(webhook::receive))
        .route("/webhook", post(webhook::receive))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
