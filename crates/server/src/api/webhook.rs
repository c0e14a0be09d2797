use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{debug, error, info, warn};

use hookrelay_core::{InboundEvent, RelayOutcome};

use super::AppState;

/// `POST /webhook` (and `POST /`) -- relay one property event to Slack.
///
/// Always answers with exactly one status code and JSON body; see
/// [`RelayOutcome`] for the mapping.
pub async fn receive(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let outcome = match body {
        Ok(raw) => relay(&state, &raw).await,
        Err(rejection) => {
            debug!(error = %rejection, "webhook body could not be read");
            RelayOutcome::NoData
        }
    };

    let status =
        StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome.body()))
}

/// Run one delivery through parse, build, route and notify.
pub async fn relay(state: &AppState, raw: &[u8]) -> RelayOutcome {
    let event = match InboundEvent::parse(raw) {
        Ok(event) => event,
        Err(e) => {
            debug!(error = %e, "rejecting webhook body");
            return RelayOutcome::from(&e);
        }
    };

    let Some(action) = event.action.as_deref() else {
        debug!("webhook without action ignored");
        return RelayOutcome::Ignored;
    };

    let Some(blocks) = state.builder.build(action, &event.data) else {
        debug!(action, "unrecognized action ignored");
        return RelayOutcome::Ignored;
    };

    let Some(notifier) = state.notifier.as_deref() else {
        error!(token_var = %state.token_var, action, "bearer token not configured");
        state.oplog.record(&format!("Missing {}", state.token_var));
        return RelayOutcome::ConfigurationError;
    };

    let channel = state.channels.route(action);
    match notifier.notify(channel, &blocks).await {
        Ok(()) => {
            info!(action, channel, notifier = notifier.name(), "event relayed");
            RelayOutcome::Sent
        }
        Err(e) => {
            warn!(action, channel, notifier = notifier.name(), error = %e, "delivery failed");
            state
                .oplog
                .record(&format!("Delivery of {action} to {channel} failed: {e}"));
            RelayOutcome::Failed
        }
    }
}
