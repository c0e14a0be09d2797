use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{self, HeaderMap, Request, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};
use tower::ServiceExt;

use hookrelay_core::{ChannelRouter, MessageBlocks, MessageBuilder, Notifier, NotifyError};
use hookrelay_server::api::AppState;
use hookrelay_server::oplog::OpLog;
use hookrelay_slack::{SlackConfig, SlackNotifier};

// -- Mock notifier --------------------------------------------------------

struct MockNotifier {
    fail_with: Option<u16>,
    calls: Mutex<Vec<(String, MessageBlocks)>>,
}

impl MockNotifier {
    fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(status),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, MessageBlocks)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn notify(&self, channel: &str, blocks: &MessageBlocks) -> Result<(), NotifyError> {
        self.calls
            .lock()
            .unwrap()
            .push((channel.to_owned(), blocks.clone()));
        match self.fail_with {
            Some(status) => Err(NotifyError::Rejected { status }),
            None => Ok(()),
        }
    }
}

// -- Mock Slack API -------------------------------------------------------

#[derive(Debug, Clone)]
struct CapturedRequest {
    authorization: Option<String>,
    body: Value,
}

struct MockSlack {
    base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockSlack {
    /// Serve `POST /api/chat.postMessage` on an ephemeral port, answering
    /// every request with `status`.
    async fn start(status: StatusCode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);

        let app = Router::new().route(
            "/api/chat.postMessage",
            post(move |headers: HeaderMap, axum::Json(body): axum::Json<Value>| {
                let captured = Arc::clone(&captured);
                async move {
                    captured.lock().unwrap().push(CapturedRequest {
                        authorization: headers
                            .get(http::header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_owned),
                        body,
                    });
                    (
                        status,
                        axum::Json(json!({ "ok": status == StatusCode::OK, "ts": "1.2" })),
                    )
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
        }
    }

    fn notifier(&self, token: &str) -> Arc<dyn Notifier> {
        let config = SlackConfig::new(token).with_api_base_url(&self.base_url);
        Arc::new(SlackNotifier::new(config).unwrap())
    }

    fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

// -- Helpers --------------------------------------------------------------

fn build_state(notifier: Option<Arc<dyn Notifier>>, oplog_dir: &Path) -> AppState {
    AppState {
        builder: Arc::new(MessageBuilder::default()),
        channels: Arc::new(ChannelRouter::default()),
        notifier,
        oplog: Arc::new(OpLog::new(oplog_dir.join("webhook.log"), 10 * 1024)),
        token_var: "SLACK_BOT_TOKEN".into(),
    }
}

async fn post_webhook(state: AppState, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let app = hookrelay_server::api::router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri(uri)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn oplog_contents(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("webhook.log")).unwrap_or_default()
}

// -- Tests ----------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(Some(MockNotifier::succeeding()), dir.path());
    let app = hookrelay_server::api::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["notifier"], "mock");
}

#[tokio::test]
async fn created_event_is_sent_to_slack() {
    let dir = tempfile::tempdir().unwrap();
    let slack = MockSlack::start(StatusCode::OK).await;
    let state = build_state(Some(slack.notifier("xoxb-live")), dir.path());

    let (status, body) = post_webhook(
        state,
        "/webhook",
        r#"{"body":{"action":"property.created","data":{"id":"X1","name":"Villa"}}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "sent"}));

    let requests = slack.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.authorization.as_deref(), Some("Bearer xoxb-live"));
    assert_eq!(request.body["channel"], "C03RV3V94AY");

    let blocks = request.body["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    for block in blocks {
        assert_eq!(block["type"], "section");
        assert_eq!(block["text"]["type"], "mrkdwn");
    }
    let link = blocks[1]["text"]["text"].as_str().unwrap();
    assert!(link.contains("Villa"));
    assert!(link.contains("X1"));
    assert!(link.contains("https://my.hospitable.com/properties/property/X1/overview"));

    assert!(oplog_contents(dir.path()).is_empty());
}

#[tokio::test]
async fn missing_action_is_ignored_without_outbound_call() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = MockNotifier::succeeding();
    let state = build_state(Some(notifier.clone()), dir.path());

    let (status, body) =
        post_webhook(state, "/webhook", r#"{"body":{"data":{"id":"X1"}}}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ignored"}));
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn unrecognized_action_is_ignored_without_outbound_call() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = MockNotifier::succeeding();
    let state = build_state(Some(notifier.clone()), dir.path());

    let (status, body) = post_webhook(
        state,
        "/webhook",
        r#"{"action":"reservation.created","data":{"id":"R1"}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ignored"}));
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn empty_body_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = MockNotifier::succeeding();
    let state = build_state(Some(notifier.clone()), dir.path());

    let (status, body) = post_webhook(state, "/webhook", Body::empty()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No data"}));
    assert!(notifier.calls().is_empty());
    assert!(oplog_contents(dir.path()).is_empty());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = MockNotifier::succeeding();
    let state = build_state(Some(notifier.clone()), dir.path());

    let (status, body) = post_webhook(state, "/webhook", r#"{"action": "property.created""#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON"}));
    assert!(notifier.calls().is_empty());
    assert!(oplog_contents(dir.path()).is_empty());
}

#[tokio::test]
async fn changed_event_delivery_failure_reports_failed() {
    let dir = tempfile::tempdir().unwrap();
    let slack = MockSlack::start(StatusCode::INTERNAL_SERVER_ERROR).await;
    let state = build_state(Some(slack.notifier("xoxb-live")), dir.path());

    let (status, body) = post_webhook(
        state,
        "/webhook",
        r#"{"body":{"action":"property.changed","data":{"id":"X3","name":"Loft"}}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"status": "failed"}));

    let requests = slack.requests();
    assert_eq!(requests.len(), 1, "exactly one attempt, no retries");
    assert_eq!(requests[0].body["channel"], "C08R24HBK7F");

    let log = oplog_contents(dir.path());
    assert!(log.contains("property.changed"));
    assert!(log.contains("HTTP 500"));
}

#[tokio::test]
async fn missing_token_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let slack = MockSlack::start(StatusCode::OK).await;
    let state = build_state(None, dir.path());

    let (status, body) = post_webhook(
        state,
        "/webhook",
        r#"{"body":{"action":"property.deleted","data":{"id":"X2"}}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Configuration error"}));
    assert!(slack.requests().is_empty());

    let log = oplog_contents(dir.path());
    assert_eq!(log.lines().count(), 1);
    assert!(log.trim_end().ends_with(" | Missing SLACK_BOT_TOKEN"));
}

#[tokio::test]
async fn missing_token_does_not_mask_ignored_events() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(None, dir.path());

    let (status, body) =
        post_webhook(state, "/webhook", r#"{"action":"property.archived"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ignored"}));
    assert!(oplog_contents(dir.path()).is_empty());
}

#[tokio::test]
async fn unwrapped_shape_routes_by_action() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = MockNotifier::succeeding();

    let cases = [
        (
            r#"{"action":"property.merged","data":{"previous_id":"A","new_id":"B"}}"#,
            "C03RV3V94AY",
            "🔗 Property Merged\nOld ID: A\nNew ID: B",
        ),
        (
            r#"{"action":"property.changed","data":{}}"#,
            "C08R24HBK7F",
            "📝 Property Updated\nID: unknown\nName: unnamed",
        ),
    ];

    for (payload, _, _) in cases {
        let state = build_state(Some(notifier.clone()), dir.path());
        let (status, body) = post_webhook(state, "/", payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "sent"}));
    }

    let calls = notifier.calls();
    assert_eq!(calls.len(), cases.len());
    for ((channel, blocks), (_, expected_channel, expected_text)) in calls.iter().zip(cases) {
        assert_eq!(channel, expected_channel);
        assert_eq!(blocks.blocks()[0].text(), expected_text);
    }
}

#[tokio::test]
async fn notifier_rejection_maps_to_failed() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = MockNotifier::failing(403);
    let state = build_state(Some(notifier.clone()), dir.path());

    let (status, body) = post_webhook(
        state,
        "/webhook",
        r#"{"body":{"action":"property.deleted","data":{"id":"X9"}}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"status": "failed"}));
    assert_eq!(notifier.calls().len(), 1);
}
