use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use recap::config::ServerSettings;
use recap::llm::{CompletionRequest, LlmProvider, LlmSummarizer};
use recap::mail::{Delivery, Mailer, OutgoingMail};
use recap::server::handlers::HEALTH_BODY;
use recap::server::router;
use recap::service::SummaryService;
use recap::summary::MockSummarizer;

#[derive(Clone, Default)]
struct StubMailer {
    recipients: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Mailer for StubMailer {
    async fn send(&self, mail: OutgoingMail<'_>) -> anyhow::Result<Delivery> {
        self.recipients
            .lock()
            .unwrap()
            .extend(mail.recipients.iter().cloned());
        Ok(Delivery {
            message_id: "stub-1".into(),
            preview_url: "https://mail.test/preview/stub-1".into(),
        })
    }
}

struct BrokenMailer;

#[async_trait]
impl Mailer for BrokenMailer {
    async fn send(&self, _mail: OutgoingMail<'_>) -> anyhow::Result<Delivery> {
        anyhow::bail!("connection reset by sandbox")
    }
}

enum Upstream {
    Down,
    Prose,
}

#[async_trait]
impl LlmProvider for Upstream {
    async fn complete(&self, _request: CompletionRequest<'_>) -> anyhow::Result<String> {
        match self {
            Upstream::Down => anyhow::bail!("429 Too Many Requests"),
            Upstream::Prose => Ok("Sure! The meeting covered SECRET-PLANS.".to_string()),
        }
    }
}

fn mock_app(mailer: impl Mailer + 'static) -> Router {
    app_with(
        SummaryService::new(MockSummarizer::default(), None, Box::new(mailer), "Meeting Summary"),
        ServerSettings::default(),
    )
}

fn llm_app(upstream: Upstream) -> Router {
    let llm = LlmSummarizer::new(Box::new(upstream), 0.2);
    app_with(
        SummaryService::new(
            MockSummarizer::default(),
            Some(llm),
            Box::new(StubMailer::default()),
            "Meeting Summary",
        ),
        ServerSettings::default(),
    )
}

fn app_with(service: SummaryService, settings: ServerSettings) -> Router {
    router(Arc::new(service), &settings).expect("router")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_check_responds() {
    let app = mock_app(StubMailer::default());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], HEALTH_BODY.as_bytes());
}

#[tokio::test]
async fn generate_rejects_empty_transcript() {
    let (status, body) = call(
        mock_app(StubMailer::default()),
        post_json("/generate-summary", r#"{"transcript": "", "instruction": "x"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Transcript and instruction are required");
}

#[tokio::test]
async fn generate_rejects_missing_fields() {
    let (status, body) = call(
        mock_app(StubMailer::default()),
        post_json("/generate-summary", r#"{"transcript": "Hello."}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Transcript and instruction are required");
}

#[tokio::test]
async fn generate_rejects_malformed_json() {
    let (status, body) = call(
        mock_app(StubMailer::default()),
        post_json("/generate-summary", "{\"transcript\": "),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn generate_in_mock_mode_returns_normalized_summary() {
    let (status, body) = call(
        mock_app(StubMailer::default()),
        post_json(
            "/generate-summary",
            r#"{"transcript": "Line one. Line two.", "instruction": "summarize"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let summary = &body["summary"];
    assert_eq!(summary["points"], json!(["Line one.", "Line two."]));
    assert!(summary["decisions"].is_array());
    assert!(summary["action_items"].is_array());
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let (status, body) = call(
        llm_app(Upstream::Down),
        post_json(
            "/generate-summary",
            r#"{"transcript": "Hello.", "instruction": "summarize"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to generate summary");
}

#[tokio::test]
async fn non_json_upstream_reply_is_not_leaked() {
    let (status, body) = call(
        llm_app(Upstream::Prose),
        post_json(
            "/generate-summary",
            r#"{"transcript": "Hello.", "instruction": "summarize"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body.to_string().contains("SECRET-PLANS"));
}

#[tokio::test]
async fn send_rejects_empty_recipients() {
    let mailer = StubMailer::default();
    let (status, body) = call(
        mock_app(mailer.clone()),
        post_json(
            "/send-summary",
            r#"{"summary": {"points": ["A"]}, "recipients": []}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "At least one recipient is required");
    assert!(mailer.recipients.lock().unwrap().is_empty());
}

#[tokio::test]
async fn send_rejects_malformed_json() {
    let mailer = StubMailer::default();
    let (status, body) = call(
        mock_app(mailer.clone()),
        post_json("/send-summary", "{\"summary\": {\"points\": [\"A\""),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(mailer.recipients.lock().unwrap().is_empty());
}

#[tokio::test]
async fn send_returns_preview_url() {
    let mailer = StubMailer::default();
    let (status, body) = call(
        mock_app(mailer.clone()),
        post_json(
            "/send-summary",
            r#"{
                "summary": {
                    "points": ["A"],
                    "decisions": ["B"],
                    "action_items": [{"owner": "Sam", "task": "C", "due": "Friday"}]
                },
                "recipients": ["a@example.com"]
            }"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previewUrl"], "https://mail.test/preview/stub-1");
    assert!(body["message"].is_string());
    assert_eq!(*mailer.recipients.lock().unwrap(), vec!["a@example.com"]);
}

#[tokio::test]
async fn send_failure_is_internal_error() {
    let (status, body) = call(
        mock_app(BrokenMailer),
        post_json(
            "/send-summary",
            r#"{"summary": {"points": ["A"]}, "recipients": ["a@example.com"]}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to send email");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let settings = ServerSettings {
        body_limit_bytes: 64,
        ..ServerSettings::default()
    };
    let app = app_with(
        SummaryService::new(
            MockSummarizer::default(),
            None,
            Box::new(StubMailer::default()),
            "Meeting Summary",
        ),
        settings,
    );

    let transcript = "word ".repeat(100);
    let body = json!({"transcript": transcript, "instruction": "summarize"}).to_string();
    let (status, _) = call(app, post_json("/generate-summary", &body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn cors_echoes_allowed_origin() {
    let settings = ServerSettings {
        allowed_origins: vec!["http://localhost:3000".to_string()],
        ..ServerSettings::default()
    };
    let app = app_with(
        SummaryService::new(
            MockSummarizer::default(),
            None,
            Box::new(StubMailer::default()),
            "Meeting Summary",
        ),
        settings,
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let response = mock_app(StubMailer::default())
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "https://anywhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
