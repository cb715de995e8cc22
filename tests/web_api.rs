//! Integration tests for the web adapter.
//!
//! These tests start a real axum server on a random port with a stand-in
//! backend and exercise the HTML and JSON endpoints.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use text_summarizer::config::OverflowPolicy;
use text_summarizer::errors::SummarizeError;
use text_summarizer::service::SummarizationService;
use text_summarizer::summarize::{LengthBounds, ModelInvoker, Summarizer};
use text_summarizer::tokenizer::SentenceTokenizer;
use text_summarizer::web::{spawn_web, SharedModel, SummaryResponse, WebConfig};

/// Echoes the first sentence of its input plus the bounds it was given.
#[derive(Default)]
struct EchoSummarizer {
    calls: AtomicUsize,
}

impl Summarizer for EchoSummarizer {
    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first = text.split_terminator('.').next().unwrap_or("").trim();
        Ok(format!(
            "{first} [{}-{}]",
            bounds.min_length, bounds.max_length
        ))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

struct FailingSummarizer;

impl Summarizer for FailingSummarizer {
    fn summarize(&self, _text: &str, _bounds: LengthBounds) -> Result<String, SummarizeError> {
        Err(SummarizeError::Summarization(
            "input exceeds the model's maximum context".into(),
        ))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

fn service(backend: Arc<dyn Summarizer>) -> SummarizationService {
    SummarizationService::new(
        ModelInvoker::new(
            backend,
            Arc::new(SentenceTokenizer::builtin()),
            OverflowPolicy::Reject,
            10_000,
        ),
        80,
    )
}

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server(model: SharedModel) -> String {
    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };
    let addr = spawn_web(Arc::new(model), config).await.expect("bind");
    format!("http://{addr}")
}

async fn echo_server() -> (String, Arc<EchoSummarizer>) {
    let backend = Arc::new(EchoSummarizer::default());
    let base = spawn_test_server(SharedModel::preloaded(service(backend.clone()), "echo-model")).await;
    (base, backend)
}

// ── HTML ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn index_renders_empty_form_without_calling_the_model() {
    let (base, backend) = echo_server().await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("<form method=\"post\" action=\"/summarize-web\">"));
    assert!(!html.contains("class=\"results\""));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn form_submission_renders_prefilled_page() {
    let (base, _backend) = echo_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/summarize-web"))
        .form(&[
            ("text", "Cats & dogs get along. Mostly."),
            ("max_length", "60"),
            ("min_length", ""),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains(">Cats &amp; dogs get along. Mostly.</textarea>"));
    assert!(html.contains("<p class=\"summary\">Cats &amp; dogs get along [30-60]</p>"));
    assert!(html.contains(" seconds</p>"));
}

#[tokio::test]
async fn form_with_blank_text_shows_error_panel() {
    let (base, backend) = echo_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/summarize-web"))
        .form(&[("text", "   ")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let html = resp.text().await.unwrap();
    assert!(html.contains("input text cannot be empty"));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

// ── JSON ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn summarize_returns_result_and_processing_time() {
    let (base, _backend) = echo_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({
            "text": "A sample sentence to summarize.",
            "max_length": 50,
            "min_length": 10
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: SummaryResponse = resp.json().await.unwrap();
    assert_eq!(body.original_text, "A sample sentence to summarize.");
    assert_eq!(body.summary, "A sample sentence to summarize [10-50]");
    assert!(body.formatted_original.contains("ORIGINAL TEXT:"));
    assert!(body.processing_time >= 0.0);
}

#[tokio::test]
async fn summarize_applies_default_bounds() {
    let (base, _backend) = echo_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"text": "Defaults please."}))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["summary"], "Defaults please [30-130]");
}

#[tokio::test]
async fn blank_text_is_an_input_error() {
    let (base, backend) = echo_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"text": " \n "}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "input_error");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn backend_failure_is_a_bad_gateway() {
    let base = spawn_test_server(SharedModel::preloaded(service(Arc::new(FailingSummarizer)), "failing-model")).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"text": "Very long text."}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "summarization_error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("maximum context"));
}

#[tokio::test]
async fn concurrent_requests_get_their_own_results() {
    let (base, backend) = echo_server().await;
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        let url = format!("{base}/summarize");
        handles.push(tokio::spawn(async move {
            let text = format!("Request number {i} speaks. Then more.");
            let body: SummaryResponse = client
                .post(url)
                .json(&serde_json::json!({"text": text, "max_length": 20, "min_length": 5}))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            (i, body)
        }));
    }
    for h in handles {
        let (i, body) = h.await.unwrap();
        assert_eq!(body.original_text, format!("Request number {i} speaks. Then more."));
        assert_eq!(body.summary, format!("Request number {i} speaks [5-20]"));
    }
    assert_eq!(backend.calls.load(Ordering::SeqCst), 8);
}

// ── Health / model loading ───────────────────────────────────────────

#[tokio::test]
async fn health_reports_loaded_backend() {
    let (base, _backend) = echo_server().await;

    let body: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["backend"], "echo");
    assert_eq!(body["model"], "echo-model");
}

#[tokio::test]
async fn unloadable_model_is_service_unavailable() {
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        app: text_summarizer::config::AppConfig,
    }

    let dir = tempfile::tempdir().expect("tmp");
    let cfg = Cli::parse_from([
        "t",
        "--summary-backend",
        "huggingface",
        "--summary-model",
        "not a model id",
        "--tokenizer-dir",
        dir.path().to_str().unwrap(),
    ])
    .app;
    let base = spawn_test_server(SharedModel::lazy(cfg)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/summarize"))
        .json(&serde_json::json!({"text": "Anything."}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 503);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "model_load_error");

    let health: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["model_loaded"], false);
    assert_eq!(health["model"], "not a model id");
}
