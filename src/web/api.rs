//! Route handlers.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{ErrorKind, SummarizeError};
use crate::service::{SummaryRequest, SummaryResult};
use crate::web::page::{self, PageView};
use crate::web::AppState;

/// Body of a successful `POST /summarize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub original_text: String,
    pub formatted_original: String,
    pub summary: String,
    /// Seconds spent handling the request, model load included.
    pub processing_time: f64,
}

impl SummaryResponse {
    fn new(result: SummaryResult, processing_time: f64) -> Self {
        Self {
            original_text: result.original_text,
            formatted_original: result.formatted_original,
            summary: result.summary,
            processing_time,
        }
    }
}

/// JSON body for `POST /summarize`.
#[derive(Debug, Deserialize)]
pub struct SummarizeBody {
    pub text: String,
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
}

/// Form fields for `POST /summarize-web`. Blank number inputs fall back to
/// the defaults.
#[derive(Debug, Deserialize)]
pub struct SummarizeForm {
    pub text: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_length: Option<usize>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_length: Option<usize>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn request_with_defaults(
    app: &AppState,
    text: String,
    max_length: Option<usize>,
    min_length: Option<usize>,
) -> SummaryRequest {
    SummaryRequest {
        text,
        max_length: max_length.unwrap_or(app.max_length),
        min_length: min_length.unwrap_or(app.min_length),
    }
}

pub(crate) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Input => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::ModelLoad => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Summarization => StatusCode::BAD_GATEWAY,
    }
}

/// JSON error body: `{"error": "<kind>", "message": "<text>"}`.
pub struct ApiError(SummarizeError);

impl From<SummarizeError> for ApiError {
    fn from(e: SummarizeError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let body = serde_json::json!({
            "error": kind.as_str(),
            "message": self.0.to_string(),
        });
        (status_for(kind), Json(body)).into_response()
    }
}

/// Fetch the shared service and run one summarization on the blocking pool.
async fn run_summary(app: &AppState, req: SummaryRequest) -> Result<SummaryResult, SummarizeError> {
    let service = app.model.get().await?;
    let result = tokio::task::spawn_blocking(move || service.summarize_request(&req))
        .await
        .map_err(|e| SummarizeError::Summarization(format!("summarization task failed: {e}")))?;
    if let Err(e) = &result {
        tracing::warn!(error=%e, kind=e.kind().as_str(), "summarization request failed");
    }
    result
}

/// GET / — Empty input form.
pub async fn index(State(app): State<AppState>) -> Html<String> {
    Html(page::render(&PageView::empty(app.max_length, app.min_length)))
}

/// POST /summarize — JSON request, JSON result with elapsed seconds.
pub async fn summarize_json(
    State(app): State<AppState>,
    Json(body): Json<SummarizeBody>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let started = Instant::now();
    let req = request_with_defaults(&app, body.text, body.max_length, body.min_length);
    let result = run_summary(&app, req).await?;
    let processing_time = started.elapsed().as_secs_f64();
    tracing::info!(processing_time, "summary served");
    Ok(Json(SummaryResponse::new(result, processing_time)))
}

/// POST /summarize-web — Form submission, page re-rendered with the result.
pub async fn summarize_form(
    State(app): State<AppState>,
    Form(form): Form<SummarizeForm>,
) -> (StatusCode, Html<String>) {
    let started = Instant::now();
    let req = request_with_defaults(&app, form.text, form.max_length, form.min_length);
    let mut view = PageView::empty(req.max_length, req.min_length);
    view.text = req.text.clone();

    match run_summary(&app, req).await {
        Ok(result) => {
            let elapsed = started.elapsed().as_secs_f64();
            view.summary = Some(result.summary);
            view.processing_time = Some(format!("{elapsed:.2} seconds"));
            (StatusCode::OK, Html(page::render(&view)))
        }
        Err(e) => {
            let status = status_for(e.kind());
            view.error = Some(e.to_string());
            (status, Html(page::render(&view)))
        }
    }
}

/// GET /health — Whether the model is loaded and which backend serves it.
pub async fn health(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "model_loaded": app.model.is_loaded(),
        "backend": app.model.backend_name(),
        "model": app.model.model_id(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
