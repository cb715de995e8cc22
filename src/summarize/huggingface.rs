use crate::errors::SummarizeError;
use crate::summarize::{LengthBounds, Summarizer};
use reqwest::blocking::Client;
use serde::Deserialize;

/// Hugging Face inference API (or a compatible self-hosted endpoint) running
/// a sequence-to-sequence summarization model.
pub struct HuggingFaceSummarizer {
    model: String,
    endpoint: String,
    token: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Generated {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HuggingFaceSummarizer {
    /// Resolve `model` under `base_url`. Only the identifiers are checked here;
    /// the endpoint loads the weights on first call, and a model it does not
    /// know surfaces then as a model-load error.
    pub fn load(base_url: &str, model: &str, token: Option<String>) -> Result<Self, SummarizeError> {
        let model = model.trim();
        if model.is_empty() || model.contains(char::is_whitespace) {
            return Err(SummarizeError::model_load(model, "invalid model identifier"));
        }
        let base = url::Url::parse(base_url)
            .map_err(|e| SummarizeError::model_load(model, format!("invalid inference url: {e}")))?;
        let endpoint = format!("{}/models/{}", base.as_str().trim_end_matches('/'), model);
        Ok(Self {
            model: model.to_string(),
            endpoint,
            token: token.filter(|t| !t.is_empty()),
            client: Client::new(),
        })
    }
}

impl Summarizer for HuggingFaceSummarizer {
    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizeError> {
        let body = serde_json::json!({
            "inputs": text,
            "parameters": {
                "max_length": bounds.max_length,
                "min_length": bounds.min_length,
                "do_sample": false,
            },
            "options": { "wait_for_model": true },
        });

        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().map_err(|e| {
            SummarizeError::Summarization(format!("connect {}: {e}", self.endpoint))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp
                .json::<ErrorBody>()
                .map(|b| b.error)
                .unwrap_or_else(|_| "no error detail".into());
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(SummarizeError::model_load(
                    &self.model,
                    format!("not found at {}: {detail}", self.endpoint),
                ));
            }
            return Err(SummarizeError::Summarization(format!(
                "status {status} from {}: {detail}",
                self.endpoint
            )));
        }

        let generated: Vec<Generated> = resp
            .json()
            .map_err(|e| SummarizeError::Summarization(format!("decode response: {e}")))?;
        generated
            .into_iter()
            .next()
            .map(|g| g.summary_text)
            .ok_or_else(|| SummarizeError::Summarization("response held no summaries".into()))
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}
