use crate::errors::SummarizeError;
use crate::summarize::{LengthBounds, Summarizer};
use reqwest::blocking::Client;
use serde::Deserialize;

pub struct OllamaSummarizer {
    host: String,
    model: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Tags {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

impl OllamaSummarizer {
    pub fn new(host: String, model: String) -> Self {
        Self {
            host,
            model,
            client: Client::new(),
        }
    }

    /// Connect to `host` and make sure it serves `model`.
    pub fn load(host: &str, model: &str) -> Result<Self, SummarizeError> {
        let s = Self::new(host.trim_end_matches('/').to_string(), model.to_string());
        let url = format!("{}/api/tags", s.host);
        let resp = s
            .client
            .get(&url)
            .send()
            .map_err(|e| SummarizeError::model_load(model, format!("connect {}: {e}", s.host)))?;
        if !resp.status().is_success() {
            return Err(SummarizeError::model_load(
                model,
                format!("status {} from {}", resp.status(), s.host),
            ));
        }
        let tags: Tags = resp
            .json()
            .map_err(|e| SummarizeError::model_load(model, format!("decode tags: {e}")))?;
        // "llama3.2" matches "llama3.2:latest"
        let served = tags.models.iter().any(|m| {
            m.name == model || m.name.strip_suffix(":latest") == Some(model)
        });
        if !served {
            return Err(SummarizeError::model_load(
                model,
                format!("model not available on {}", s.host),
            ));
        }
        Ok(s)
    }

    fn prompt(text: &str, bounds: LengthBounds) -> String {
        format!(
            "[System]\nYou are a concise, factual summarizer. Write an abstractive summary of the text below in your own words, between {} and {} words. Reply with the summary only.\n\n[User]\n{}",
            bounds.min_length, bounds.max_length, text
        )
    }
}

impl Summarizer for OllamaSummarizer {
    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizeError> {
        let url = format!("{}/api/generate", self.host.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "prompt": Self::prompt(text, bounds),
            "stream": false,
            "options": {
                "temperature": 0,
                "num_predict": bounds.max_length,
            },
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| SummarizeError::Summarization(format!("connect {}: {e}", self.host)))?;
        if !resp.status().is_success() {
            return Err(SummarizeError::Summarization(format!(
                "status {} from {}",
                resp.status(),
                self.host
            )));
        }
        let v: serde_json::Value = resp
            .json()
            .map_err(|e| SummarizeError::Summarization(format!("decode response: {e}")))?;
        Ok(v.get("response")
            .and_then(|x| x.as_str())
            .unwrap_or("")
            .to_string())
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
