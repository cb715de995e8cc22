use std::sync::Arc;

use crate::config::{AppConfig, OverflowPolicy};
use crate::errors::SummarizeError;
use crate::tokenizer::SentenceTokenizer;

#[cfg(feature = "summarizer-extractive")]
mod extractive;
mod huggingface;
#[cfg(feature = "summarizer-ollama")]
mod ollama;

#[cfg(feature = "summarizer-extractive")]
pub use extractive::ExtractiveSummarizer;
pub use huggingface::HuggingFaceSummarizer;
#[cfg(feature = "summarizer-ollama")]
pub use ollama::OllamaSummarizer;

/// Length bounds handed to a backend. Units are whatever the backend counts
/// (tokens for hosted models, words for the extractive backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub max_length: usize,
    pub min_length: usize,
}

/// A summarization backend. Calls are blocking and decode deterministically.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizeError>;

    fn name(&self) -> &'static str;
}

/// Resolve the configured backend and model. Fails with a model-load error
/// when the backend is unknown or the model cannot be resolved.
#[cfg_attr(not(feature = "summarizer-extractive"), allow(unused_variables))]
pub fn build_summarizer(
    cfg: &AppConfig,
    tokenizer: Arc<SentenceTokenizer>,
) -> Result<Arc<dyn Summarizer>, SummarizeError> {
    match cfg.summary_backend.as_str() {
        "huggingface" => Ok(Arc::new(HuggingFaceSummarizer::load(
            &cfg.inference_url,
            &cfg.summary_model,
            cfg.hf_token.clone(),
        )?)),
        #[cfg(feature = "summarizer-ollama")]
        "ollama" => Ok(Arc::new(OllamaSummarizer::load(
            &cfg.ollama_host,
            &cfg.summary_model,
        )?)),
        #[cfg(feature = "summarizer-extractive")]
        "extractive" => Ok(Arc::new(ExtractiveSummarizer::new(tokenizer))),
        other => Err(SummarizeError::UnknownBackend(other.to_string())),
    }
}

/// Input handling around a backend: rejects blank text, applies the overflow
/// policy, and turns empty output into a failure.
#[derive(Clone)]
pub struct ModelInvoker {
    backend: Arc<dyn Summarizer>,
    tokenizer: Arc<SentenceTokenizer>,
    overflow: OverflowPolicy,
    max_input_chars: usize,
}

impl ModelInvoker {
    pub fn new(
        backend: Arc<dyn Summarizer>,
        tokenizer: Arc<SentenceTokenizer>,
        overflow: OverflowPolicy,
        max_input_chars: usize,
    ) -> Self {
        Self {
            backend,
            tokenizer,
            overflow,
            max_input_chars,
        }
    }

    /// Ensure the tokenizer data, then resolve the configured model.
    pub fn from_config(cfg: &AppConfig) -> Result<Self, SummarizeError> {
        let dir = cfg.tokenizer_dir();
        let tokenizer = SentenceTokenizer::ensure_and_load(&dir, cfg.tokenizer_url.as_deref())
            .map(Arc::new)
            .unwrap_or_else(|e| {
                tracing::warn!(dir=%dir.display(), error=%e, "tokenizer data unavailable, using built-in list");
                Arc::new(SentenceTokenizer::builtin())
            });
        let backend = build_summarizer(cfg, tokenizer.clone())?;
        tracing::info!(
            backend = backend.name(),
            model = %cfg.summary_model,
            "summarization model ready"
        );
        Ok(Self::new(backend, tokenizer, cfg.overflow, cfg.max_input_chars))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn summarize_raw(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        if min_length > max_length {
            tracing::warn!(min_length, max_length, "min_length exceeds max_length, passing through");
        }
        let input = self.apply_overflow(text)?;
        let started = std::time::Instant::now();
        let summary = self.backend.summarize(
            input,
            LengthBounds {
                max_length,
                min_length,
            },
        )?;
        tracing::debug!(
            backend = self.backend.name(),
            input_chars = input.chars().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend returned"
        );
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(SummarizeError::Summarization(format!(
                "{} returned an empty summary",
                self.backend.name()
            )));
        }
        Ok(summary.to_string())
    }

    fn apply_overflow<'a>(&self, text: &'a str) -> Result<&'a str, SummarizeError> {
        let len = text.chars().count();
        if len <= self.max_input_chars {
            return Ok(text);
        }
        match self.overflow {
            OverflowPolicy::Pass => Ok(text),
            OverflowPolicy::Reject => Err(SummarizeError::InputTooLong {
                len,
                limit: self.max_input_chars,
            }),
            OverflowPolicy::Truncate => {
                let limit = text
                    .char_indices()
                    .nth(self.max_input_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                let cut = self
                    .tokenizer
                    .last_boundary_before(text, limit)
                    .unwrap_or(limit);
                tracing::info!(len, kept_bytes = cut, "truncated long input");
                Ok(&text[..cut])
            }
        }
    }
}
