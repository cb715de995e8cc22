use serde::Serialize;

use crate::config::{AppConfig, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};
use crate::errors::SummarizeError;
use crate::format::format_for_display;
use crate::summarize::ModelInvoker;

/// One summarization call. Adapters fill missing bounds from their defaults.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub text: String,
    pub max_length: usize,
    pub min_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub original_text: String,
    pub formatted_original: String,
    pub summary: String,
}

/// Formatter plus model invoker behind one call, shared by the CLI and web
/// adapters.
#[derive(Clone)]
pub struct SummarizationService {
    invoker: ModelInvoker,
    width: usize,
}

impl SummarizationService {
    pub fn new(invoker: ModelInvoker, width: usize) -> Self {
        Self { invoker, width }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, SummarizeError> {
        Ok(Self::new(ModelInvoker::from_config(cfg)?, cfg.display_width))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn backend_name(&self) -> &'static str {
        self.invoker.backend_name()
    }

    /// Both the display formatting and the model see the raw input; the
    /// formatting is cosmetic only.
    pub fn summarize(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<SummaryResult, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        let formatted_original = format_for_display(text, self.width);
        let summary = self.invoker.summarize_raw(text, max_length, min_length)?;
        Ok(SummaryResult {
            original_text: text.to_string(),
            formatted_original,
            summary,
        })
    }

    pub fn summarize_request(&self, req: &SummaryRequest) -> Result<SummaryResult, SummarizeError> {
        self.summarize(&req.text, req.max_length, req.min_length)
    }
}

impl Default for SummaryRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OverflowPolicy, DEFAULT_WIDTH};
    use crate::summarize::testing::ScriptedSummarizer;
    use crate::tokenizer::SentenceTokenizer;
    use std::sync::Arc;

    fn service(backend: Arc<ScriptedSummarizer>) -> SummarizationService {
        let invoker = ModelInvoker::new(
            backend,
            Arc::new(SentenceTokenizer::builtin()),
            OverflowPolicy::Reject,
            10_000,
        );
        SummarizationService::new(invoker, DEFAULT_WIDTH)
    }

    #[test]
    fn default_request_uses_standard_bounds() {
        let req = SummaryRequest::default();
        assert_eq!((req.max_length, req.min_length), (130, 30));
    }

    #[test]
    fn result_pairs_formatted_original_with_summary() {
        let backend = Arc::new(ScriptedSummarizer::ok("The gist."));
        let svc = service(backend.clone());
        let text = "First paragraph.\n\nSecond paragraph.";
        let res = svc.summarize(text, 130, 30).unwrap();

        assert_eq!(res.original_text, text);
        assert_eq!(res.summary, "The gist.");
        assert_eq!(res.formatted_original, format_for_display(text, 80));
        let (seen, _) = backend.last_input.lock().unwrap().clone().unwrap();
        assert_eq!(seen, text);
    }

    #[test]
    fn whitespace_input_fails_before_model_call() {
        let backend = Arc::new(ScriptedSummarizer::ok("unused"));
        let svc = service(backend.clone());
        let err = svc.summarize(" \n\t ", 130, 30).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Input);
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn model_failure_propagates_unchanged() {
        let svc = service(Arc::new(ScriptedSummarizer::failing("CUDA out of memory")));
        let err = svc
            .summarize_request(&SummaryRequest {
                text: "Some text.".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, SummarizeError::Summarization(ref m) if m == "CUDA out of memory"));
    }

    #[test]
    fn result_serializes_with_wire_field_names() {
        let res = SummaryResult {
            original_text: "a".into(),
            formatted_original: "b".into(),
            summary: "c".into(),
        };
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(v["original_text"], "a");
        assert_eq!(v["formatted_original"], "b");
        assert_eq!(v["summary"], "c");
    }
}
