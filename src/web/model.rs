use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::config::AppConfig;
use crate::errors::SummarizeError;
use crate::service::SummarizationService;

/// Process-wide summarization service, built at most once and then shared
/// read-only. A failed load is not cached; the next request tries again.
pub struct SharedModel {
    model_id: String,
    config: Option<AppConfig>,
    cell: OnceCell<Arc<SummarizationService>>,
}

impl SharedModel {
    /// Load from `config` on first use.
    pub fn lazy(config: AppConfig) -> Self {
        Self {
            model_id: config.summary_model.clone(),
            config: Some(config),
            cell: OnceCell::new(),
        }
    }

    /// Wrap an already built service serving `model_id`.
    pub fn preloaded(service: SummarizationService, model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            config: None,
            cell: OnceCell::new_with(Some(Arc::new(service))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.cell.get().map(|s| s.backend_name())
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub async fn get(&self) -> Result<Arc<SummarizationService>, SummarizeError> {
        self.cell
            .get_or_try_init(|| self.load())
            .await
            .map(Arc::clone)
    }

    async fn load(&self) -> Result<Arc<SummarizationService>, SummarizeError> {
        let Some(cfg) = self.config.clone() else {
            return Err(SummarizeError::model_load("<none>", "no model configured"));
        };
        let model = cfg.summary_model.clone();
        tracing::info!(%model, backend=%cfg.summary_backend, "loading summarization model");
        tokio::task::spawn_blocking(move || SummarizationService::from_config(&cfg))
            .await
            .map_err(|e| SummarizeError::model_load(&model, format!("loader task failed: {e}")))?
            .map(Arc::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverflowPolicy;
    use crate::summarize::testing::ScriptedSummarizer;
    use crate::summarize::ModelInvoker;
    use crate::tokenizer::SentenceTokenizer;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        app: AppConfig,
    }

    #[tokio::test]
    async fn preloaded_model_is_shared() {
        let svc = SummarizationService::new(
            ModelInvoker::new(
                Arc::new(ScriptedSummarizer::ok("s")),
                Arc::new(SentenceTokenizer::builtin()),
                OverflowPolicy::Reject,
                100,
            ),
            80,
        );
        let shared = SharedModel::preloaded(svc, "scripted-model");
        assert!(shared.is_loaded());
        assert_eq!(shared.model_id(), "scripted-model");
        let a = shared.get().await.unwrap();
        let b = shared.get().await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(shared.backend_name(), Some("scripted"));
    }

    #[cfg(feature = "summarizer-extractive")]
    #[tokio::test]
    async fn lazy_model_loads_once_under_concurrency() {
        let dir = tempfile::tempdir().expect("tmp");
        let cfg = Cli::parse_from([
            "t",
            "--summary-backend",
            "extractive",
            "--tokenizer-dir",
            dir.path().to_str().unwrap(),
        ])
        .app;
        let shared = Arc::new(SharedModel::lazy(cfg));
        assert!(!shared.is_loaded());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let shared = shared.clone();
            handles.push(tokio::spawn(async move { shared.get().await.unwrap() }));
        }
        let mut services = Vec::new();
        for h in handles {
            services.push(h.await.unwrap());
        }
        assert!(services.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(shared.backend_name(), Some("extractive"));
        assert!(dir.path().join(crate::tokenizer::RESOURCE_FILE).is_file());
    }

    #[tokio::test]
    async fn failed_load_is_reported_and_not_cached() {
        let dir = tempfile::tempdir().expect("tmp");
        let cfg = Cli::parse_from([
            "t",
            "--summary-backend",
            "gpt-9",
            "--tokenizer-dir",
            dir.path().to_str().unwrap(),
        ])
        .app;
        let shared = SharedModel::lazy(cfg);
        let err = shared.get().await.err().unwrap();
        assert_eq!(err.kind(), crate::errors::ErrorKind::ModelLoad);
        assert!(!shared.is_loaded());
        assert_eq!(shared.model_id(), "facebook/bart-large-cnn");
    }
}
