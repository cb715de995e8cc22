use std::path::PathBuf;

use clap::{Args, ValueEnum};

pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_MAX_LENGTH: usize = 130;
pub const DEFAULT_MIN_LENGTH: usize = 30;
pub const DEFAULT_WIDTH: usize = 80;

/// What to do with input longer than `max_input_chars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverflowPolicy {
    /// Fail with an input error.
    Reject,
    /// Cut at the last sentence boundary that fits.
    Truncate,
    /// Hand the text to the backend unchanged.
    Pass,
}

#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// huggingface, ollama or extractive
    #[arg(long, env = "SUMMARY_BACKEND", default_value = "huggingface")]
    pub summary_backend: String,

    #[arg(long, env = "SUMMARY_MODEL", default_value = DEFAULT_MODEL)]
    pub summary_model: String,

    #[arg(
        long,
        env = "INFERENCE_URL",
        default_value = "https://api-inference.huggingface.co"
    )]
    pub inference_url: String,

    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub hf_token: Option<String>,

    #[arg(long, env = "OLLAMA_HOST", default_value = "http://127.0.0.1:11434")]
    pub ollama_host: String,

    #[arg(long, env = "DISPLAY_WIDTH", default_value_t = DEFAULT_WIDTH)]
    pub display_width: usize,

    #[arg(long, env = "DEFAULT_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    #[arg(long, env = "DEFAULT_MIN_LENGTH", default_value_t = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,

    #[arg(long, env = "MAX_INPUT_CHARS", default_value_t = 12_000)]
    pub max_input_chars: usize,

    #[arg(long, env = "INPUT_OVERFLOW", value_enum, default_value_t = OverflowPolicy::Reject)]
    pub overflow: OverflowPolicy,

    /// Where the sentence tokenizer data lives; defaults to the user cache dir.
    #[arg(long, env = "TOKENIZER_DIR")]
    pub tokenizer_dir: Option<PathBuf>,

    /// Fetched when the tokenizer data is missing locally.
    #[arg(long, env = "TOKENIZER_URL")]
    pub tokenizer_url: Option<String>,
}

impl AppConfig {
    pub fn tokenizer_dir(&self) -> PathBuf {
        self.tokenizer_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .map(|d| d.join("text-summarizer"))
                .unwrap_or_else(|| PathBuf::from(".text-summarizer"))
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.display_width == 0 {
            return Err("display_width must be > 0".into());
        }
        if self.max_input_chars == 0 {
            return Err("max_input_chars must be > 0".into());
        }
        if self.min_length > self.max_length {
            return Err("default min_length is larger than default max_length".into());
        }
        match self.summary_backend.as_str() {
            "huggingface" => {
                url::Url::parse(&self.inference_url)
                    .map_err(|_| "Invalid INFERENCE_URL URL format".to_string())?;
            }
            "ollama" => {
                url::Url::parse(&self.ollama_host)
                    .map_err(|_| "Invalid OLLAMA_HOST URL format".to_string())?;
            }
            "extractive" => {}
            other => return Err(format!("unknown summary backend: {other}")),
        }
        if let Some(u) = &self.tokenizer_url {
            url::Url::parse(u).map_err(|_| "Invalid TOKENIZER_URL URL format".to_string())?;
        }
        Ok(())
    }
}
