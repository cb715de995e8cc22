use std::sync::Arc;

use crate::errors::SummarizeError;
use crate::summarize::{LengthBounds, Summarizer};
use crate::tokenizer::SentenceTokenizer;

/// Offline fallback: keeps leading sentences up to `max_length` words.
/// Not abstractive, but deterministic and dependency free.
pub struct ExtractiveSummarizer {
    tokenizer: Arc<SentenceTokenizer>,
}

impl ExtractiveSummarizer {
    pub fn new(tokenizer: Arc<SentenceTokenizer>) -> Self {
        Self { tokenizer }
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, SummarizeError> {
        let max_words = bounds.max_length.max(1);
        let mut out: Vec<String> = Vec::new();
        let mut used = 0usize;
        for sentence in self.tokenizer.split(text) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if used + words.len() > max_words {
                if out.is_empty() {
                    // first sentence alone is over budget: keep its head
                    out.push(words[..max_words].join(" "));
                }
                break;
            }
            used += words.len();
            out.push(words.join(" "));
        }
        Ok(out.join(" "))
    }

    fn name(&self) -> &'static str {
        "extractive"
    }
}
