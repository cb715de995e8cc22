use thiserror::Error;

/// Coarse classification used by the adapters to pick a status code or message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    ModelLoad,
    Summarization,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Input => "input_error",
            ErrorKind::ModelLoad => "model_load_error",
            ErrorKind::Summarization => "summarization_error",
        }
    }
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("input text cannot be empty")]
    EmptyInput,
    #[error("input text is {len} characters, limit is {limit}")]
    InputTooLong { len: usize, limit: usize },
    #[error("unknown summary backend: {0}")]
    UnknownBackend(String),
    #[error("failed to load summarization model {model}: {reason}")]
    ModelLoad { model: String, reason: String },
    #[error("summarization failed: {0}")]
    Summarization(String),
}

impl SummarizeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SummarizeError::EmptyInput | SummarizeError::InputTooLong { .. } => ErrorKind::Input,
            SummarizeError::UnknownBackend(_) | SummarizeError::ModelLoad { .. } => {
                ErrorKind::ModelLoad
            }
            SummarizeError::Summarization(_) => ErrorKind::Summarization,
        }
    }

    pub(crate) fn model_load(model: &str, reason: impl Into<String>) -> Self {
        SummarizeError::ModelLoad {
            model: model.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_three_kinds() {
        assert_eq!(SummarizeError::EmptyInput.kind(), ErrorKind::Input);
        assert_eq!(
            SummarizeError::InputTooLong { len: 10, limit: 5 }.kind(),
            ErrorKind::Input
        );
        assert_eq!(
            SummarizeError::UnknownBackend("gpt".into()).kind(),
            ErrorKind::ModelLoad
        );
        assert_eq!(
            SummarizeError::model_load("m", "missing").kind(),
            ErrorKind::ModelLoad
        );
        assert_eq!(
            SummarizeError::Summarization("boom".into()).kind(),
            ErrorKind::Summarization
        );
    }

    #[test]
    fn messages_carry_the_underlying_cause() {
        let e = SummarizeError::model_load("facebook/bart-large-cnn", "status 404");
        assert_eq!(
            e.to_string(),
            "failed to load summarization model facebook/bart-large-cnn: status 404"
        );
        let e = SummarizeError::Summarization("index out of range in self".into());
        assert!(e.to_string().ends_with("index out of range in self"));
    }
}
