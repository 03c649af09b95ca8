use thiserror::Error;

/// An answer that does not address a real question or option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelection {
    #[error("question {question} is out of range ({question_count} questions)")]
    QuestionOutOfRange {
        question: usize,
        question_count: usize,
    },

    #[error("option {option} is out of range for question {question} ({option_count} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        option_count: usize,
    },
}

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] InvalidSelection),

    #[error("question bank misconfigured: {0}")]
    Configuration(String),

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
