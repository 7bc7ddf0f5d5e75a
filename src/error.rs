use thiserror::Error;

/// Failures the quiz core reports to its caller.
///
/// Timer expiry is not an error (it resolves the question as wrong) and a
/// second confetti start while one is playing is ignored, so neither shows up
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("level {} is locked", .level + 1)]
    LevelLocked { level: usize },
    #[error("level index {level} does not exist")]
    UnknownLevel { level: usize },
    #[error("level {level} question {question}: {reason}")]
    InvalidQuestion {
        level: usize,
        question: usize,
        reason: String,
    },
    #[error("level {level} has no questions")]
    EmptyLevel { level: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::Config(err.to_string())
    }
}
