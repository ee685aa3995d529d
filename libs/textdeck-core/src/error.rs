//! Error types for textdeck-core.

use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors that can occur during quiz generation.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The document is too short to quiz on. Every generator needs the two
    /// boundary paragraphs plus at least one real paragraph.
    #[error("need at least 3 paragraphs, found {found}")]
    TooFewParagraphs { found: usize },
}
