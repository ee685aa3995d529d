//! Core library for textdeck: turns a plain-text document into
//! spaced-repetition quiz items.
//!
//! Provides:
//! - Line normalization (punctuation stripping, descriptor detection)
//! - Cloze-style obfuscation of annotated lines
//! - The phrase/paragraph document model with start/end sentinels
//! - Three quiz generators (outline, line context, paragraph fill-in-blank)
//!
//! The library does no I/O; reading files and uploading decks belong to the
//! CLI application.

pub mod document;
pub mod error;
pub mod normalize;
pub mod obfuscate;
pub mod quiz;

pub use document::{Document, Paragraph, Phrase};
pub use error::{QuizError, Result};
pub use normalize::{is_discardable, is_special_descriptor, process_line};
pub use obfuscate::obfuscate;
pub use quiz::{
    generate_all, line_context_items, outline_items, paragraph_blank_items, QuizItem,
    DEFAULT_SHUFFLE_SEED,
};
