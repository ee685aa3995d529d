//! Line normalization for source documents.
//!
//! A source document is plain text, one logical line per source line. Blank
//! lines (empty after punctuation stripping) separate paragraphs, and lines
//! beginning with `;;` are descriptor lines excluded from numbering.

/// Marker prefix for descriptor lines.
pub const DESCRIPTOR_MARKER: &str = ";;";

/// Strip ASCII punctuation from a raw line and trim surrounding whitespace.
///
/// Angle brackets survive so that paragraph and metadata tags pass through
/// to the card text. Idempotent.
pub fn process_line(raw: &str) -> String {
    raw.chars()
        .filter(|&c| !c.is_ascii_punctuation() || c == '<' || c == '>')
        .collect::<String>()
        .trim()
        .to_string()
}

/// A processed line is discardable when nothing remains of it.
///
/// Discardable lines mark paragraph breaks.
pub fn is_discardable(processed: &str) -> bool {
    processed.is_empty()
}

/// A raw line is a special descriptor when it opens with `;;`.
///
/// Checked against the raw line, before any normalization.
pub fn is_special_descriptor(raw: &str) -> bool {
    raw.starts_with(DESCRIPTOR_MARKER)
}
