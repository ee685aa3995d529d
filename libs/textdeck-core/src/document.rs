//! Document model: phrases, paragraphs, and the sentinel-bounded arena.
//!
//! A document is parsed once into an immutable `Document`. Retained lines
//! become [`Phrase`] records stored in a single arena vector, bounded by a
//! synthetic start and end sentinel, so a phrase's preceding and trailing
//! neighbors are simply its arena neighbors. Paragraphs index into the arena.
//!
//! The first paragraph of a document is metadata, not content: its lines are
//! never numbered (they keep the initial `-1` counter value), and real line
//! numbering starts at 1 on the first line of the second paragraph.

use serde::{Deserialize, Serialize};

use crate::normalize::{is_discardable, is_special_descriptor, process_line};
use crate::obfuscate::obfuscate;

/// Raw text of the synthetic start sentinel phrase.
pub const START_OF_TEXT: &str = "START_OF_TEXT";
/// Raw text of the synthetic end sentinel phrase.
pub const END_OF_TEXT: &str = "END_OF_TEXT";

/// One retained line of the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phrase {
    /// `None` for the two sentinels, `-1` for metadata-paragraph lines,
    /// 1-based for content lines.
    pub line_number: Option<i64>,
    /// Original line, punctuation included.
    pub raw_text: String,
    /// Punctuation-stripped, trimmed line.
    pub processed_text: String,
    /// First significant token, used by the fill-in-blank generator. A token
    /// prefixed with `@@` overrides the default first token. Empty for
    /// sentinels.
    pub primary_keyword: String,
}

impl Phrase {
    fn sentinel(raw: &str) -> Self {
        Self {
            line_number: None,
            raw_text: raw.to_string(),
            processed_text: process_line(raw),
            primary_keyword: String::new(),
        }
    }

    fn retained(line_number: i64, raw: &str, processed: String) -> Self {
        Self {
            line_number: Some(line_number),
            raw_text: raw.to_string(),
            processed_text: processed,
            primary_keyword: extract_primary_keyword(raw),
        }
    }

    /// Line with its full annotation: `"{line_number}: {processed}"` for
    /// numbered phrases, the raw sentinel text otherwise.
    pub fn annotated(&self) -> String {
        match self.line_number {
            Some(n) => format!("{}: {}", n, self.processed_text),
            None => self.raw_text.clone(),
        }
    }

    /// Obfuscated form of the annotated line.
    pub fn cryptic(&self) -> String {
        obfuscate(&self.annotated())
    }

    /// True for the two synthetic boundary phrases.
    pub fn is_sentinel(&self) -> bool {
        self.line_number.is_none()
    }
}

/// The first whitespace token of the raw line, unless some token carries the
/// `@@` keyword marker, in which case the stripped remainder of the first such
/// token wins.
fn extract_primary_keyword(raw: &str) -> String {
    for token in raw.split_whitespace() {
        if let Some(rest) = token.strip_prefix("@@") {
            if !rest.is_empty() {
                return process_line(rest);
            }
        }
    }
    raw.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// A maximal run of consecutive phrases not separated by a blank line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// `None` for the two boundary paragraphs, `0` for the metadata
    /// paragraph, `1..=N` for content paragraphs.
    pub ordinal: Option<usize>,
    /// Number of content paragraphs in the whole document. Identical across
    /// every paragraph.
    pub total_count: usize,
    /// Processed text of the paragraph's first retained line; the label used
    /// in outline quizzes.
    pub mnemonic: String,
    /// Arena indices of this paragraph's phrases, in document order.
    pub phrases: Vec<usize>,
}

impl Paragraph {
    /// True for the synthetic start/end boundary paragraphs.
    pub fn is_boundary(&self) -> bool {
        self.ordinal.is_none()
    }

    /// True for the unnumbered first paragraph of the document.
    pub fn is_metadata(&self) -> bool {
        self.ordinal == Some(0)
    }

    /// Position tag `&lt;p{ordinal}/{total}&gt;`, escaped for the flashcard
    /// client. Empty for boundary paragraphs, which are never quizzed.
    pub fn breadcrumb(&self) -> String {
        match self.ordinal {
            Some(ordinal) => format!("&lt;p{}/{}&gt;", ordinal, self.total_count),
            None => String::new(),
        }
    }
}

/// Fully parsed document: the phrase arena plus its paragraph grouping.
///
/// Built once, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    phrases: Vec<Phrase>,
    paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parse a whole document.
    ///
    /// Blank lines separate paragraphs and never enter the arena. Descriptor
    /// lines (`;;`) are skipped entirely but do not end an open paragraph;
    /// a descriptor can still open a paragraph and donate its mnemonic.
    pub fn from_text(text: &str) -> Self {
        let mut phrases = vec![Phrase::sentinel(START_OF_TEXT)];
        let mut body: Vec<Paragraph> = Vec::new();

        // Line numbering is parked at -1 through the metadata paragraph and
        // switches to 1 at the first paragraph break.
        let mut counter: i64 = -1;
        let mut open_new_paragraph = true;
        let mut next_ordinal: usize = 0;

        for raw in text.lines() {
            let processed = process_line(raw);
            if is_discardable(&processed) {
                if counter < 0 {
                    counter = 1;
                }
                open_new_paragraph = true;
                continue;
            }

            if open_new_paragraph {
                open_new_paragraph = false;
                body.push(Paragraph {
                    ordinal: Some(next_ordinal),
                    total_count: 0,
                    mnemonic: processed.clone(),
                    phrases: Vec::new(),
                });
                next_ordinal += 1;
            }

            if is_special_descriptor(raw) {
                continue;
            }

            let idx = phrases.len();
            phrases.push(Phrase::retained(counter, raw, processed));
            if let Some(paragraph) = body.last_mut() {
                paragraph.phrases.push(idx);
            }
            if counter > 0 {
                counter += 1;
            }
        }

        phrases.push(Phrase::sentinel(END_OF_TEXT));
        let end_idx = phrases.len() - 1;

        let mut paragraphs = Vec::with_capacity(body.len() + 2);
        paragraphs.push(Paragraph {
            ordinal: None,
            total_count: 0,
            mnemonic: "S_O_T".to_string(),
            phrases: vec![0],
        });
        paragraphs.extend(body);
        paragraphs.push(Paragraph {
            ordinal: None,
            total_count: 0,
            mnemonic: "E_O_T".to_string(),
            phrases: vec![end_idx],
        });

        // Content paragraphs exclude the metadata paragraph and the two
        // boundary paragraphs.
        let total = paragraphs.len().saturating_sub(3);
        for paragraph in &mut paragraphs {
            paragraph.total_count = total;
        }

        Self {
            phrases,
            paragraphs,
        }
    }

    /// All paragraphs, boundaries included, in document order.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Phrase at an arena index.
    pub fn phrase(&self, idx: usize) -> &Phrase {
        &self.phrases[idx]
    }

    /// The phrase immediately before `idx` in document order. Content phrase
    /// indices run `1..=len-2`, so the neighbor always exists (at worst the
    /// start sentinel).
    pub fn preceding(&self, idx: usize) -> &Phrase {
        &self.phrases[idx - 1]
    }

    /// The phrase immediately after `idx` in document order.
    pub fn trailing(&self, idx: usize) -> &Phrase {
        &self.phrases[idx + 1]
    }
}
