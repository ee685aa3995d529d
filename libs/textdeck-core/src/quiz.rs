//! Quiz generation strategies.
//!
//! Three independent generators read the same immutable [`Document`]:
//!
//! - line context: one card per phrase, cued by its obfuscated line between
//!   its two neighbors
//! - paragraph fill-in-blank: one card per phrase, cued by the paragraph's
//!   keyword list with that phrase's keyword blanked
//! - whole-document outline: cards showing a subset of paragraph mnemonics
//!   with the rest blanked
//!
//! [`generate_all`] concatenates them outline-first, so a client that
//! schedules new cards in insertion order studies coarse document structure
//! before fine detail.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{QuizError, Result};

/// Default seed for the outline combination shuffle. Changing the seed
/// changes item ordering only, never correctness.
pub const DEFAULT_SHUFFLE_SEED: u64 = 3982;

/// Placeholder for a blanked keyword or mnemonic.
const BLANK: &str = "_____";

/// Separator between prompt sections, rendered by the flashcard client.
const LINE_BREAK: &str = "<br>";

/// Fraction of outline positions blanked per card.
const OUTLINE_BLANK_RATIO: f64 = 0.30;

/// One flashcard-to-be: front and back text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub prompt: String,
    pub answer: String,
}

/// Every generator needs the two boundary paragraphs plus at least one real
/// paragraph.
fn require_enough_paragraphs(document: &Document) -> Result<()> {
    let found = document.paragraphs().len();
    if found < 3 {
        return Err(QuizError::TooFewParagraphs { found });
    }
    Ok(())
}

/// One card per phrase, metadata paragraph included: the phrase's obfuscated
/// line shown in context between its preceding and trailing neighbors.
pub fn line_context_items(document: &Document) -> Result<Vec<QuizItem>> {
    require_enough_paragraphs(document)?;

    let mut items = Vec::new();
    for paragraph in document.paragraphs() {
        if paragraph.is_boundary() {
            continue;
        }
        for &idx in &paragraph.phrases {
            let target = document.phrase(idx);
            let prompt = format!(
                "{}{}{}{}{}{}",
                document.preceding(idx).annotated(),
                LINE_BREAK,
                paragraph.breadcrumb(),
                target.cryptic(),
                LINE_BREAK,
                document.trailing(idx).annotated(),
            );
            items.push(QuizItem {
                prompt,
                answer: target.annotated(),
            });
        }
    }

    Ok(items)
}

/// One card per phrase per content paragraph: the paragraph's keyword list
/// with exactly the target phrase's keyword blanked.
pub fn paragraph_blank_items(document: &Document) -> Result<Vec<QuizItem>> {
    require_enough_paragraphs(document)?;

    let mut items = Vec::new();
    for paragraph in document.paragraphs() {
        if paragraph.is_boundary() || paragraph.is_metadata() {
            continue;
        }

        let keywords: Vec<&str> = paragraph
            .phrases
            .iter()
            .map(|&idx| document.phrase(idx).primary_keyword.as_str())
            .collect();

        for (blanked, &idx) in paragraph.phrases.iter().enumerate() {
            let mut body = String::new();
            for (pos, keyword) in keywords.iter().enumerate() {
                body.push_str(if pos == blanked { BLANK } else { keyword });
                body.push_str("; ");
            }
            items.push(QuizItem {
                prompt: format!("{}{}{}", paragraph.breadcrumb(), LINE_BREAK, body),
                answer: document.phrase(idx).annotated(),
            });
        }
    }

    Ok(items)
}

/// Outline cards over the content-paragraph mnemonics: each card keeps a
/// combination of positions visible and blanks the rest; every card shares
/// the full outline as its answer.
///
/// Emits at most `2n` items for `n` content paragraphs. The combination list
/// is shuffled with a seeded RNG so the same seed always yields the same
/// deck order.
pub fn outline_items(document: &Document, shuffle_seed: u64) -> Result<Vec<QuizItem>> {
    require_enough_paragraphs(document)?;

    let mnemonics: Vec<&str> = document
        .paragraphs()
        .iter()
        .filter(|p| !p.is_boundary() && !p.is_metadata())
        .map(|p| p.mnemonic.as_str())
        .collect();

    let n = mnemonics.len();
    let answer: String = mnemonics
        .iter()
        .map(|m| format!("{};{} ", m, LINE_BREAK))
        .collect();

    let num_blanks = (n as f64 * OUTLINE_BLANK_RATIO).ceil() as usize;
    let mut combos = index_combinations(n, n - num_blanks);

    let mut rng = StdRng::seed_from_u64(shuffle_seed);
    combos.shuffle(&mut rng);

    let count = combos.len().min(n * 2);
    let mut items = Vec::with_capacity(count);
    for combo in combos.into_iter().take(count) {
        let mut keys = vec![BLANK; n];
        for kept in combo {
            keys[kept] = mnemonics[kept];
        }
        let prompt: String = keys
            .iter()
            .map(|k| format!("{};{} ", k, LINE_BREAK))
            .collect();
        items.push(QuizItem {
            prompt,
            answer: answer.clone(),
        });
    }

    Ok(items)
}

/// All `k`-element index subsets of `0..n`, in lexicographic order.
fn index_combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn fill(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        let remaining = k - current.len();
        for i in start..=(n - remaining) {
            current.push(i);
            fill(i + 1, n, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if k <= n {
        fill(0, n, k, &mut Vec::with_capacity(k), &mut out);
    }
    out
}

/// Run all three generators in deck order: outline, line context, paragraph
/// fill-in-blank.
pub fn generate_all(document: &Document, shuffle_seed: u64) -> Result<Vec<QuizItem>> {
    let mut items = outline_items(document, shuffle_seed)?;
    items.extend(line_context_items(document)?);
    items.extend(paragraph_blank_items(document)?);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ONE_PARAGRAPH: &str = "\
Title Card

first phrase here
second phrase follows
third phrase closes
";

    const FOUR_PARAGRAPHS: &str = "\
Outline Doc

alpha one
alpha two

bravo one

charlie one
charlie two

delta one
";

    #[test]
    fn too_few_paragraphs_is_an_error() {
        let doc = Document::from_text("");
        let err = line_context_items(&doc).unwrap_err();
        assert!(matches!(err, QuizError::TooFewParagraphs { found: 2 }));
        assert!(paragraph_blank_items(&doc).is_err());
        assert!(outline_items(&doc, DEFAULT_SHUFFLE_SEED).is_err());
    }

    #[test]
    fn line_context_covers_every_retained_phrase() {
        let doc = Document::from_text(ONE_PARAGRAPH);
        let items = line_context_items(&doc).unwrap();
        // 1 metadata phrase + 3 content phrases
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn line_context_prompt_shape() {
        let doc = Document::from_text(ONE_PARAGRAPH);
        let items = line_context_items(&doc).unwrap();

        // metadata phrase sits between the start sentinel and the first
        // content line
        assert_eq!(
            items[0].prompt,
            "START_OF_TEXT<br>&lt;p0/1&gt;&lt;metadata&gt; t c<br>1: first phrase here"
        );
        assert_eq!(items[0].answer, "-1: Title Card");

        // first content phrase is cued by its obfuscated line
        assert_eq!(
            items[1].prompt,
            "-1: Title Card<br>&lt;p1/1&gt;1: f p h<br>2: second phrase follows"
        );
        assert_eq!(items[1].answer, "1: first phrase here");

        // last content phrase trails into the end sentinel
        assert_eq!(
            items[3].prompt,
            "2: second phrase follows<br>&lt;p1/1&gt;3: t p c<br>END_OF_TEXT"
        );
    }

    #[test]
    fn paragraph_blank_yields_one_item_per_phrase() {
        let doc = Document::from_text(ONE_PARAGRAPH);
        let items = paragraph_blank_items(&doc).unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn paragraph_blank_blanks_exactly_one_position() {
        let doc = Document::from_text(ONE_PARAGRAPH);
        let items = paragraph_blank_items(&doc).unwrap();

        assert_eq!(
            items[0].prompt,
            "&lt;p1/1&gt;<br>_____; second; third; "
        );
        assert_eq!(items[0].answer, "1: first phrase here");
        assert_eq!(
            items[1].prompt,
            "&lt;p1/1&gt;<br>first; _____; third; "
        );
        assert_eq!(
            items[2].prompt,
            "&lt;p1/1&gt;<br>first; second; _____; "
        );

        for item in &items {
            assert_eq!(item.prompt.matches(BLANK).count(), 1);
        }
    }

    #[test]
    fn paragraph_blank_skips_metadata() {
        let doc = Document::from_text(ONE_PARAGRAPH);
        let items = paragraph_blank_items(&doc).unwrap();
        assert!(items.iter().all(|i| !i.prompt.starts_with("&lt;p0/")));
    }

    #[test]
    fn outline_blank_count_follows_the_ratio() {
        // n = 4: ceil(1.2) = 2 blanks, so each card keeps 2 of 4 mnemonics
        let doc = Document::from_text(FOUR_PARAGRAPHS);
        let items = outline_items(&doc, DEFAULT_SHUFFLE_SEED).unwrap();
        // C(4, 2) = 6 combinations, capped at 2n = 8
        assert_eq!(items.len(), 6);
        for item in &items {
            assert_eq!(item.prompt.matches(BLANK).count(), 2);
        }
    }

    #[test]
    fn outline_answer_is_the_full_outline() {
        let doc = Document::from_text(FOUR_PARAGRAPHS);
        let items = outline_items(&doc, DEFAULT_SHUFFLE_SEED).unwrap();
        let expected = "alpha one;<br> bravo one;<br> charlie one;<br> delta one;<br> ";
        for item in &items {
            assert_eq!(item.answer, expected);
        }
    }

    #[test]
    fn outline_is_deterministic_for_a_fixed_seed() {
        let doc = Document::from_text(FOUR_PARAGRAPHS);
        let first = outline_items(&doc, DEFAULT_SHUFFLE_SEED).unwrap();
        let second = outline_items(&doc, DEFAULT_SHUFFLE_SEED).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn outline_seed_changes_ordering_not_content() {
        let doc = Document::from_text(FOUR_PARAGRAPHS);
        let mut a = outline_items(&doc, 1).unwrap();
        let mut b = outline_items(&doc, 2).unwrap();
        assert_eq!(a.len(), b.len());
        a.sort_by(|x, y| x.prompt.cmp(&y.prompt));
        b.sort_by(|x, y| x.prompt.cmp(&y.prompt));
        assert_eq!(a, b);
    }

    #[test]
    fn outline_caps_items_at_twice_the_paragraph_count() {
        // n = 6: ceil(1.8) = 2 blanks, C(6, 4) = 15 combinations, cap 12
        let text = "m\n\na\n\nb\n\nc\n\nd\n\ne\n\nf\n";
        let doc = Document::from_text(text);
        let items = outline_items(&doc, DEFAULT_SHUFFLE_SEED).unwrap();
        assert_eq!(items.len(), 12);
    }

    #[test]
    fn outline_without_content_paragraphs_is_empty() {
        // only a metadata paragraph: n = 0
        let doc = Document::from_text("just\nmetadata\nlines\n");
        let items = outline_items(&doc, DEFAULT_SHUFFLE_SEED).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn generate_all_orders_outline_context_blank() {
        let doc = Document::from_text(FOUR_PARAGRAPHS);
        let outline = outline_items(&doc, DEFAULT_SHUFFLE_SEED).unwrap();
        let context = line_context_items(&doc).unwrap();
        let blanks = paragraph_blank_items(&doc).unwrap();
        let all = generate_all(&doc, DEFAULT_SHUFFLE_SEED).unwrap();

        assert_eq!(all.len(), outline.len() + context.len() + blanks.len());
        assert_eq!(&all[..outline.len()], &outline[..]);
        assert_eq!(&all[outline.len()..outline.len() + context.len()], &context[..]);
        assert_eq!(&all[outline.len() + context.len()..], &blanks[..]);
    }

    #[test]
    fn index_combinations_are_lexicographic() {
        assert_eq!(
            index_combinations(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
        assert_eq!(index_combinations(3, 0), vec![Vec::<usize>::new()]);
        assert_eq!(index_combinations(2, 3), Vec::<Vec<usize>>::new());
        assert_eq!(index_combinations(0, 0), vec![Vec::<usize>::new()]);
    }
}
