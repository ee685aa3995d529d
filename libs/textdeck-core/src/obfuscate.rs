//! Cloze-style obfuscation of annotated lines.
//!
//! An annotated line (`"3: the quick fox"`) is reduced to a cryptic recall
//! cue: word tokens keep only their first letter, numeric tokens collapse to
//! a placeholder, and bracketed tags are expanded to HTML-escaped form so the
//! flashcard client renders them literally.

/// Annotation prefix of lines in the unnumbered metadata paragraph.
const METADATA_PREFIX: &str = "-1:";

/// Reduce an annotated line to its cryptic form.
///
/// Token rules, applied on whitespace splits:
/// - the leading token is kept verbatim when it starts with a digit, which
///   preserves the `N:` line-number prefix
/// - a wholly numeric token becomes `#`
/// - the literal `-1:` becomes the escaped `<metadata>` tag
/// - a `<...>` token is re-escaped as `&lt;...&gt;`
/// - anything else keeps only its first character
///
/// The pieces are joined with single spaces and the result lowercased.
pub fn obfuscate(annotated: &str) -> String {
    let mut pieces: Vec<String> = Vec::new();
    for (i, token) in annotated.split_whitespace().enumerate() {
        // split_whitespace never yields an empty token, so first() is safe
        let first = token.chars().next();
        let piece = if i == 0 && first.is_some_and(char::is_numeric) {
            token.to_string()
        } else if token.chars().all(char::is_numeric) {
            "#".to_string()
        } else if token == METADATA_PREFIX {
            "&lt;metadata&gt;".to_string()
        } else if token.len() >= 2 && token.starts_with('<') && token.ends_with('>') {
            format!("&lt;{}&gt;", &token[1..token.len() - 1])
        } else {
            first.map(String::from).unwrap_or_default()
        };
        pieces.push(piece);
    }

    pieces.join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_line_number_prefix_and_initials() {
        assert_eq!(obfuscate("3: the quick fox"), "3: t q f");
    }

    #[test]
    fn collapses_pure_numeric_tokens() {
        assert_eq!(obfuscate("5: released in 1991"), "5: r i #");
    }

    #[test]
    fn expands_metadata_prefix() {
        assert_eq!(obfuscate("-1: Some Title"), "&lt;metadata&gt; s t");
    }

    #[test]
    fn escapes_bracketed_tokens() {
        assert_eq!(obfuscate("2: see <p1/4> here"), "2: s &lt;p1/4&gt; h");
    }

    #[test]
    fn exercises_every_token_branch() {
        // numeric-prefixed leading token, plain words, bracketed token,
        // metadata literal
        assert_eq!(
            obfuscate("7: code is <metadata> -1:"),
            "7: c i &lt;metadata&gt; &lt;metadata&gt;"
        );
    }

    #[test]
    fn lowercases_the_result() {
        assert_eq!(obfuscate("4: The Quick FOX"), "4: t q f");
    }

    #[test]
    fn sentinel_text_reduces_to_initial() {
        assert_eq!(obfuscate("START_OF_TEXT"), "s");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(obfuscate(""), "");
        assert_eq!(obfuscate("   "), "");
    }
}
