//! Pretty-printing of generated quiz items.

use std::fmt::Write;

use textdeck_core::QuizItem;

/// Render items as a numbered front/back listing for stdout.
pub fn format_items(items: &[QuizItem]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        // write! into a String cannot fail
        let _ = writeln!(out, "[{}] front: {}", i + 1, item.prompt);
        let _ = writeln!(out, "    back:  {}", item.answer);
    }
    out
}
