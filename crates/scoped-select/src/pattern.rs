//! Match patterns for the active selection.
//!
//! A pattern is always a *literal* search for the selected text (or the word under a caret),
//! expressed in the regex dialect of the host's search engine. Escaping must follow that
//! engine's rules: the host may not speak the same dialect as the `regex` crate.

use crate::host::BufferText;
use crate::region::Region;
use serde::{Deserialize, Serialize};

/// Regex dialects a host search engine may speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDialect {
    /// The `regex` crate syntax.
    #[default]
    Rust,
    /// Oniguruma (Ruby syntax), as used by TextMate-family editors.
    Oniguruma,
}

impl PatternDialect {
    fn is_meta(self, ch: char) -> bool {
        match self {
            PatternDialect::Rust => regex_syntax_meta(ch),
            PatternDialect::Oniguruma => matches!(
                ch,
                '\\' | '.' | '^' | '$' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
            ),
        }
    }
}

// Same set as `regex::escape`.
fn regex_syntax_meta(ch: char) -> bool {
    matches!(
        ch,
        '\\' | '.'
            | '+'
            | '*'
            | '?'
            | '('
            | ')'
            | '|'
            | '['
            | ']'
            | '{'
            | '}'
            | '^'
            | '$'
            | '#'
            | '&'
            | '-'
            | '~'
    )
}

/// Escape `text` so `dialect` matches it literally.
pub fn escape_literal(text: &str, dialect: PatternDialect) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if dialect.is_meta(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// A whole-word literal pattern for `word`.
pub fn word_pattern(word: &str, dialect: PatternDialect) -> String {
    format!(r"\b{}\b", escape_literal(word, dialect))
}

/// Build the case-sensitive literal pattern for `selection`.
///
/// - A caret matches the surrounding word, bounded by word boundaries.
/// - A non-empty selection matches its exact text.
///
/// Returns `None` when there is nothing to match (a caret outside any word).
pub fn build_pattern<B: BufferText + ?Sized>(buffer: &B, selection: Region) -> Option<String> {
    let dialect = buffer.pattern_dialect();
    if selection.is_empty() {
        let word = buffer.word(selection.begin());
        if word.is_empty() {
            return None;
        }
        Some(word_pattern(&buffer.slice(word), dialect))
    } else {
        Some(escape_literal(&buffer.slice(selection), dialect))
    }
}
