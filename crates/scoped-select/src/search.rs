//! Text search helpers.
//!
//! This module provides search APIs over a UTF-8 `&str`, using **character offsets**
//! (not byte offsets) for all public inputs/outputs. It supports:
//!
//! - regex search (the dialect of the `regex` crate)
//! - plain substring search (escaped and compiled into a regex)
//! - literal forward/backward scans used by the scope scanners

use crate::region::Region;
use regex::{Regex, RegexBuilder};

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            regex: true,
        }
    }
}

/// Search errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    InvalidRegex(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegex(err) => write!(f, "Invalid regex: {}", err),
        }
    }
}

impl std::error::Error for SearchError {}

/// Char <-> byte offset table for a string.
#[derive(Debug)]
pub struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    /// Build the table for `text`.
    pub fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    /// Number of characters in the indexed text.
    pub fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    /// Byte offset of a character offset (clamped to the end of the text).
    pub fn char_to_byte(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .cloned()
            .unwrap_or(self.text_len)
    }

    /// Character offset of a byte offset (rounded up to the next char boundary).
    pub fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }

    /// The character at `char_offset`, if any.
    pub fn char_at(&self, text: &str, char_offset: usize) -> Option<char> {
        if char_offset >= self.char_count() {
            return None;
        }
        let start = self.char_to_byte[char_offset];
        let end = self.char_to_byte[char_offset + 1];
        text.get(start..end)?.chars().next()
    }
}

fn compile_search_regex(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .multi_line(true)
        .build()
        .map_err(|err| SearchError::InvalidRegex(err.to_string()))
}

/// Find the next non-empty occurrence of `query` in `text`, starting at `from_char`.
///
/// Returns `Ok(None)` if no match is found (or if `query` is empty).
pub fn find_next(
    text: &str,
    query: &str,
    options: SearchOptions,
    from_char: usize,
) -> Result<Option<Region>, SearchError> {
    if query.is_empty() {
        return Ok(None);
    }

    let re = compile_search_regex(query, options)?;
    let index = CharIndex::new(text);

    let mut start_char = from_char.min(index.char_count());
    loop {
        let start_byte = index.char_to_byte(start_char);
        let Some(m) = re.find_at(text, start_byte) else {
            return Ok(None);
        };

        let candidate = Region::new(index.byte_to_char(m.start()), index.byte_to_char(m.end()));
        if candidate.is_empty() {
            if candidate.end() >= index.char_count() {
                return Ok(None);
            }
            start_char = candidate.end() + 1;
            continue;
        }

        return Ok(Some(candidate));
    }
}

/// Find all non-empty occurrences of `query` in `text`, in buffer order.
pub fn find_all(
    text: &str,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<Region>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile_search_regex(query, options)?;
    let index = CharIndex::new(text);

    Ok(re
        .find_iter(text)
        .map(|m| Region::new(index.byte_to_char(m.start()), index.byte_to_char(m.end())))
        .filter(|candidate| !candidate.is_empty())
        .collect())
}

/// Char offset of the last occurrence of `needle` that ends at or before `before_char`.
pub fn rfind_literal(
    text: &str,
    index: &CharIndex,
    needle: &str,
    before_char: usize,
) -> Option<usize> {
    let limit = index.char_to_byte(before_char);
    text[..limit]
        .rfind(needle)
        .map(|byte| index.byte_to_char(byte))
}

/// Char offset of the first occurrence of `needle` that starts at or after `from_char`.
pub fn find_literal(text: &str, index: &CharIndex, needle: &str, from_char: usize) -> Option<usize> {
    let start = index.char_to_byte(from_char);
    text[start..]
        .find(needle)
        .map(|byte| index.byte_to_char(start + byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_next_reports_char_offsets() {
        let text = "héllo wörld wörld";
        let m = find_next(text, "wörld", SearchOptions::default(), 0)
            .unwrap()
            .unwrap();
        assert_eq!(m, Region::new(6, 11));

        let m = find_next(text, "wörld", SearchOptions::default(), 7)
            .unwrap()
            .unwrap();
        assert_eq!(m, Region::new(12, 17));

        assert_eq!(
            find_next(text, "wörld", SearchOptions::default(), 13).unwrap(),
            None
        );
    }

    #[test]
    fn test_find_next_skips_empty_matches() {
        let m = find_next("ab", "x*", SearchOptions::default(), 0).unwrap();
        assert_eq!(m, None);
    }

    #[test]
    fn test_find_all_literal_and_case() {
        let options = SearchOptions {
            case_sensitive: false,
            regex: false,
        };
        let matches = find_all("a.b A.B axb", "a.b", options).unwrap();
        assert_eq!(matches, vec![Region::new(0, 3), Region::new(4, 7)]);
    }

    #[test]
    fn test_invalid_regex() {
        let err = find_all("abc", "(", SearchOptions::default()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRegex(_)));
    }

    #[test]
    fn test_literal_scans() {
        let text = "é(a)(b)";
        let index = CharIndex::new(text);
        assert_eq!(rfind_literal(text, &index, "(", 7), Some(4));
        assert_eq!(rfind_literal(text, &index, "(", 4), Some(1));
        assert_eq!(rfind_literal(text, &index, "(", 1), None);
        assert_eq!(find_literal(text, &index, ")", 0), Some(3));
        assert_eq!(find_literal(text, &index, ")", 4), Some(6));
        assert_eq!(find_literal(text, &index, ")", 7), None);
        assert_eq!(index.char_at(text, 0), Some('é'));
    }
}
