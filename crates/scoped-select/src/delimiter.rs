//! Delimiter-pair scope resolution.
//!
//! Finds the contents of the smallest (or Nth enclosing) matching delimiter pair around a
//! selection. Delimiters inside comments or strings are transparent: they never change the
//! nesting depth and are never chosen as a boundary.

use crate::error::ScopeError;
use crate::host::BufferText;
use crate::region::Region;
use crate::scope_label::is_comment_or_string;
use crate::search::{CharIndex, find_literal, rfind_literal};
use log::debug;

/// An open/close delimiter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterPair {
    /// Opening delimiter.
    pub open: &'static str,
    /// Closing delimiter.
    pub close: &'static str,
    /// Name used in status messages.
    pub name: &'static str,
}

impl DelimiterPair {
    /// `( )`
    pub const PARENTHESES: Self = Self {
        open: "(",
        close: ")",
        name: "parentheses",
    };
    /// `{ }`
    pub const CURLY_BRACES: Self = Self {
        open: "{",
        close: "}",
        name: "curly braces",
    };
    /// `[ ]`
    pub const SQUARE_BRACKETS: Self = Self {
        open: "[",
        close: "]",
        name: "square brackets",
    };
    /// `< >`
    pub const ANGLE_BRACKETS: Self = Self {
        open: "<",
        close: ">",
        name: "angle brackets",
    };
}

/// Resolve the region between the delimiters of the enclosing `pair`.
///
/// `repeat_count` skips outward: `0` is the innermost enclosing pair, `1` the pair around
/// that, and so on. The returned region excludes the delimiters themselves.
pub fn resolve_delimiter_scope<B: BufferText + ?Sized>(
    buffer: &B,
    selection: Region,
    repeat_count: usize,
    pair: DelimiterPair,
) -> Result<Region, ScopeError> {
    let text = buffer.text();
    let index = CharIndex::new(&text);

    let open = find_enclosing_open(buffer, &text, &index, selection.begin(), repeat_count, pair)
        .ok_or(ScopeError::NoMatchingOpen(pair.name))?;
    let close = find_enclosing_close(buffer, &text, &index, selection.end(), repeat_count, pair)
        .ok_or(ScopeError::NoMatchingClose(pair.name))?;

    let contents_begin = open + pair.open.chars().count();
    debug!(
        "delimiter scope {}: open at {}, close at {}",
        pair.name, open, close
    );
    Ok(Region::new(contents_begin, close.max(contents_begin)))
}

fn find_enclosing_open<B: BufferText + ?Sized>(
    buffer: &B,
    text: &str,
    index: &CharIndex,
    from: usize,
    repeat_count: usize,
    pair: DelimiterPair,
) -> Option<usize> {
    let mut cursor = from;
    let mut unmatched_depth = 0usize;
    let mut open_match_count = 0usize;

    loop {
        let open = rfind_literal(text, index, pair.open, cursor)?;
        let close = rfind_literal(text, index, pair.close, cursor);

        if let Some(close) = close.filter(|&close| close > open) {
            // A close between the open candidate and the cursor pairs with an open further back.
            if !is_comment_or_string(&buffer.scope_name(close)) {
                unmatched_depth += 1;
            }
            cursor = close;
            continue;
        }

        cursor = open;
        if is_comment_or_string(&buffer.scope_name(open)) {
            debug!("skipping open {} in comment/string at {}", pair.name, open);
            continue;
        }

        if unmatched_depth > 0 {
            unmatched_depth -= 1;
            continue;
        }

        if open_match_count >= repeat_count {
            return Some(open);
        }
        open_match_count += 1;
    }
}

fn find_enclosing_close<B: BufferText + ?Sized>(
    buffer: &B,
    text: &str,
    index: &CharIndex,
    from: usize,
    repeat_count: usize,
    pair: DelimiterPair,
) -> Option<usize> {
    let open_len = pair.open.chars().count();
    let close_len = pair.close.chars().count();
    let mut cursor = from;
    let mut unmatched_depth = 0usize;
    let mut close_match_count = 0usize;

    loop {
        let close = find_literal(text, index, pair.close, cursor)?;
        let open = find_literal(text, index, pair.open, cursor);

        if let Some(open) = open.filter(|&open| open < close) {
            if !is_comment_or_string(&buffer.scope_name(open)) {
                unmatched_depth += 1;
            }
            cursor = open + open_len;
            continue;
        }

        cursor = close + close_len;
        if is_comment_or_string(&buffer.scope_name(close)) {
            debug!("skipping close {} in comment/string at {}", pair.name, close);
            continue;
        }

        if unmatched_depth > 0 {
            unmatched_depth -= 1;
            continue;
        }

        if close_match_count >= repeat_count {
            return Some(close);
        }
        close_match_count += 1;
    }
}
