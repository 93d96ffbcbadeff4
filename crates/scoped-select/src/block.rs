//! `{ }` block scope resolution driven by the host's nesting-depth oracle.
//!
//! Not every grammar exposes matched-pair scopes, but most expose a per-position block nesting
//! depth. A brace belongs to the block it opens or closes, so the enclosing block of a position
//! at depth `d` is delimited by the nearest braces at depth `d` on either side.

use crate::host::BufferText;
use crate::region::Region;
use crate::scope_label::is_comment_or_string;
use crate::search::{CharIndex, find_literal, rfind_literal};
use log::debug;

const BLOCK_OPEN: &str = "{";
const BLOCK_CLOSE: &str = "}";

/// Resolve the block enclosing `selection`, expanded outward by `repeat_count` levels.
///
/// The result runs from the opening brace to the closing brace position. Missing braces fall
/// back to the buffer start/end, so climbing past the outermost block yields the whole buffer.
pub fn resolve_block_scope<B: BufferText + ?Sized>(
    buffer: &B,
    selection: Region,
    repeat_count: usize,
) -> Region {
    let text = buffer.text();
    let index = CharIndex::new(&text);
    let begin = selection.begin();

    let mut cursor_depth = buffer.block_depth(begin);
    // A caret right before `{` sits in the block that encloses the one it opens.
    if index.char_at(&text, begin) == Some('{') && !is_comment_or_string(&buffer.scope_name(begin))
    {
        cursor_depth = cursor_depth.saturating_sub(1);
    }
    let target_depth = cursor_depth.saturating_sub(repeat_count);

    let block_start = scan_back_for_open(buffer, &text, &index, begin, target_depth).unwrap_or(0);
    let block_end = scan_forward_for_close(buffer, &text, &index, selection.end(), target_depth)
        .unwrap_or(index.char_count());

    debug!(
        "block scope at depth {}: {}..{}",
        target_depth, block_start, block_end
    );
    Region::new(block_start, block_end)
}

fn scan_back_for_open<B: BufferText + ?Sized>(
    buffer: &B,
    text: &str,
    index: &CharIndex,
    from: usize,
    target_depth: usize,
) -> Option<usize> {
    let mut cursor = from;
    loop {
        let Some(pos) = rfind_literal(text, index, BLOCK_OPEN, cursor) else {
            debug!("reached start of buffer");
            return None;
        };
        cursor = pos;

        if is_comment_or_string(&buffer.scope_name(pos)) {
            continue;
        }
        if buffer.block_depth(pos) == target_depth {
            return Some(pos);
        }
    }
}

fn scan_forward_for_close<B: BufferText + ?Sized>(
    buffer: &B,
    text: &str,
    index: &CharIndex,
    from: usize,
    target_depth: usize,
) -> Option<usize> {
    let mut cursor = from;
    loop {
        let Some(pos) = find_literal(text, index, BLOCK_CLOSE, cursor) else {
            debug!("reached end of buffer");
            return None;
        };
        cursor = pos + 1;

        if is_comment_or_string(&buffer.scope_name(pos)) {
            continue;
        }
        if buffer.block_depth(pos) == target_depth {
            return Some(pos);
        }
    }
}
