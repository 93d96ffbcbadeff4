//! In-memory reference host.
//!
//! [`MemoryBuffer`] implements [`BufferHost`] without an editor: text lives in a rope, scope
//! labels come from a [`LanguageConfig`], and every command run through
//! [`MemoryBuffer::run`] is recorded in a history that supports soft undo/redo of selection
//! changes. It backs the test suite and is handy for headless tools.

mod history;
mod labeler;
mod selection;

use crate::commands::{CommandResult, QuickSelect, QuickSelectCommand};
use crate::error::QuickSelectError;
use crate::history::CommandRecord;
use crate::host::{BufferHost, BufferId, BufferText};
use crate::pattern::PatternDialect;
use crate::region::Region;
use crate::search::{SearchError, SearchOptions, find_all, find_next};
use history::SelectionHistory;
use labeler::ScopeLabels;
use log::debug;
use ropey::Rope;
use scoped_select_lang::LanguageConfig;
use selection::{normalize_selections, subtract_region};
use serde_json::json;
use std::borrow::Cow;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// History name of a selection set directly by the user.
pub const DRAG_SELECT: &str = "drag_select";

/// A buffer with selections, markers, command history and a status line, held in memory.
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    id: BufferId,
    rope: Rope,
    text: String,
    language: LanguageConfig,
    labels: ScopeLabels,
    selections: Vec<Region>,
    markers: HashMap<String, Vec<Region>>,
    history: SelectionHistory,
    status: Vec<String>,
    shown: Option<Region>,
}

impl MemoryBuffer {
    /// Create a buffer with a caret at offset 0.
    pub fn new(id: BufferId, text: &str, language: LanguageConfig) -> Self {
        Self {
            id,
            rope: Rope::from_str(text),
            text: text.to_string(),
            labels: ScopeLabels::build(text, &language),
            language,
            selections: vec![Region::caret(0)],
            markers: HashMap::new(),
            history: SelectionHistory::default(),
            status: Vec::new(),
            shown: None,
        }
    }

    /// The language used to label this buffer.
    pub fn language(&self) -> &LanguageConfig {
        &self.language
    }

    /// Replace the selection set as a user action (recorded as `drag_select`).
    pub fn set_selections(&mut self, regions: Vec<Region>) {
        let before = self.selections.clone();
        self.selections = normalize_selections(self.clamp_all(regions));
        self.history.push(
            CommandRecord::new(DRAG_SELECT, json!({})),
            before,
            self.selections.clone(),
        );
    }

    /// Execute `command` and record it in the history.
    pub fn run(
        &mut self,
        quick_select: &mut QuickSelect,
        command: QuickSelectCommand,
    ) -> Result<CommandResult, QuickSelectError> {
        let before = self.selections.clone();
        let result = quick_select.execute(self, command)?;
        self.history
            .push(command.record(), before, self.selections.clone());
        Ok(result)
    }

    /// Record a command without changing the selection.
    pub fn record_command(&mut self, record: CommandRecord) {
        let current = self.selections.clone();
        self.history.push(record, current.clone(), current);
    }

    /// Soft undo: restore the selection from before the last applied command.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(selections) => {
                self.selections = selections;
                true
            }
            None => false,
        }
    }

    /// Soft redo: re-apply the selection of the next undone command.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(selections) => {
                self.selections = selections;
                true
            }
            None => false,
        }
    }

    /// Number of recorded commands (applied and undone).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Status messages shown so far, oldest first.
    pub fn status_messages(&self) -> &[String] {
        &self.status
    }

    /// The most recent status message.
    pub fn last_status(&self) -> Option<&str> {
        self.status.last().map(String::as_str)
    }

    /// The region most recently scrolled into view.
    pub fn shown(&self) -> Option<Region> {
        self.shown
    }

    fn clamp(&self, region: Region) -> Region {
        let len = self.rope.len_chars();
        Region::new(region.begin().min(len), region.end().min(len))
    }

    fn clamp_all(&self, regions: Vec<Region>) -> Vec<Region> {
        regions.into_iter().map(|region| self.clamp(region)).collect()
    }
}

impl BufferText for MemoryBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn slice(&self, region: Region) -> String {
        let region = self.clamp(region);
        self.rope.slice(region.begin()..region.end()).to_string()
    }

    fn scope_name(&self, pos: usize) -> String {
        self.labels.scope_name(pos)
    }

    fn block_depth(&self, pos: usize) -> usize {
        self.labels.block_depth(pos)
    }

    fn word(&self, pos: usize) -> Region {
        let pos = pos.min(self.rope.len_chars());
        let line = self.rope.char_to_line(pos);
        let line_start = self.rope.line_to_char(line);
        let line_text = self.rope.line(line).to_string();
        let column = pos - line_start;

        let mut touching: Option<Region> = None;
        let mut seg_start = 0;
        for segment in line_text.split_word_bounds() {
            let seg_end = seg_start + segment.chars().count();
            let is_word = segment.chars().any(|ch| ch == '_' || ch.is_alphanumeric());
            if is_word {
                if seg_start <= column && column < seg_end {
                    return Region::new(line_start + seg_start, line_start + seg_end);
                }
                if seg_end == column {
                    touching = Some(Region::new(line_start + seg_start, line_start + seg_end));
                }
            }
            if seg_start > column {
                break;
            }
            seg_start = seg_end;
        }
        touching.unwrap_or(Region::caret(pos))
    }

    fn find_by_selector(&self, selector: &str) -> Vec<Region> {
        self.labels.find_by_selector(selector)
    }

    fn pattern_dialect(&self) -> PatternDialect {
        PatternDialect::Rust
    }

    fn find(&self, pattern: &str, from: usize) -> Result<Option<Region>, SearchError> {
        find_next(&self.text, pattern, SearchOptions::default(), from)
    }

    fn find_all(&self, pattern: &str) -> Result<Vec<Region>, SearchError> {
        find_all(&self.text, pattern, SearchOptions::default())
    }
}

impl BufferHost for MemoryBuffer {
    fn id(&self) -> BufferId {
        self.id
    }

    fn selections(&self) -> Vec<Region> {
        self.selections.clone()
    }

    fn add_selection(&mut self, region: Region) {
        let mut selections = std::mem::take(&mut self.selections);
        selections.push(self.clamp(region));
        self.selections = normalize_selections(selections);
    }

    fn subtract_selection(&mut self, region: Region) {
        self.selections = subtract_region(&self.selections, region);
    }

    fn selection_contains(&self, region: Region) -> bool {
        self.selections.iter().any(|sel| sel.contains(region))
    }

    fn show(&mut self, region: Region) {
        let line = self.rope.char_to_line(self.clamp(region).begin());
        debug!("buffer {} shows {} (line {})", self.id.get(), region, line);
        self.shown = Some(region);
    }

    fn markers(&self, key: &str) -> Vec<Region> {
        self.markers.get(key).cloned().unwrap_or_default()
    }

    fn add_markers(&mut self, key: &str, regions: Vec<Region>) {
        let regions = self.clamp_all(regions);
        self.markers.insert(key.to_string(), regions);
    }

    fn erase_markers(&mut self, key: &str) {
        self.markers.remove(key);
    }

    fn command_history(&self, index: isize) -> Option<CommandRecord> {
        self.history.get(index).cloned()
    }

    fn status_message(&mut self, message: &str) {
        debug!("buffer {} status: {}", self.id.get(), message);
        self.status.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> MemoryBuffer {
        MemoryBuffer::new(BufferId::new(7), text, LanguageConfig::plain_text())
    }

    #[test]
    fn test_word_lookup() {
        let buf = buffer("foo_bar, baz\nqux");
        assert_eq!(buf.word(0), Region::new(0, 7));
        assert_eq!(buf.word(3), Region::new(0, 7));
        assert_eq!(buf.word(7), Region::new(0, 7));
        assert_eq!(buf.word(8), Region::caret(8));
        assert_eq!(buf.word(10), Region::new(9, 12));
        assert_eq!(buf.word(13), Region::new(13, 16));
        assert_eq!(buf.word(16), Region::new(13, 16));
    }

    #[test]
    fn test_slice_uses_char_offsets() {
        let buf = buffer("héllo wörld");
        assert_eq!(buf.slice(Region::new(6, 11)), "wörld");
        assert_eq!(buf.slice(Region::new(6, 99)), "wörld");
        assert_eq!(buf.len_chars(), 11);
    }

    #[test]
    fn test_set_selections_is_undoable() {
        let mut buf = buffer("abc def");
        buf.set_selections(vec![Region::new(4, 7)]);
        assert_eq!(buf.selections(), vec![Region::new(4, 7)]);
        assert_eq!(
            buf.command_history(0).map(|r| r.name),
            Some(DRAG_SELECT.to_string())
        );

        assert!(buf.undo());
        assert_eq!(buf.selections(), vec![Region::caret(0)]);
        assert!(buf.redo());
        assert_eq!(buf.selections(), vec![Region::new(4, 7)]);
    }

    #[test]
    fn test_markers_round_trip() {
        let mut buf = buffer("abc");
        buf.add_markers("k", vec![Region::caret(1), Region::caret(9)]);
        assert_eq!(buf.markers("k"), vec![Region::caret(1), Region::caret(3)]);
        buf.erase_markers("k");
        assert!(buf.markers("k").is_empty());
    }
}
