//! Host editor interfaces.
//!
//! `scoped-select` does not own text storage, tokenization, selections or undo history. The
//! host editor exposes them through these traits; the [`memory`](crate::memory) module ships a
//! reference implementation.

use crate::history::CommandRecord;
use crate::pattern::PatternDialect;
use crate::region::Region;
use crate::search::SearchError;
use std::borrow::Cow;

/// Opaque identifier for an open buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(u64);

impl BufferId {
    /// Wrap a host-provided numeric id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Read-only access to a buffer's text and its language metadata.
pub trait BufferText {
    /// Buffer length in characters.
    fn len_chars(&self) -> usize;

    /// The whole buffer text.
    fn text(&self) -> Cow<'_, str>;

    /// Text covered by `region` (clamped to the buffer).
    fn slice(&self, region: Region) -> String;

    /// Space-delimited scope label at `pos`.
    fn scope_name(&self, pos: usize) -> String;

    /// Number of `{ }` blocks enclosing `pos`. A brace counts as part of its own block.
    fn block_depth(&self, pos: usize) -> usize;

    /// The word touching `pos`, or an empty region at `pos` if there is none.
    fn word(&self, pos: usize) -> Region;

    /// Every region whose scope matches `selector`.
    fn find_by_selector(&self, selector: &str) -> Vec<Region>;

    /// The regex dialect spoken by [`BufferText::find`].
    fn pattern_dialect(&self) -> PatternDialect;

    /// First non-empty match of `pattern` starting at or after `from`.
    fn find(&self, pattern: &str, from: usize) -> Result<Option<Region>, SearchError>;

    /// All non-empty matches of `pattern`, in buffer order.
    fn find_all(&self, pattern: &str) -> Result<Vec<Region>, SearchError>;
}

/// A buffer plus its view state: selections, markers, history and status line.
pub trait BufferHost: BufferText {
    /// Identity of this buffer.
    fn id(&self) -> BufferId;

    /// Current selections, sorted by position.
    fn selections(&self) -> Vec<Region>;

    /// Union `region` into the selection set.
    fn add_selection(&mut self, region: Region);

    /// Remove `region` from the selection set.
    fn subtract_selection(&mut self, region: Region);

    /// Returns `true` if some selection contains `region`.
    fn selection_contains(&self, region: Region) -> bool;

    /// Scroll `region` into view.
    fn show(&mut self, region: Region);

    /// Zero-width marker regions stored under `key`.
    fn markers(&self, key: &str) -> Vec<Region>;

    /// Replace the marker regions stored under `key`.
    fn add_markers(&mut self, key: &str, regions: Vec<Region>);

    /// Remove the marker regions stored under `key`.
    fn erase_markers(&mut self, key: &str);

    /// Command history entry relative to the current undo position.
    ///
    /// `0` is the most recently applied command, negative indices are older commands and
    /// positive indices are undone commands that can be redone.
    fn command_history(&self, index: isize) -> Option<CommandRecord>;

    /// Show a transient message to the user.
    fn status_message(&mut self, message: &str);
}

/// Host capability for previewing a scope region (e.g. in a side pane).
pub trait PreviewHost {
    /// Show `region` of `buffer`.
    fn show_preview(&mut self, buffer: BufferId, region: Region);

    /// Close any preview of `buffer`.
    fn dismiss_preview(&mut self, buffer: BufferId);
}
