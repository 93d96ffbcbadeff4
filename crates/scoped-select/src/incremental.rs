//! Incremental quick select.
//!
//! Each advance selects the next occurrence of a fixed pattern inside the scope region, wrapping
//! from the end of the scope back to its start, until the walk comes back around to where it
//! started. Walk state is kept per buffer and re-validated against the live selection before
//! every step:
//!
//! - if the selection no longer matches what the walk left behind and the command history shows
//!   that the user undid some of our own steps, the walk rewinds by that many steps;
//! - any other change resets the walk, which then starts over from the current selection.

use crate::commands::INCREMENTAL_QUICK_SELECT;
use crate::config::QuickSelectConfig;
use crate::history::redo_run_length;
use crate::host::{BufferHost, BufferId};
use crate::pattern::build_pattern;
use crate::region::Region;
use crate::registry::BufferRegistry;
use crate::search::SearchError;
use log::debug;

/// Status message when no occurrence of the pattern exists in the scope.
pub const MSG_NO_MATCH: &str = "could not automatically match text at cursor";
/// Status message when a walk has covered the whole scope.
pub const MSG_COMPLETE: &str = "incremental select complete";

/// One step of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitedMatch {
    /// The matched region.
    pub region: Region,
    /// Whether the walk left this region selected.
    pub selected: bool,
}

/// Progress of a walk through its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkPhase {
    /// Searching between the anchor and the end of the scope.
    #[default]
    Walking,
    /// Passed the end of the scope and resumed from its start.
    Wrapped,
    /// Came back around to the anchor.
    Complete,
}

/// What one advance did to the walk, so an undo of it can be reverted exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WalkStep {
    added: usize,
    phase_before: WalkPhase,
}

/// Per-buffer walk state.
///
/// `pattern` and `anchor` are either both set (a walk is in progress) or both unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkState {
    anchor: Option<usize>,
    pattern: Option<String>,
    visited: Vec<VisitedMatch>,
    phase: WalkPhase,
    steps: Vec<WalkStep>,
}

impl WalkState {
    /// Where the walk started; reaching it again after wrapping completes the walk.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// The pattern being walked.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Matches visited so far, in visiting order.
    pub fn visited(&self) -> &[VisitedMatch] {
        &self.visited
    }

    /// Current phase.
    pub fn phase(&self) -> WalkPhase {
        self.phase
    }

    /// Returns `true` once the walk has looped past the end of the scope.
    pub fn is_wrapped(&self) -> bool {
        self.phase != WalkPhase::Walking
    }

    fn is_started(&self) -> bool {
        self.anchor.is_some() || !self.visited.is_empty()
    }

    fn reset(&mut self) {
        self.anchor = None;
        self.pattern = None;
        self.visited.clear();
        self.phase = WalkPhase::Walking;
        self.steps.clear();
    }

    /// Revert the last `undone` advances. Returns `false` if that reaches back past the first
    /// advance of the walk, which leaves nothing to resume.
    fn rewind<B: BufferHost + ?Sized>(&mut self, undone: usize, buffer: &B) -> bool {
        if undone >= self.steps.len() {
            return false;
        }
        let keep = self.steps.len() - undone;
        let removed: usize = self.steps[keep..].iter().map(|step| step.added).sum();
        self.phase = self.steps[keep].phase_before;
        self.steps.truncate(keep);

        let keep_visited = self.visited.len().saturating_sub(removed);
        self.visited.truncate(keep_visited);
        for visited in &mut self.visited {
            visited.selected = buffer.selection_contains(visited.region);
        }
        true
    }
}

/// How the live selection relates to what the walk left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Every visited match is selected exactly as the walk left it.
    Unchanged,
    /// The user undid this many of our own steps.
    SelfUndo(usize),
    /// Something else changed the selection.
    External,
}

/// Result of a single advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The next match was selected.
    Selected(Region),
    /// The walk came back around to its anchor.
    Complete,
    /// The walk had already completed and nothing changed since.
    AlreadyComplete,
    /// There is nothing to match; the walk state was discarded.
    NotFound,
}

/// Compare the walk's record against the live selection.
pub fn detect_selection_change<B: BufferHost + ?Sized>(
    buffer: &B,
    state: &WalkState,
) -> SelectionChange {
    let changed = state
        .visited
        .iter()
        .any(|visited| visited.selected != buffer.selection_contains(visited.region));
    if !changed {
        return SelectionChange::Unchanged;
    }

    match redo_run_length(buffer, INCREMENTAL_QUICK_SELECT) {
        0 => SelectionChange::External,
        steps => SelectionChange::SelfUndo(steps),
    }
}

/// The incremental selection state machine, with one walk per buffer.
#[derive(Debug, Default)]
pub struct IncrementalSelectionEngine {
    walks: BufferRegistry<WalkState>,
}

impl IncrementalSelectionEngine {
    /// Create an engine with no walks.
    pub fn new() -> Self {
        Self::default()
    }

    /// The walk state of `buffer`, if one exists.
    pub fn walk(&self, buffer: BufferId) -> Option<&WalkState> {
        self.walks.get(buffer)
    }

    /// Drop the walk state of `buffer`.
    pub fn discard(&mut self, buffer: BufferId) -> Option<WalkState> {
        self.walks.remove(buffer)
    }

    /// Number of buffers with walk state.
    pub fn len(&self) -> usize {
        self.walks.len()
    }

    /// Returns `true` if no buffer has walk state.
    pub fn is_empty(&self) -> bool {
        self.walks.is_empty()
    }

    /// Advance the walk of `buffer` by one match.
    ///
    /// With `add`, the new match joins the selection; otherwise the selection moves from the
    /// previous match to the new one. `scope` bounds the walk (the whole buffer if `None`).
    pub fn advance<B: BufferHost + ?Sized>(
        &mut self,
        buffer: &mut B,
        add: bool,
        scope: Option<Region>,
        config: &QuickSelectConfig,
    ) -> Result<AdvanceOutcome, SearchError> {
        let id = buffer.id();
        let scope = scope.unwrap_or_else(|| Region::new(0, buffer.len_chars()));
        let state = self.walks.get_or_insert_default(id);

        let outcome = step(state, buffer, add, scope, config)?;
        match outcome {
            AdvanceOutcome::NotFound => {
                if config.status_messages {
                    buffer.status_message(MSG_NO_MATCH);
                }
                self.walks.remove(id);
            }
            AdvanceOutcome::Complete => {
                if config.status_messages {
                    buffer.status_message(MSG_COMPLETE);
                }
            }
            AdvanceOutcome::Selected(_) | AdvanceOutcome::AlreadyComplete => {}
        }
        Ok(outcome)
    }
}

fn step<B: BufferHost + ?Sized>(
    state: &mut WalkState,
    buffer: &mut B,
    add: bool,
    scope: Region,
    config: &QuickSelectConfig,
) -> Result<AdvanceOutcome, SearchError> {
    if state.is_started() {
        match detect_selection_change(buffer, state) {
            SelectionChange::Unchanged => {}
            SelectionChange::SelfUndo(steps) => {
                if state.rewind(steps, buffer) {
                    debug!("rewound incremental walk by {} step(s)", steps);
                } else {
                    debug!("undo reaches past the start of the walk, restarting");
                    state.reset();
                }
            }
            SelectionChange::External => {
                debug!("selection changed externally, restarting incremental walk");
                state.reset();
            }
        }
    }

    let phase_before = state.phase;
    let visited_before = state.visited.len();
    let outcome = walk_once(state, buffer, add, scope, config)?;
    state.steps.push(WalkStep {
        added: state.visited.len().saturating_sub(visited_before),
        phase_before,
    });
    Ok(outcome)
}

fn find_in_scope<B: BufferHost + ?Sized>(
    buffer: &B,
    pattern: &str,
    from: usize,
    scope: Region,
) -> Result<Option<Region>, SearchError> {
    Ok(buffer
        .find(pattern, from.max(scope.begin()))?
        .filter(|m| scope.contains(*m)))
}

fn walk_once<B: BufferHost + ?Sized>(
    state: &mut WalkState,
    buffer: &mut B,
    add: bool,
    scope: Region,
    config: &QuickSelectConfig,
) -> Result<AdvanceOutcome, SearchError> {
    if state.phase == WalkPhase::Complete {
        return Ok(AdvanceOutcome::AlreadyComplete);
    }

    let (pattern, anchor, search_from) = match (state.anchor, state.pattern.clone()) {
        (Some(anchor), Some(pattern)) => {
            let from = state
                .visited
                .last()
                .map(|visited| visited.region.end())
                .unwrap_or(anchor);
            (pattern, anchor, from)
        }
        _ => {
            let Some(seed) = buffer.selections().last().copied() else {
                return Ok(AdvanceOutcome::NotFound);
            };
            let Some(pattern) = build_pattern(&*buffer, seed) else {
                return Ok(AdvanceOutcome::NotFound);
            };

            state.visited.clear();
            let start = if seed.is_empty() {
                buffer.word(seed.begin())
            } else {
                seed
            };
            if scope.contains(start) {
                if seed.is_empty() {
                    (pattern, start.begin(), start.begin())
                } else {
                    state.visited.push(VisitedMatch {
                        region: seed,
                        selected: true,
                    });
                    (pattern, seed.begin(), seed.end())
                }
            } else {
                // Seeded outside the scope: the walk starts at the first match inside it.
                let Some(first) = find_in_scope(&*buffer, &pattern, scope.begin(), scope)? else {
                    return Ok(AdvanceOutcome::NotFound);
                };
                debug!("seed {} outside scope {}, anchoring at {}", start, scope, first);
                (pattern, first.begin(), first.begin())
            }
        }
    };
    state.anchor = Some(anchor);
    state.pattern = Some(pattern.clone());

    let mut found = find_in_scope(&*buffer, &pattern, search_from, scope)?;
    if found.is_none() {
        debug!("wrapping incremental walk to scope start {}", scope.begin());
        state.phase = WalkPhase::Wrapped;
        found = find_in_scope(&*buffer, &pattern, scope.begin(), scope)?;
    }
    let Some(next) = found else {
        return Ok(AdvanceOutcome::NotFound);
    };

    // The last visited match stays selected, in move mode too.
    if state.is_wrapped() && next.begin() >= anchor {
        state.phase = WalkPhase::Complete;
        return Ok(AdvanceOutcome::Complete);
    }

    if !add {
        if let Some(previous) = state.visited.last_mut() {
            if previous.selected {
                buffer.subtract_selection(previous.region);
                previous.selected = false;
            }
        }
    }
    buffer.add_selection(next);
    state.visited.push(VisitedMatch {
        region: next,
        selected: true,
    });
    if config.scroll_to_match {
        buffer.show(next);
    }
    debug!("incremental walk selected {}", next);
    Ok(AdvanceOutcome::Selected(next))
}
