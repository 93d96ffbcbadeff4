#![warn(missing_docs)]
//! Scoped Select - Scope-Aware Quick Select for Editors
//!
//! # Overview
//!
//! `scoped-select` implements "select all occurrences" and "select next occurrence" commands
//! whose matches are bounded by a lexical scope: the whole buffer, the enclosing block, a
//! matched delimiter pair, the enclosing function, the selection, or an explicitly marked
//! region. It is headless: the host editor owns text, tokenization, selections and undo, and
//! exposes them through the [`BufferHost`] trait.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface (QuickSelect)            │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Incremental Selection Engine               │  ← Per-buffer walks
//! ├─────────────────────────────────────────────┤
//! │  Scope Resolver (kind dispatch)             │  ← Bounding regions
//! ├─────────────────────────────────────────────┤
//! │  Delimiter / Block Scanners                 │  ← Nesting-aware scans
//! ├─────────────────────────────────────────────┤
//! │  Scope Labels + Match Patterns              │  ← Host metadata
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use scoped_select::memory::MemoryBuffer;
//! use scoped_select::{
//!     AdvanceOutcome, BufferHost, BufferId, CommandResult, QuickSelect, QuickSelectCommand, Region,
//! };
//! use scoped_select_lang::LanguageConfig;
//!
//! let mut buffer = MemoryBuffer::new(BufferId::new(1), "cat dog cat", LanguageConfig::plain_text());
//! buffer.set_selections(vec![Region::caret(1)]);
//!
//! let mut quick_select = QuickSelect::default();
//! let next = QuickSelectCommand::IncrementalQuickSelect { add: true };
//!
//! buffer.run(&mut quick_select, next).unwrap();
//! let result = buffer.run(&mut quick_select, next).unwrap();
//!
//! assert_eq!(result, CommandResult::Advanced(AdvanceOutcome::Selected(Region::new(8, 11))));
//! assert_eq!(buffer.selections(), vec![Region::new(0, 3), Region::new(8, 11)]);
//! ```
//!
//! # Module Description
//!
//! - [`region`] - character-offset regions
//! - [`scope_label`] - comment/string classification of host scope labels
//! - [`delimiter`] - delimiter-pair scope resolution
//! - [`block`] - `{ }` block scope resolution via nesting depth
//! - [`scope`] - scope kinds and the scope resolver
//! - [`pattern`] - literal match patterns per regex dialect
//! - [`incremental`] - the incremental selection state machine
//! - [`commands`] - the host command surface
//! - [`memory`] - an in-memory reference host

pub mod block;
pub mod commands;
pub mod config;
pub mod delimiter;
mod error;
pub mod history;
mod host;
pub mod incremental;
pub mod marked_scope;
pub mod memory;
pub mod pattern;
pub mod region;
pub mod registry;
pub mod scope;
pub mod scope_label;
pub mod search;

pub use commands::{CommandResult, QuickSelect, QuickSelectCommand};
pub use config::QuickSelectConfig;
pub use delimiter::DelimiterPair;
pub use error::{QuickSelectError, ScopeError};
pub use history::CommandRecord;
pub use host::{BufferHost, BufferId, BufferText, PreviewHost};
pub use incremental::{
    AdvanceOutcome, IncrementalSelectionEngine, SelectionChange, VisitedMatch, WalkPhase,
    WalkState,
};
pub use pattern::PatternDialect;
pub use region::Region;
pub use registry::BufferRegistry;
pub use scope::{ScopeKind, ScopeResolver};
pub use search::SearchError;
