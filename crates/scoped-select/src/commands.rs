//! Command Interface Layer
//!
//! The commands a host binds to keys, and [`QuickSelect`], which executes them against a
//! buffer.
//!
//! # Example
//!
//! ```rust
//! use scoped_select::memory::MemoryBuffer;
//! use scoped_select::{BufferHost, BufferId, QuickSelect, QuickSelectCommand, Region, ScopeKind};
//! use scoped_select_lang::LanguageConfig;
//!
//! let mut buffer = MemoryBuffer::new(
//!     BufferId::new(1),
//!     "fn f(a) { a + a } a",
//!     LanguageConfig::rust(),
//! );
//! buffer.set_selections(vec![Region::caret(10)]);
//!
//! let mut quick_select = QuickSelect::default();
//! buffer
//!     .run(
//!         &mut quick_select,
//!         QuickSelectCommand::ScopedQuickSelect {
//!             scope: ScopeKind::Block,
//!         },
//!     )
//!     .unwrap();
//!
//! assert_eq!(buffer.selections(), vec![Region::new(10, 11), Region::new(14, 15)]);
//! ```

use crate::config::QuickSelectConfig;
use crate::error::QuickSelectError;
use crate::history::{CommandRecord, repeat_count};
use crate::host::{BufferHost, BufferId, PreviewHost};
use crate::incremental::{AdvanceOutcome, IncrementalSelectionEngine, MSG_NO_MATCH};
use crate::marked_scope::{clear_marked_scope, read_marked_scope, write_marked_scope};
use crate::pattern::build_pattern;
use crate::region::Region;
use crate::registry::BufferRegistry;
use crate::scope::{ScopeKind, ScopeResolver};
use log::debug;
use serde_json::{Value, json};

/// Host name of [`QuickSelectCommand::ScopedQuickSelect`].
pub const SCOPED_QUICK_SELECT: &str = "scoped_quick_select";
/// Host name of [`QuickSelectCommand::SetScope`].
pub const SET_QUICK_SELECT_SCOPE: &str = "set_quick_select_scope";
/// Host name of [`QuickSelectCommand::ClearScope`].
pub const CLEAR_QUICK_SELECT_SCOPE: &str = "clear_quick_select_scope";
/// Host name of [`QuickSelectCommand::IncrementalQuickSelect`].
pub const INCREMENTAL_QUICK_SELECT: &str = "incremental_quick_select";
/// Host name of [`QuickSelectCommand::DismissScopePreview`].
pub const DISMISS_SCOPE_PREVIEW: &str = "dismiss_scope_preview";

/// Commands exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickSelectCommand {
    /// Select every occurrence of the current word/selection inside `scope`.
    ScopedQuickSelect {
        /// Bounding scope.
        scope: ScopeKind,
    },
    /// Resolve `scope` and persist it as the marked scope.
    SetScope {
        /// Scope to persist.
        scope: ScopeKind,
    },
    /// Erase the marked scope and the incremental walk.
    ClearScope,
    /// Advance the incremental walk by one match.
    IncrementalQuickSelect {
        /// Add the match to the selection instead of moving the selection to it.
        add: bool,
    },
    /// Close the scope preview of the buffer.
    DismissScopePreview,
}

impl QuickSelectCommand {
    /// The host command name.
    pub fn name(&self) -> &'static str {
        match self {
            QuickSelectCommand::ScopedQuickSelect { .. } => SCOPED_QUICK_SELECT,
            QuickSelectCommand::SetScope { .. } => SET_QUICK_SELECT_SCOPE,
            QuickSelectCommand::ClearScope => CLEAR_QUICK_SELECT_SCOPE,
            QuickSelectCommand::IncrementalQuickSelect { .. } => INCREMENTAL_QUICK_SELECT,
            QuickSelectCommand::DismissScopePreview => DISMISS_SCOPE_PREVIEW,
        }
    }

    /// The host command arguments.
    pub fn args(&self) -> Value {
        match self {
            QuickSelectCommand::ScopedQuickSelect { scope } | QuickSelectCommand::SetScope { scope } => {
                json!({ "scope": scope.name() })
            }
            QuickSelectCommand::IncrementalQuickSelect { add } => json!({ "add": add }),
            QuickSelectCommand::ClearScope | QuickSelectCommand::DismissScopePreview => {
                json!({})
            }
        }
    }

    /// The history record a host stores after executing this command.
    pub fn record(&self) -> CommandRecord {
        CommandRecord::new(self.name(), self.args())
    }

    /// Decode a command from its host name and arguments.
    pub fn from_name_and_args(name: &str, args: &Value) -> Result<Self, QuickSelectError> {
        match name {
            SCOPED_QUICK_SELECT => Ok(QuickSelectCommand::ScopedQuickSelect {
                scope: scope_arg(name, args)?,
            }),
            SET_QUICK_SELECT_SCOPE => Ok(QuickSelectCommand::SetScope {
                scope: scope_arg(name, args)?,
            }),
            CLEAR_QUICK_SELECT_SCOPE => Ok(QuickSelectCommand::ClearScope),
            INCREMENTAL_QUICK_SELECT => {
                let add = match args.get("add") {
                    None => false,
                    Some(value) => value.as_bool().ok_or_else(|| QuickSelectError::InvalidArguments {
                        command: name.to_string(),
                        message: "'add' must be a boolean".to_string(),
                    })?,
                };
                Ok(QuickSelectCommand::IncrementalQuickSelect { add })
            }
            DISMISS_SCOPE_PREVIEW => Ok(QuickSelectCommand::DismissScopePreview),
            other => Err(QuickSelectError::UnknownCommand(other.to_string())),
        }
    }
}

fn scope_arg(command: &str, args: &Value) -> Result<ScopeKind, QuickSelectError> {
    let scope = args
        .get("scope")
        .and_then(Value::as_str)
        .ok_or_else(|| QuickSelectError::InvalidArguments {
            command: command.to_string(),
            message: "missing string argument 'scope'".to_string(),
        })?;
    Ok(scope.parse()?)
}

/// Command execution result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// Matches were added to the selection.
    Selected {
        /// Number of matches inside the scope.
        count: usize,
    },
    /// The marked scope was set.
    ScopeSet(Region),
    /// The marked scope and walk were cleared.
    ScopeCleared,
    /// The incremental walk advanced.
    Advanced(AdvanceOutcome),
    /// The preview was dismissed.
    PreviewDismissed,
    /// Nothing changed (no scope, nothing to match, no preview open).
    Unchanged,
}

/// The quick-select extension: configuration plus all per-buffer state.
pub struct QuickSelect {
    config: QuickSelectConfig,
    engine: IncrementalSelectionEngine,
    previews: BufferRegistry<Region>,
    preview_host: Option<Box<dyn PreviewHost>>,
}

impl Default for QuickSelect {
    fn default() -> Self {
        Self::new(QuickSelectConfig::default())
    }
}

impl std::fmt::Debug for QuickSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickSelect")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .field("previews", &self.previews)
            .field("preview_host", &self.preview_host.is_some())
            .finish()
    }
}

impl QuickSelect {
    /// Create the extension with `config` and no preview host.
    pub fn new(config: QuickSelectConfig) -> Self {
        Self {
            config,
            engine: IncrementalSelectionEngine::new(),
            previews: BufferRegistry::new(),
            preview_host: None,
        }
    }

    /// Attach a host capability for showing scope previews.
    pub fn with_preview_host(mut self, host: Box<dyn PreviewHost>) -> Self {
        self.preview_host = Some(host);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &QuickSelectConfig {
        &self.config
    }

    /// The incremental engine (walk state per buffer).
    pub fn engine(&self) -> &IncrementalSelectionEngine {
        &self.engine
    }

    /// Returns `true` if a scope preview is showing for `buffer`.
    pub fn is_preview_showing(&self, buffer: BufferId) -> bool {
        self.previews.contains(buffer)
    }

    /// Teardown hook: forget everything about a buffer the host has closed.
    pub fn buffer_closed(&mut self, buffer: BufferId) {
        self.engine.discard(buffer);
        if self.previews.remove(buffer).is_some() {
            if let Some(host) = self.preview_host.as_mut() {
                host.dismiss_preview(buffer);
            }
        }
    }

    /// Execute `command` against `buffer`.
    pub fn execute<B: BufferHost + ?Sized>(
        &mut self,
        buffer: &mut B,
        command: QuickSelectCommand,
    ) -> Result<CommandResult, QuickSelectError> {
        debug!("{} {}({})", buffer.id().get(), command.name(), command.args());
        match command {
            QuickSelectCommand::ScopedQuickSelect { scope } => {
                self.scoped_quick_select(buffer, scope, &command)
            }
            QuickSelectCommand::SetScope { scope } => Ok(self.set_scope(buffer, scope, &command)),
            QuickSelectCommand::ClearScope => Ok(self.clear_scope(buffer)),
            QuickSelectCommand::IncrementalQuickSelect { add } => {
                let scope = read_marked_scope(buffer, &self.config.marker_key);
                let outcome = self.engine.advance(buffer, add, scope, &self.config)?;
                Ok(CommandResult::Advanced(outcome))
            }
            QuickSelectCommand::DismissScopePreview => Ok(self.dismiss_preview(buffer.id())),
        }
    }

    fn scoped_quick_select<B: BufferHost + ?Sized>(
        &mut self,
        buffer: &mut B,
        scope: ScopeKind,
        command: &QuickSelectCommand,
    ) -> Result<CommandResult, QuickSelectError> {
        let Some(first) = buffer.selections().first().copied() else {
            return Ok(CommandResult::Unchanged);
        };
        let Some(pattern) = build_pattern(&*buffer, first) else {
            if self.config.status_messages {
                buffer.status_message(MSG_NO_MATCH);
            }
            return Ok(CommandResult::Unchanged);
        };

        let repeat = repeat_count(&*buffer, command.name(), &command.args());
        let region = ScopeResolver::new(&self.config).resolve_or_report(buffer, first, scope, repeat);
        if region.is_empty() {
            return Ok(CommandResult::Unchanged);
        }

        let matches: Vec<Region> = buffer
            .find_all(&pattern)?
            .into_iter()
            .filter(|m| region.contains(*m))
            .collect();
        debug!("{} match(es) of {:?} in {}", matches.len(), pattern, region);

        let Some(last) = matches.last().copied() else {
            return Ok(CommandResult::Unchanged);
        };
        for m in &matches {
            buffer.add_selection(*m);
        }
        if self.config.scroll_to_match {
            buffer.show(last);
        }
        Ok(CommandResult::Selected {
            count: matches.len(),
        })
    }

    fn set_scope<B: BufferHost + ?Sized>(
        &mut self,
        buffer: &mut B,
        scope: ScopeKind,
        command: &QuickSelectCommand,
    ) -> CommandResult {
        let Some(first) = buffer.selections().first().copied() else {
            return CommandResult::Unchanged;
        };
        let repeat = repeat_count(&*buffer, command.name(), &command.args());
        let region = ScopeResolver::new(&self.config).resolve_or_report(buffer, first, scope, repeat);

        if region.is_empty() {
            // An expansion that runs out of enclosing levels keeps the scope it expanded from.
            if repeat == 0 {
                clear_marked_scope(buffer, &self.config.marker_key);
                self.dismiss_preview(buffer.id());
            }
            return CommandResult::Unchanged;
        }

        write_marked_scope(buffer, &self.config.marker_key, region);
        debug!("marked scope {} (repeat {})", region, repeat);
        if self.config.show_preview {
            if let Some(host) = self.preview_host.as_mut() {
                host.show_preview(buffer.id(), region);
                self.previews.insert(buffer.id(), region);
            }
        }
        CommandResult::ScopeSet(region)
    }

    fn clear_scope<B: BufferHost + ?Sized>(&mut self, buffer: &mut B) -> CommandResult {
        clear_marked_scope(buffer, &self.config.marker_key);
        self.engine.discard(buffer.id());
        self.dismiss_preview(buffer.id());
        CommandResult::ScopeCleared
    }

    fn dismiss_preview(&mut self, buffer: BufferId) -> CommandResult {
        if self.previews.remove(buffer).is_none() {
            return CommandResult::Unchanged;
        }
        if let Some(host) = self.preview_host.as_mut() {
            host.dismiss_preview(buffer);
        }
        CommandResult::PreviewDismissed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_args_decode() {
        let commands = [
            QuickSelectCommand::ScopedQuickSelect {
                scope: ScopeKind::AngleBrackets,
            },
            QuickSelectCommand::SetScope {
                scope: ScopeKind::Function,
            },
            QuickSelectCommand::ClearScope,
            QuickSelectCommand::IncrementalQuickSelect { add: true },
            QuickSelectCommand::DismissScopePreview,
        ];
        for command in commands {
            let decoded =
                QuickSelectCommand::from_name_and_args(command.name(), &command.args()).unwrap();
            assert_eq!(decoded, command);
        }
    }

    #[test]
    fn test_decode_errors() {
        let err = QuickSelectCommand::from_name_and_args("scoped_quick_select", &json!({}))
            .unwrap_err();
        assert!(matches!(err, QuickSelectError::InvalidArguments { .. }));

        let err = QuickSelectCommand::from_name_and_args(
            "set_quick_select_scope",
            &json!({ "scope": "paragraph" }),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "unimplemented scope kind 'paragraph'");

        let err = QuickSelectCommand::from_name_and_args("incremental_quick_select", &json!({ "add": 1 }))
            .unwrap_err();
        assert!(matches!(err, QuickSelectError::InvalidArguments { .. }));

        let err = QuickSelectCommand::from_name_and_args("select_all", &json!({})).unwrap_err();
        assert!(matches!(err, QuickSelectError::UnknownCommand(_)));
    }

    #[test]
    fn test_incremental_defaults_to_move_mode() {
        assert_eq!(
            QuickSelectCommand::from_name_and_args("incremental_quick_select", &json!({})).unwrap(),
            QuickSelectCommand::IncrementalQuickSelect { add: false }
        );
    }
}
