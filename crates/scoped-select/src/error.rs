use crate::region::Region;
use crate::scope::ScopeKind;
use crate::search::SearchError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Reasons a scope region could not be resolved.
pub enum ScopeError {
    #[error("no matching open {0}")]
    /// Backward scan reached the buffer start without a qualifying open delimiter.
    NoMatchingOpen(&'static str),

    #[error("no matching close {0}")]
    /// Forward scan reached the buffer end without a qualifying close delimiter.
    NoMatchingClose(&'static str),

    #[error("no enclosing function")]
    /// No function-like region contains the selection.
    NoEnclosingFunction,

    #[error("scope kind not implemented: {0}")]
    /// The scope kind exists but has no resolver.
    Unimplemented(ScopeKind),

    #[error("unimplemented scope kind '{0}'")]
    /// The host asked for a scope kind this crate does not know.
    UnknownKind(String),
}

impl ScopeError {
    /// The empty sentinel region callers treat as "no scope".
    pub fn sentinel(&self, buffer_len: usize) -> Region {
        match self {
            Self::NoMatchingClose(_) => Region::caret(buffer_len),
            _ => Region::caret(0),
        }
    }

    /// Whether the failure is reported on the status line.
    ///
    /// Unimplemented kinds are a gap in this crate rather than something the user did, so they
    /// are only logged.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::Unimplemented(_) | Self::UnknownKind(_))
    }
}

#[derive(Debug, Error)]
/// Errors surfaced by [`QuickSelect::execute`](crate::QuickSelect::execute).
pub enum QuickSelectError {
    #[error("search failed: {0}")]
    /// The host search engine rejected a pattern.
    Search(#[from] SearchError),

    #[error(transparent)]
    /// A scope kind could not be decoded.
    Scope(#[from] ScopeError),

    #[error("unknown command '{0}'")]
    /// The host dispatched a command name this crate does not handle.
    UnknownCommand(String),

    #[error("invalid arguments for '{command}': {message}")]
    /// Command arguments did not have the expected shape.
    InvalidArguments {
        /// The command name.
        command: String,
        /// What was wrong with the arguments.
        message: String,
    },

    #[error("invalid settings: {0}")]
    /// Settings JSON could not be decoded.
    Config(#[from] serde_json::Error),
}
