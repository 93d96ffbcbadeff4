//! Scope kinds and scope region resolution.
//!
//! A [`ScopeKind`] names a strategy for deriving the region that bounds a quick select. The
//! [`ScopeResolver`] dispatches each kind to its resolver and produces one absolute region.

use crate::block::resolve_block_scope;
use crate::config::QuickSelectConfig;
use crate::delimiter::{DelimiterPair, resolve_delimiter_scope};
use crate::error::ScopeError;
use crate::host::BufferHost;
use crate::marked_scope::read_marked_scope;
use crate::region::Region;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named strategies for deriving a bounding region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ScopeKind {
    /// The whole buffer.
    All,
    /// The smallest function-like region containing the selection.
    Function,
    /// Contents of the enclosing `( )`.
    Parentheses,
    /// Contents of the enclosing `{ }`.
    CurlyBraces,
    /// Contents of the enclosing `[ ]`.
    SquareBrackets,
    /// Contents of the enclosing `< >`.
    AngleBrackets,
    /// The enclosing `{ }` block, located through the host's nesting depth.
    Block,
    /// The selection itself.
    Selection,
    /// The persisted marked scope.
    CurrentMarkedScope,
    /// Contents of enclosing `' '` (not implemented).
    SingleQuotes,
    /// Contents of enclosing `" "` (not implemented).
    DoubleQuotes,
    /// Contents of enclosing `` ` ` `` (not implemented).
    Backticks,
}

impl ScopeKind {
    /// Every scope kind.
    pub const ALL: [ScopeKind; 12] = [
        ScopeKind::All,
        ScopeKind::Function,
        ScopeKind::Parentheses,
        ScopeKind::CurlyBraces,
        ScopeKind::SquareBrackets,
        ScopeKind::AngleBrackets,
        ScopeKind::Block,
        ScopeKind::Selection,
        ScopeKind::CurrentMarkedScope,
        ScopeKind::SingleQuotes,
        ScopeKind::DoubleQuotes,
        ScopeKind::Backticks,
    ];

    /// The name hosts use in command arguments.
    pub fn name(self) -> &'static str {
        match self {
            ScopeKind::All => "all",
            ScopeKind::Function => "function",
            ScopeKind::Parentheses => "parentheses",
            ScopeKind::CurlyBraces => "curly braces",
            ScopeKind::SquareBrackets => "square brackets",
            ScopeKind::AngleBrackets => "angle brackets",
            ScopeKind::Block => "block",
            ScopeKind::Selection => "selection",
            ScopeKind::CurrentMarkedScope => "current_marked_scope",
            ScopeKind::SingleQuotes => "single quotes",
            ScopeKind::DoubleQuotes => "double quotes",
            ScopeKind::Backticks => "backticks",
        }
    }

    /// The delimiter pair for the bracket kinds.
    pub fn delimiter_pair(self) -> Option<DelimiterPair> {
        match self {
            ScopeKind::Parentheses => Some(DelimiterPair::PARENTHESES),
            ScopeKind::CurlyBraces => Some(DelimiterPair::CURLY_BRACES),
            ScopeKind::SquareBrackets => Some(DelimiterPair::SQUARE_BRACKETS),
            ScopeKind::AngleBrackets => Some(DelimiterPair::ANGLE_BRACKETS),
            _ => None,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScopeKind {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "parens" {
            return Ok(ScopeKind::Parentheses);
        }
        ScopeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ScopeError::UnknownKind(s.to_string()))
    }
}

impl TryFrom<String> for ScopeKind {
    type Error = ScopeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScopeKind> for &'static str {
    fn from(kind: ScopeKind) -> Self {
        kind.name()
    }
}

/// Resolves a [`ScopeKind`] to an absolute region of a buffer.
#[derive(Debug, Clone, Copy)]
pub struct ScopeResolver<'a> {
    config: &'a QuickSelectConfig,
}

impl<'a> ScopeResolver<'a> {
    /// Create a resolver using `config` (marker key, function selectors, status messages).
    pub fn new(config: &'a QuickSelectConfig) -> Self {
        Self { config }
    }

    /// Resolve `kind` around `selection`, expanded outward by `repeat_count` levels where the
    /// kind supports nesting.
    pub fn resolve<B: BufferHost + ?Sized>(
        &self,
        buffer: &mut B,
        selection: Region,
        kind: ScopeKind,
        repeat_count: usize,
    ) -> Result<Region, ScopeError> {
        match kind {
            ScopeKind::All => Ok(Region::new(0, buffer.len_chars())),
            ScopeKind::Function => self.enclosing_function(&*buffer, selection, repeat_count),
            ScopeKind::Parentheses
            | ScopeKind::CurlyBraces
            | ScopeKind::SquareBrackets
            | ScopeKind::AngleBrackets => {
                let pair = kind.delimiter_pair().ok_or(ScopeError::Unimplemented(kind))?;
                resolve_delimiter_scope(&*buffer, selection, repeat_count, pair)
            }
            ScopeKind::Block => Ok(resolve_block_scope(&*buffer, selection, repeat_count)),
            ScopeKind::Selection => Ok(selection),
            ScopeKind::CurrentMarkedScope => {
                Ok(read_marked_scope(buffer, &self.config.marker_key).unwrap_or_default())
            }
            // Quote pairs cannot be told apart from their own escapes by a plain scan.
            ScopeKind::SingleQuotes | ScopeKind::DoubleQuotes | ScopeKind::Backticks => {
                Err(ScopeError::Unimplemented(kind))
            }
        }
    }

    /// Like [`ScopeResolver::resolve`], but reports failures and returns the empty sentinel
    /// region instead of an error.
    pub fn resolve_or_report<B: BufferHost + ?Sized>(
        &self,
        buffer: &mut B,
        selection: Region,
        kind: ScopeKind,
        repeat_count: usize,
    ) -> Region {
        match self.resolve(buffer, selection, kind, repeat_count) {
            Ok(region) => region,
            Err(err) => {
                if err.is_user_visible() {
                    debug!("scope {} failed: {}", kind, err);
                    if self.config.status_messages {
                        buffer.status_message(&err.to_string());
                    }
                } else {
                    warn!("{}", err);
                }
                err.sentinel(buffer.len_chars())
            }
        }
    }

    fn enclosing_function<B: BufferHost + ?Sized>(
        &self,
        buffer: &B,
        selection: Region,
        repeat_count: usize,
    ) -> Result<Region, ScopeError> {
        let mut candidates: Vec<Region> = self
            .config
            .function_selectors
            .iter()
            .flat_map(|selector| buffer.find_by_selector(selector))
            .filter(|region| region.contains(selection))
            .collect();
        candidates.sort_by_key(|region| (region.len(), region.begin()));
        candidates.dedup();

        let index = repeat_count.min(candidates.len().saturating_sub(1));
        candidates
            .get(index)
            .copied()
            .ok_or(ScopeError::NoEnclosingFunction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for kind in ScopeKind::ALL {
            assert_eq!(kind.name().parse::<ScopeKind>().unwrap(), kind);
        }
        assert_eq!("parens".parse::<ScopeKind>().unwrap(), ScopeKind::Parentheses);
        assert_eq!(
            "braces".parse::<ScopeKind>().unwrap_err(),
            ScopeError::UnknownKind("braces".to_string())
        );
    }

    #[test]
    fn test_serde_uses_host_names() {
        let kind: ScopeKind = serde_json::from_str(r#""curly braces""#).unwrap();
        assert_eq!(kind, ScopeKind::CurlyBraces);
        assert_eq!(
            serde_json::to_string(&ScopeKind::CurrentMarkedScope).unwrap(),
            r#""current_marked_scope""#
        );
        assert!(serde_json::from_str::<ScopeKind>(r#""paragraph""#).is_err());
    }

    #[test]
    fn test_delimiter_pairs() {
        assert_eq!(
            ScopeKind::SquareBrackets.delimiter_pair(),
            Some(DelimiterPair::SQUARE_BRACKETS)
        );
        assert_eq!(ScopeKind::Block.delimiter_pair(), None);
    }
}
