//! Command-invocation history queries.
//!
//! Hosts record every command they execute (name, JSON arguments, and how many consecutive
//! times it was repeated). Two derived values are computed from that history:
//!
//! - the **repeat count** of a scope command, which expands the scope outward, and
//! - the **redo run length** of the incremental command, which tells a soft undo of our own
//!   steps apart from a selection change made by the user.

use crate::host::BufferHost;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a host's command history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Command name, e.g. `set_quick_select_scope`.
    pub name: String,
    /// Command arguments.
    #[serde(default)]
    pub args: Value,
    /// Number of consecutive repetitions folded into this entry.
    #[serde(default = "one")]
    pub count: usize,
}

fn one() -> usize {
    1
}

impl CommandRecord {
    /// Create a record with a repetition count of one.
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: name.into(),
            args,
            count: 1,
        }
    }

    /// Same record with a different repetition count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    fn is_invocation_of(&self, name: &str, args: &Value) -> bool {
        self.name == name && &self.args == args
    }
}

/// Number of consecutive, identical invocations of `name(args)` immediately preceding the
/// current one.
pub fn repeat_count<B: BufferHost + ?Sized>(buffer: &B, name: &str, args: &Value) -> usize {
    let mut total = 0;
    let mut index = 0isize;
    while let Some(record) = buffer.command_history(index) {
        if !record.is_invocation_of(name, args) {
            break;
        }
        total += record.count;
        index -= 1;
    }
    total
}

/// Number of undone invocations of `name` waiting on the redo side of the history.
///
/// Only meaningful when the most recent applied command is `name` itself: otherwise the
/// history does not describe a partial undo of a run of `name` commands, and `0` is returned.
pub fn redo_run_length<B: BufferHost + ?Sized>(buffer: &B, name: &str) -> usize {
    match buffer.command_history(0) {
        Some(record) if record.name == name => {}
        _ => return 0,
    }

    let mut total = 0;
    let mut index = 1isize;
    while let Some(record) = buffer.command_history(index) {
        if record.name != name {
            break;
        }
        total += record.count;
        index += 1;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults_when_deserialized() {
        let record: CommandRecord =
            serde_json::from_str(r#"{ "name": "clear_quick_select_scope" }"#).unwrap();
        assert_eq!(record.count, 1);
        assert_eq!(record.args, Value::Null);
    }

    #[test]
    fn test_invocation_matches_name_and_args() {
        let record = CommandRecord::new("set_quick_select_scope", serde_json::json!({"scope": "block"}));
        assert!(record.is_invocation_of(
            "set_quick_select_scope",
            &serde_json::json!({"scope": "block"})
        ));
        assert!(!record.is_invocation_of(
            "set_quick_select_scope",
            &serde_json::json!({"scope": "parentheses"})
        ));
    }
}
