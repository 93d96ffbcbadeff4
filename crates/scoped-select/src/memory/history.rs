use crate::history::CommandRecord;
use crate::region::Region;

#[derive(Debug, Clone)]
struct HistoryEntry {
    record: CommandRecord,
    before: Vec<Region>,
    after: Vec<Region>,
}

/// Linear command history with selection snapshots, supporting soft undo/redo.
///
/// `applied` entries are on the undo side; the rest are undone and can be redone until a new
/// command is recorded.
#[derive(Debug, Clone, Default)]
pub(crate) struct SelectionHistory {
    entries: Vec<HistoryEntry>,
    applied: usize,
}

impl SelectionHistory {
    pub(crate) fn push(&mut self, record: CommandRecord, before: Vec<Region>, after: Vec<Region>) {
        self.entries.truncate(self.applied);
        self.entries.push(HistoryEntry {
            record,
            before,
            after,
        });
        self.applied = self.entries.len();
    }

    /// `0` is the last applied entry, negative is older, positive is on the redo side.
    pub(crate) fn get(&self, index: isize) -> Option<&CommandRecord> {
        let pos = self.applied as isize - 1 + index;
        if pos < 0 {
            return None;
        }
        self.entries.get(pos as usize).map(|entry| &entry.record)
    }

    /// Selections to restore, if there is anything to undo.
    pub(crate) fn undo(&mut self) -> Option<Vec<Region>> {
        if self.applied == 0 {
            return None;
        }
        self.applied -= 1;
        Some(self.entries[self.applied].before.clone())
    }

    /// Selections to restore, if there is anything to redo.
    pub(crate) fn redo(&mut self) -> Option<Vec<Region>> {
        let entry = self.entries.get(self.applied)?;
        self.applied += 1;
        Some(entry.after.clone())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str) -> CommandRecord {
        CommandRecord::new(name, json!({}))
    }

    #[test]
    fn test_indexing_around_the_undo_position() {
        let mut history = SelectionHistory::default();
        history.push(record("a"), vec![], vec![Region::caret(1)]);
        history.push(record("b"), vec![Region::caret(1)], vec![Region::caret(2)]);
        history.push(record("c"), vec![Region::caret(2)], vec![Region::caret(3)]);

        assert_eq!(history.get(0).map(|r| r.name.as_str()), Some("c"));
        assert_eq!(history.get(-2).map(|r| r.name.as_str()), Some("a"));
        assert_eq!(history.get(-3), None);
        assert_eq!(history.get(1), None);

        assert_eq!(history.undo(), Some(vec![Region::caret(2)]));
        assert_eq!(history.get(0).map(|r| r.name.as_str()), Some("b"));
        assert_eq!(history.get(1).map(|r| r.name.as_str()), Some("c"));

        assert_eq!(history.redo(), Some(vec![Region::caret(3)]));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_recording_discards_redo_side() {
        let mut history = SelectionHistory::default();
        history.push(record("a"), vec![], vec![]);
        history.push(record("b"), vec![], vec![]);
        history.undo();
        history.push(record("c"), vec![], vec![]);

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).map(|r| r.name.as_str()), Some("c"));
        assert_eq!(history.get(1), None);
        history.undo();
        history.undo();
        assert_eq!(history.undo(), None);
        assert_eq!(history.get(0), None);
    }
}
