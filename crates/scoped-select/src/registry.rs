//! Per-buffer state registries.
//!
//! State that outlives a single command (incremental walks, preview visibility) is keyed by
//! [`BufferId`] in an explicit registry owned by its component. Entries are created on first
//! use and must be torn down when the host closes the buffer.

use crate::host::BufferId;
use std::collections::HashMap;

/// A keyed store of per-buffer state.
#[derive(Debug, Clone)]
pub struct BufferRegistry<T> {
    entries: HashMap<BufferId, T>,
}

impl<T> Default for BufferRegistry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> BufferRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// State for `id`, if any.
    pub fn get(&self, id: BufferId) -> Option<&T> {
        self.entries.get(&id)
    }

    /// Mutable state for `id`, if any.
    pub fn get_mut(&mut self, id: BufferId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    /// Replace the state for `id`, returning the previous one.
    pub fn insert(&mut self, id: BufferId, value: T) -> Option<T> {
        self.entries.insert(id, value)
    }

    /// Drop the state for `id`.
    pub fn remove(&mut self, id: BufferId) -> Option<T> {
        self.entries.remove(&id)
    }

    /// Returns `true` if `id` has state.
    pub fn contains(&self, id: BufferId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of buffers with state.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no buffer has state.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Default> BufferRegistry<T> {
    /// State for `id`, created on first use.
    pub fn get_or_insert_default(&mut self, id: BufferId) -> &mut T {
        self.entries.entry(id).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_on_first_use_and_teardown() {
        let mut registry: BufferRegistry<Vec<u32>> = BufferRegistry::new();
        let a = BufferId::new(1);
        let b = BufferId::new(2);

        registry.get_or_insert_default(a).push(7);
        registry.get_or_insert_default(a).push(8);
        assert_eq!(registry.get(a), Some(&vec![7, 8]));
        assert!(!registry.contains(b));
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.remove(a), Some(vec![7, 8]));
        assert!(registry.is_empty());
        assert_eq!(registry.remove(a), None);
    }
}
