//! Per-matcher memo of subtree searches.

use std::cell::RefCell;
use std::collections::HashMap;

use sieve_core::NodeId;

/// Remembers, per node, whether a subtree search found a match.
///
/// Owned by a single compiled `:has`/`:not` node. Node ids are only
/// meaningful within one tree, so a cache must not outlive the traversal it
/// was compiled for.
#[derive(Debug, Default)]
pub struct SubtreeCache {
    entries: RefCell<HashMap<NodeId, bool>>,
}

impl SubtreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `id`, computing it with `search` on a miss.
    ///
    /// No borrow is held while `search` runs, so it may re-enter matchers
    /// that share this cache.
    pub fn get_or_search(&self, id: NodeId, search: impl FnOnce() -> bool) -> bool {
        if let Some(&found) = self.entries.borrow().get(&id) {
            return found;
        }
        let found = search();
        self.entries.borrow_mut().insert(id, found);
        found
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
