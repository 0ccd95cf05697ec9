//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{NodeId, Tree};

impl Tree {
    pub(crate) fn ensure_node(&self, id: NodeId) {
        assert!(
            self.get(id).is_some(),
            "Tree: node {id} not found (ids must come from this tree's builder methods)"
        );
    }
}
