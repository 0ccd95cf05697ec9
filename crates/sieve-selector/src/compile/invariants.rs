//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::parser::Selector;

/// Relations sit strictly between two compounds.
#[inline]
pub(super) fn ensure_relations_placed(nodes: &[Selector]) {
    assert!(
        !nodes.first().is_some_and(Selector::is_relation),
        "broken selector invariant: list starts with a relation"
    );
    assert!(
        !nodes.last().is_some_and(Selector::is_relation),
        "broken selector invariant: list ends with a relation"
    );
    assert!(
        !nodes
            .windows(2)
            .any(|pair| pair[0].is_relation() && pair[1].is_relation()),
        "broken selector invariant: consecutive relations"
    );
}
