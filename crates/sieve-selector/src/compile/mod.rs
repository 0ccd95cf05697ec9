//! Selector compiler: folds a [`SelectorList`] into a single [`Matcher`].
//!
//! The fold runs left to right, each node wrapping the matcher built so far,
//! so the resulting predicate tests the rightmost compound first. Nested
//! selector lists inside pseudo-classes compile recursively.
//!
//! Compiled matchers own their `:has`/`:not` caches. Compile a fresh set for
//! every tree you evaluate against.

mod cache;
mod invariants;
mod matchers;

#[cfg(test)]
mod cache_tests;

use sieve_core::Matcher;

use crate::parser::{Selector, SelectorList};

pub use cache::SubtreeCache;

/// Compiles one selector list.
///
/// # Panics
///
/// If a relation starts or ends the list, or two relations are adjacent.
/// The parser never produces such lists.
#[tracing::instrument(level = "trace", skip_all, fields(nodes = list.len()))]
pub fn compile_selector(list: &SelectorList) -> Matcher {
    invariants::ensure_relations_placed(list.nodes());
    list.nodes()
        .iter()
        .fold(Matcher::always(), |next, node| compile_node(node, next))
}

/// Compiles alternatives into one matcher that accepts a node if any does.
pub fn compile_group(lists: &[SelectorList]) -> Matcher {
    let matchers = compile_lists(lists);
    Matcher::new(move |ctx, node| matchers.iter().any(|m| m.matches(ctx, node)))
}

/// Compiles every alternative separately, in order.
pub fn compile_lists(lists: &[SelectorList]) -> Vec<Matcher> {
    lists.iter().map(compile_selector).collect()
}

fn compile_node(node: &Selector, next: Matcher) -> Matcher {
    match node {
        Selector::Element { id, wildcard } => matchers::element(*id, *wildcard, next),
        Selector::Relation { op } => matchers::relation(*op, next),
        Selector::AttrExists { path } => matchers::attr_exists(path.clone(), next),
        Selector::AttrBinary { path, op, value } => {
            matchers::attr_binary(path.clone(), *op, value.clone(), next)
        }
        Selector::Field { path } => matchers::field(path.clone(), next),
        Selector::PseudoFirstChild => matchers::first_child(next),
        Selector::PseudoLastChild => matchers::last_child(next),
        Selector::PseudoNthChild {
            step,
            step_offset,
            repeat,
            of,
        } => matchers::nth_child(
            *step,
            *step_offset,
            *repeat,
            of.as_ref().map(compile_selector),
            next,
        ),
        Selector::PseudoIs { alternatives } => matchers::is(compile_lists(alternatives), next),
        Selector::PseudoHas { alternatives } => matchers::has(compile_lists(alternatives), next),
        Selector::PseudoNot { alternatives } => matchers::not(compile_lists(alternatives), next),
    }
}
