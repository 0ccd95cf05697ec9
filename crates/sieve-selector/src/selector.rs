//! Parse-and-compile facade.

use sieve_core::{MatchContext, Matcher, NameTable, NodeId};

use crate::Result;
use crate::compile::compile_lists;
use crate::parser::{AstPrinter, DEFAULT_RECURSION_LIMIT, Parser, SelectorList};

/// A selector group with its compiled matchers.
///
/// Matchers carry `:has`/`:not` caches keyed by node id; use
/// [`recompile`](Self::recompile) before evaluating against another tree.
#[derive(Debug)]
pub struct CompiledSelector {
    source: String,
    lists: Vec<SelectorList>,
    matchers: Vec<Matcher>,
}

impl CompiledSelector {
    /// Parses with the default recursion limit and compiles.
    pub fn parse(source: &str, names: &NameTable) -> Result<Self> {
        Self::builder(source, names).build()
    }

    pub fn builder<'a>(source: &'a str, names: &'a NameTable) -> SelectorBuilder<'a> {
        SelectorBuilder {
            source,
            names,
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }

    /// Wraps lists that were parsed elsewhere.
    pub fn from_lists(source: impl Into<String>, lists: Vec<SelectorList>) -> Self {
        let matchers = compile_lists(&lists);
        Self {
            source: source.into(),
            lists,
            matchers,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn lists(&self) -> &[SelectorList] {
        &self.lists
    }

    /// Whether any alternative matches `id`.
    pub fn matches(&self, ctx: &dyn MatchContext, id: NodeId) -> bool {
        self.matching_list(ctx, id).is_some()
    }

    /// Index of the first alternative that matches `id`.
    pub fn matching_list(&self, ctx: &dyn MatchContext, id: NodeId) -> Option<usize> {
        self.matchers.iter().position(|m| m.matches(ctx, id))
    }

    /// Same selector with fresh matchers and empty caches.
    pub fn recompile(&self) -> Self {
        Self::from_lists(self.source.clone(), self.lists.clone())
    }

    pub fn dump(&self, names: &NameTable) -> String {
        AstPrinter::new(&self.lists, names).dump()
    }

    pub fn dump_with_spans(&self, names: &NameTable) -> String {
        AstPrinter::new(&self.lists, names).with_spans(true).dump()
    }
}

pub struct SelectorBuilder<'a> {
    source: &'a str,
    names: &'a NameTable,
    recursion_limit: Option<u32>,
}

impl SelectorBuilder<'_> {
    /// See [`Parser::with_recursion_limit`].
    pub fn recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn build(self) -> Result<CompiledSelector> {
        let names = self.names;
        let resolve_element = |name: &str| names.element(name);
        let resolve_attr = |name: &str| names.attr(name);
        let lists = Parser::new(self.source, &resolve_element, &resolve_attr)
            .with_recursion_limit(self.recursion_limit)
            .parse()?;
        Ok(CompiledSelector::from_lists(self.source, lists))
    }
}
