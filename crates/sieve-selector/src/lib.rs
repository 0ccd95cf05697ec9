//! Sieve selectors: CSS-like patterns over syntax trees.
//!
//! A selector such as `CallExpression > Identifier[name=/^use/]:first-child`
//! is parsed once into a [`SelectorList`] group, compiled into [`Matcher`]s,
//! and then evaluated against any tree that implements [`MatchContext`].
//!
//! # Example
//!
//! ```
//! use sieve_core::{NameTable, Tree};
//! use sieve_selector::CompiledSelector;
//!
//! let names = NameTable::with_names(["Foo", "Bar"], ["name"]);
//! let mut tree = Tree::new();
//! let foo = tree.add_root(names.element("Foo").unwrap());
//! let bar = tree.add_child(foo, names.element("Bar").unwrap());
//!
//! let selector = CompiledSelector::parse("Foo > Bar", &names).unwrap();
//! assert!(selector.matches(&tree, bar));
//! assert!(!selector.matches(&tree, foo));
//! ```
//!
//! [`MatchContext`]: sieve_core::MatchContext
//! [`Matcher`]: sieve_core::Matcher

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;
pub mod diagnostics;
pub mod parser;

mod selector;


use sieve_core::{AttrId, TypeId};

pub use compile::{compile_group, compile_lists, compile_selector};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticPrinter, Span};
pub use parser::{Parser, SelectorList, split_top_level_selectors};
pub use selector::{CompiledSelector, SelectorBuilder};

/// Errors that abort parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Lex(Diagnostic),

    #[error("{0}")]
    Parse(Diagnostic),

    /// Pseudo-class arguments nested too deeply.
    #[error("selector nesting exceeds the limit of {0}")]
    RecursionLimitExceeded(u32),
}

impl Error {
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::Lex(diagnostic) | Error::Parse(diagnostic) => Some(diagnostic),
            Error::RecursionLimitExceeded(_) => None,
        }
    }
}

impl From<Diagnostic> for Error {
    fn from(diagnostic: Diagnostic) -> Self {
        if diagnostic.kind().is_lex_error() {
            Error::Lex(diagnostic)
        } else {
            Error::Parse(diagnostic)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses `input` into its comma-separated alternatives.
///
/// Element and attribute names go through the resolvers; a name that
/// resolves to `None` fails the parse.
#[tracing::instrument(level = "debug", skip(resolve_element, resolve_attr))]
pub fn parse_selector(
    input: &str,
    resolve_element: impl Fn(&str) -> Option<TypeId>,
    resolve_attr: impl Fn(&str) -> Option<AttrId>,
) -> Result<Vec<SelectorList>> {
    Parser::new(input, &resolve_element, &resolve_attr).parse()
}
