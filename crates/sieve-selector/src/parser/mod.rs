//! Selector front end: tokens, literals, AST and the recursive-descent parser.
//!
//! # Grammar
//!
//! ```text
//! group    := list ( ',' list )*
//! list     := compound ( combinator compound )*
//! compound := ( name | '*' | '[' path ( op value )? ']' | '.' path | ':' pseudo )+
//! pseudo   := 'first-child' | 'last-child'
//!           | 'nth-child' '(' An+B ( 'of' list )? ')'
//!           | ( 'is' | 'where' | 'matches' | 'has' | 'not' ) '(' group ')'
//! ```
//!
//! Combinators are `>`, `+`, `~` and whitespace. Whitespace only counts as
//! a combinator in front of a name or `:is`/`:where`/`:matches`.

pub mod ast;
pub mod lexer;
pub mod literal;

mod core;
mod invariants;
mod nth;
mod printer;
mod split;

#[cfg(test)]
mod errors_tests;
#[cfg(test)]
mod nth_tests;
#[cfg(test)]
mod parser_tests;

pub use ast::{Combinator, CompareOp, Literal, Selector, SelectorList};
pub use core::{DEFAULT_RECURSION_LIMIT, Parser, ResolveAttr, ResolveElement};
pub use literal::Regex;
pub use printer::AstPrinter;
pub use split::split_top_level_selectors;
