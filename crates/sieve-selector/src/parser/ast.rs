//! Selector AST shared by the parser and the compiler.
//!
//! A [`SelectorList`] is a conjunctive chain of nodes read left to right, with
//! [`Selector::Relation`] nodes between compounds switching the node under
//! test. A group (comma-separated alternatives) is a `Vec<SelectorList>`.
//! Nodes are immutable once parsed.

use sieve_core::{AttrId, TypeId};

use super::literal::Regex;
use crate::diagnostics::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: the parent.
    Child,
    /// `+`: the immediately preceding sibling.
    Adjacent,
    /// `~`: any preceding sibling.
    Following,
}

impl Combinator {
    pub fn as_str(self) -> &'static str {
        match self {
            Combinator::Descendant => "Descendant",
            Combinator::Child => "Child",
            Combinator::Adjacent => "Adjacent",
            Combinator::Following => "Following",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub fn from_text(text: &str) -> Option<Self> {
        Some(match text {
            "=" => CompareOp::Eq,
            "!=" => CompareOp::NotEq,
            ">" => CompareOp::Gt,
            ">=" => CompareOp::Gte,
            "<" => CompareOp::Lt,
            "<=" => CompareOp::Lte,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// Right-hand side of an attribute comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Null,
    Undefined,
    Number(f64),
    BigInt(i128),
    String(String),
    Regex(Regex),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// `Foo` or `*`. `id` is `None` for the wildcard.
    Element { id: Option<TypeId>, wildcard: bool },
    Relation { op: Combinator },
    /// `[a.b]`
    AttrExists { path: Vec<AttrId> },
    /// `[a.b <op> value]`
    AttrBinary {
        path: Vec<AttrId>,
        op: CompareOp,
        value: Literal,
    },
    /// `.callee.object`: the node sits at this field path below some ancestor.
    Field { path: Vec<AttrId> },
    PseudoFirstChild,
    PseudoLastChild,
    /// `:nth-child(An+B [of S])`, stored 0-based.
    ///
    /// With `repeat == false` only `step_offset` is meaningful: the node's
    /// sibling index must equal it.
    PseudoNthChild {
        step: i64,
        step_offset: i64,
        repeat: bool,
        of: Option<SelectorList>,
    },
    PseudoIs { alternatives: Vec<SelectorList> },
    PseudoHas { alternatives: Vec<SelectorList> },
    PseudoNot { alternatives: Vec<SelectorList> },
}

impl Selector {
    pub fn is_relation(&self) -> bool {
        matches!(self, Selector::Relation { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    nodes: Vec<Selector>,
    span: Span,
}

impl SelectorList {
    pub fn new(nodes: Vec<Selector>, span: Span) -> Self {
        Self { nodes, span }
    }

    pub fn nodes(&self) -> &[Selector] {
        &self.nodes
    }

    /// Source range the list was parsed from.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
