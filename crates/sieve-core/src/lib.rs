#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Sieve selector matching.
//!
//! Three layers:
//! - **Ids**: `NodeId`, `TypeId`, `AttrId` newtypes with a `NONE` sentinel of 0
//! - **Capability**: the [`MatchContext`] trait compiled matchers navigate through
//! - **Reference impls**: [`NameTable`] for name ↔ id resolution and [`Tree`],
//!   an in-memory tree that implements `MatchContext`

pub mod names;
pub mod tree;

mod invariants;

#[cfg(test)]
mod names_tests;
#[cfg(test)]
mod tree_tests;

use std::fmt;

pub use names::NameTable;
pub use tree::{AttrValue, Tree};

// ============================================================================
// Ids
// ============================================================================

/// Handle of a node inside one tree. `NodeId::NONE` means "no node"
/// (parent of the root, absent field, invalid id).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node type (element name) id. `TypeId::NONE` is never a valid type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u16);

impl TypeId {
    pub const NONE: TypeId = TypeId(0);

    #[inline]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Attribute / field name id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrId(u16);

impl AttrId {
    pub const NONE: AttrId = AttrId(0);

    #[inline]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

// ============================================================================
// Attribute values
// ============================================================================

/// Value found at the end of an attribute path.
///
/// Strings borrow from the context so lookups stay allocation-free.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Str(&'a str),
    /// A child node stored under the attribute.
    Node(NodeId),
}

impl Value<'_> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }
}

/// Signal that some segment of an attribute path does not exist.
///
/// Not a fault: matchers treat it as "no match".
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("attribute path segment {segment} is missing")]
pub struct Missing {
    /// Index of the first path segment that could not be resolved.
    pub segment: usize,
}

// ============================================================================
// Matchers
// ============================================================================

type MatchFn = dyn Fn(&dyn MatchContext, NodeId) -> bool;

/// A compiled selector predicate.
///
/// Evaluation is total: every `(context, id)` pair yields `true` or `false`.
/// Matchers may own per-instance caches and are therefore neither `Send`
/// nor `Sync`; compile one set per tree traversal.
pub struct Matcher(Box<MatchFn>);

impl Matcher {
    pub fn new(f: impl Fn(&dyn MatchContext, NodeId) -> bool + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Matcher that accepts every node. Terminal continuation of a chain.
    pub fn always() -> Self {
        Self::new(|_, _| true)
    }

    #[inline]
    pub fn matches(&self, ctx: &dyn MatchContext, id: NodeId) -> bool {
        (self.0)(ctx, id)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matcher(..)")
    }
}

// ============================================================================
// MatchContext Trait
// ============================================================================

/// Tree navigation capability consumed by compiled matchers.
///
/// All operations are total. Absence is expressed with the `NONE` sentinels,
/// an empty sibling slice, or [`Missing`] for attribute paths.
pub trait MatchContext {
    /// Type of `id`, `TypeId::NONE` for an invalid id.
    fn node_type(&self, id: NodeId) -> TypeId;

    /// Parent of `id`, `NodeId::NONE` for the root.
    fn parent(&self, id: NodeId) -> NodeId;

    /// Ordered sibling group of `id`, `id` included.
    fn siblings(&self, id: NodeId) -> &[NodeId];

    fn first_child(&self, id: NodeId) -> NodeId;
    fn last_child(&self, id: NodeId) -> NodeId;

    /// Resolves `path[start..]` against `id`, descending through node-valued segments.
    fn attr_path_value(
        &self,
        id: NodeId,
        path: &[AttrId],
        start: usize,
    ) -> Result<Value<'_>, Missing>;

    /// Child stored under `field` on `parent`, `NodeId::NONE` if absent.
    fn field(&self, parent: NodeId, field: AttrId) -> NodeId;

    /// Whether any strict descendant of `id` satisfies one of `matchers`.
    fn sub_select(&self, matchers: &[Matcher], id: NodeId) -> bool;
}

impl<T: MatchContext + ?Sized> MatchContext for &T {
    fn node_type(&self, id: NodeId) -> TypeId {
        (*self).node_type(id)
    }
    fn parent(&self, id: NodeId) -> NodeId {
        (*self).parent(id)
    }
    fn siblings(&self, id: NodeId) -> &[NodeId] {
        (*self).siblings(id)
    }
    fn first_child(&self, id: NodeId) -> NodeId {
        (*self).first_child(id)
    }
    fn last_child(&self, id: NodeId) -> NodeId {
        (*self).last_child(id)
    }
    fn attr_path_value(
        &self,
        id: NodeId,
        path: &[AttrId],
        start: usize,
    ) -> Result<Value<'_>, Missing> {
        (*self).attr_path_value(id, path, start)
    }
    fn field(&self, parent: NodeId, field: AttrId) -> NodeId {
        (*self).field(parent, field)
    }
    fn sub_select(&self, matchers: &[Matcher], id: NodeId) -> bool {
        (*self).sub_select(matchers, id)
    }
}
