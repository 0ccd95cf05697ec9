//! In-memory tree implementing [`MatchContext`].
//!
//! Node ids are `index + 1`, so `NodeId::NONE` never addresses a node.
//! Fields are ordinary children that are additionally reachable by name,
//! both through [`MatchContext::field`] and as node-valued attributes
//! (which lets attribute paths like `callee.name` descend into them).

use crate::{AttrId, MatchContext, Matcher, Missing, NodeId, TypeId, Value};

/// Owned attribute value stored on a [`Tree`] node.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Str(String),
    Node(NodeId),
}

impl AttrValue {
    pub fn as_value(&self) -> Value<'_> {
        match self {
            AttrValue::Undefined => Value::Undefined,
            AttrValue::Null => Value::Null,
            AttrValue::Bool(b) => Value::Bool(*b),
            AttrValue::Number(n) => Value::Number(*n),
            AttrValue::BigInt(n) => Value::BigInt(*n),
            AttrValue::Str(s) => Value::Str(s),
            AttrValue::Node(id) => Value::Node(*id),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Number(value.into())
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<NodeId> for AttrValue {
    fn from(value: NodeId) -> Self {
        AttrValue::Node(value)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: TypeId,
    pub(crate) parent: NodeId,
    pub(crate) children: Vec<NodeId>,
    pub(crate) fields: Vec<(AttrId, NodeId)>,
    pub(crate) attrs: Vec<(AttrId, AttrValue)>,
}

#[derive(Debug, Clone, Default)]
pub struct Tree {
    pub(crate) nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Adds a top-level node.
    pub fn add_root(&mut self, kind: TypeId) -> NodeId {
        let id = self.push_node(kind, NodeId::NONE);
        self.roots.push(id);
        id
    }

    /// Appends a child to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, kind: TypeId) -> NodeId {
        self.ensure_node(parent);
        let id = self.push_node(kind, parent);
        self.node_mut(parent).children.push(id);
        id
    }

    /// Appends a child that is also stored under `field` on `parent`.
    pub fn add_field(&mut self, parent: NodeId, field: AttrId, kind: TypeId) -> NodeId {
        let id = self.add_child(parent, kind);
        let data = self.node_mut(parent);
        data.fields.push((field, id));
        set_entry(&mut data.attrs, field, AttrValue::Node(id));
        id
    }

    pub fn set_attr(&mut self, id: NodeId, attr: AttrId, value: impl Into<AttrValue>) {
        self.ensure_node(id);
        set_entry(&mut self.node_mut(id).attrs, attr, value.into());
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |data| data.children.as_slice())
    }

    pub fn attr(&self, id: NodeId, attr: AttrId) -> Option<&AttrValue> {
        self.get(id)?
            .attrs
            .iter()
            .find(|(key, _)| *key == attr)
            .map(|(_, value)| value)
    }

    /// Pre-order walk over every node, roots first.
    pub fn walk(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.children(id).iter().rev().copied());
            Some(id)
        })
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&NodeData> {
        let index = (id.as_u32() as usize).checked_sub(1)?;
        self.nodes.get(index)
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        let index = id.as_u32() as usize - 1;
        &mut self.nodes[index]
    }

    fn push_node(&mut self, kind: TypeId, parent: NodeId) -> NodeId {
        self.nodes.push(NodeData {
            kind,
            parent,
            children: Vec::new(),
            fields: Vec::new(),
            attrs: Vec::new(),
        });
        NodeId::new(self.nodes.len() as u32)
    }
}

fn set_entry(attrs: &mut Vec<(AttrId, AttrValue)>, key: AttrId, value: AttrValue) {
    match attrs.iter_mut().find(|(existing, _)| *existing == key) {
        Some(entry) => entry.1 = value,
        None => attrs.push((key, value)),
    }
}

impl MatchContext for Tree {
    fn node_type(&self, id: NodeId) -> TypeId {
        self.get(id).map_or(TypeId::NONE, |data| data.kind)
    }

    fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |data| data.parent)
    }

    fn siblings(&self, id: NodeId) -> &[NodeId] {
        let Some(data) = self.get(id) else {
            return &[];
        };
        if data.parent.is_none() {
            return &self.roots;
        }
        self.children(data.parent)
    }

    fn first_child(&self, id: NodeId) -> NodeId {
        self.children(id).first().copied().unwrap_or(NodeId::NONE)
    }

    fn last_child(&self, id: NodeId) -> NodeId {
        self.children(id).last().copied().unwrap_or(NodeId::NONE)
    }

    fn attr_path_value(
        &self,
        id: NodeId,
        path: &[AttrId],
        start: usize,
    ) -> Result<Value<'_>, Missing> {
        let mut current = id;
        for (segment, &attr) in path.iter().enumerate().skip(start) {
            let value = self.attr(current, attr).ok_or(Missing { segment })?;
            if segment + 1 == path.len() {
                return Ok(value.as_value());
            }
            match value {
                AttrValue::Node(child) => current = *child,
                _ => return Err(Missing { segment: segment + 1 }),
            }
        }
        Err(Missing { segment: start })
    }

    fn field(&self, parent: NodeId, field: AttrId) -> NodeId {
        self.get(parent)
            .and_then(|data| data.fields.iter().find(|(key, _)| *key == field))
            .map_or(NodeId::NONE, |(_, child)| *child)
    }

    fn sub_select(&self, matchers: &[Matcher], id: NodeId) -> bool {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        while let Some(current) = stack.pop() {
            if matchers.iter().any(|m| m.matches(self, current)) {
                return true;
            }
            stack.extend_from_slice(self.children(current));
        }
        false
    }
}
