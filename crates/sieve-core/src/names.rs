//! Name ↔ id registry for element types and attributes.
//!
//! Hosts that already number their node kinds pass their own resolvers to the
//! parser. `NameTable` covers everyone else: it interns names in insertion
//! order and hands out ids starting at 1, keeping 0 free for `NONE`.

use indexmap::IndexSet;

use crate::{AttrId, TypeId};

#[derive(Debug, Clone, Default)]
pub struct NameTable {
    elements: IndexSet<String>,
    attrs: IndexSet<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from element and attribute name lists.
    pub fn with_names<'a>(
        elements: impl IntoIterator<Item = &'a str>,
        attrs: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut table = Self::new();
        for name in elements {
            table.intern_element(name);
        }
        for name in attrs {
            table.intern_attr(name);
        }
        table
    }

    /// Interns an element name, returning its existing id if already present.
    pub fn intern_element(&mut self, name: &str) -> TypeId {
        let (index, _) = self.elements.insert_full(name.to_owned());
        TypeId::new(index_to_id(index))
    }

    pub fn intern_attr(&mut self, name: &str) -> AttrId {
        let (index, _) = self.attrs.insert_full(name.to_owned());
        AttrId::new(index_to_id(index))
    }

    pub fn element(&self, name: &str) -> Option<TypeId> {
        self.elements
            .get_index_of(name)
            .map(|index| TypeId::new(index_to_id(index)))
    }

    pub fn attr(&self, name: &str) -> Option<AttrId> {
        self.attrs
            .get_index_of(name)
            .map(|index| AttrId::new(index_to_id(index)))
    }

    pub fn element_name(&self, id: TypeId) -> Option<&str> {
        id_to_index(id.as_u16())
            .and_then(|index| self.elements.get_index(index))
            .map(String::as_str)
    }

    pub fn attr_name(&self, id: AttrId) -> Option<&str> {
        id_to_index(id.as_u16())
            .and_then(|index| self.attrs.get_index(index))
            .map(String::as_str)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn attr_count(&self) -> usize {
        self.attrs.len()
    }
}

fn index_to_id(index: usize) -> u16 {
    let id = index + 1;
    assert!(
        id <= u16::MAX as usize,
        "NameTable: more than {} names interned",
        u16::MAX
    );
    id as u16
}

fn id_to_index(id: u16) -> Option<usize> {
    (id as usize).checked_sub(1)
}
