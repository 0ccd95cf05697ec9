//! Indented dump of a parsed selector group, for debugging and tests.

use std::fmt::Write;

use sieve_core::{AttrId, NameTable};

use super::ast::{Literal, Selector, SelectorList};

pub struct AstPrinter<'a> {
    lists: &'a [SelectorList],
    names: &'a NameTable,
    spans: bool,
}

impl<'a> AstPrinter<'a> {
    pub fn new(lists: &'a [SelectorList], names: &'a NameTable) -> Self {
        Self {
            lists,
            names,
            spans: false,
        }
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        for list in self.lists {
            self.format_list(list, 0, w)?;
        }
        Ok(())
    }

    fn format_list(&self, list: &SelectorList, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        if self.spans {
            writeln!(w, "{prefix}Selector {}", list.span())?;
        } else {
            writeln!(w, "{prefix}Selector")?;
        }
        for node in list.nodes() {
            self.format_node(node, indent + 1, w)?;
        }
        Ok(())
    }

    fn format_node(&self, node: &Selector, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        match node {
            Selector::Element { wildcard: true, .. } => writeln!(w, "{prefix}Element *"),
            Selector::Element { id, .. } => {
                let name = id
                    .and_then(|id| self.names.element_name(id))
                    .unwrap_or("?");
                writeln!(w, "{prefix}Element {name}")
            }
            Selector::Relation { op } => writeln!(w, "{prefix}Relation {}", op.as_str()),
            Selector::AttrExists { path } => {
                writeln!(w, "{prefix}AttrExists {}", self.path(path))
            }
            Selector::AttrBinary { path, op, value } => writeln!(
                w,
                "{prefix}AttrBinary {} {} {}",
                self.path(path),
                op.as_str(),
                literal(value)
            ),
            Selector::Field { path } => writeln!(w, "{prefix}Field {}", self.path(path)),
            Selector::PseudoFirstChild => writeln!(w, "{prefix}FirstChild"),
            Selector::PseudoLastChild => writeln!(w, "{prefix}LastChild"),
            Selector::PseudoNthChild {
                step,
                step_offset,
                repeat,
                of,
            } => {
                writeln!(
                    w,
                    "{prefix}NthChild step={step} offset={step_offset} repeat={repeat}"
                )?;
                if let Some(of) = of {
                    writeln!(w, "{prefix}  Of")?;
                    self.format_list(of, indent + 2, w)?;
                }
                Ok(())
            }
            Selector::PseudoIs { alternatives } => {
                self.format_pseudo("Is", alternatives, indent, w)
            }
            Selector::PseudoHas { alternatives } => {
                self.format_pseudo("Has", alternatives, indent, w)
            }
            Selector::PseudoNot { alternatives } => {
                self.format_pseudo("Not", alternatives, indent, w)
            }
        }
    }

    fn format_pseudo(
        &self,
        label: &str,
        alternatives: &[SelectorList],
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        writeln!(w, "{}{label}", "  ".repeat(indent))?;
        for list in alternatives {
            self.format_list(list, indent + 1, w)?;
        }
        Ok(())
    }

    fn path(&self, path: &[AttrId]) -> String {
        path.iter()
            .map(|&id| self.names.attr_name(id).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn literal(value: &Literal) -> String {
    match value {
        Literal::Bool(b) => b.to_string(),
        Literal::Null => "null".to_owned(),
        Literal::Undefined => "undefined".to_owned(),
        Literal::Number(n) => n.to_string(),
        Literal::BigInt(n) => format!("{n}n"),
        Literal::String(s) => format!("{s:?}"),
        Literal::Regex(re) => re.to_string(),
    }
}
