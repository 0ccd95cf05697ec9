use indoc::indoc;
use sieve_core::{AttrId, NameTable, TypeId};

use super::ast::{Combinator, CompareOp, Literal, Selector, SelectorList};
use super::{AstPrinter, Parser};
use crate::parse_selector;

fn names() -> NameTable {
    NameTable::with_names(
        ["Foo", "Bar", "Baz"],
        ["attr", "name", "callee", "object", "a", "b"],
    )
}

fn parse(source: &str) -> Vec<SelectorList> {
    let names = names();
    parse_selector(source, |n| names.element(n), |n| names.attr(n)).unwrap()
}

fn nodes(source: &str) -> Vec<Selector> {
    let lists = parse(source);
    assert_eq!(lists.len(), 1, "expected a single selector in {source:?}");
    lists[0].nodes().to_vec()
}

fn dump(source: &str) -> String {
    let names = names();
    AstPrinter::new(&parse(source), &names).dump()
}

fn element(name: &str) -> Selector {
    Selector::Element {
        id: names().element(name),
        wildcard: false,
    }
}

fn attr(name: &str) -> AttrId {
    names().attr(name).unwrap()
}

fn relation(op: Combinator) -> Selector {
    Selector::Relation { op }
}

#[test]
fn single_element() {
    assert_eq!(
        nodes("Foo"),
        vec![Selector::Element {
            id: Some(TypeId::new(1)),
            wildcard: false,
        }]
    );
}

#[test]
fn wildcard() {
    assert_eq!(
        nodes("*"),
        vec![Selector::Element {
            id: None,
            wildcard: true,
        }]
    );
}

#[test]
fn descendant_and_child() {
    assert_eq!(
        nodes("Foo Bar"),
        vec![element("Foo"), relation(Combinator::Descendant), element("Bar")]
    );
    assert_eq!(
        nodes("Foo > Bar"),
        vec![element("Foo"), relation(Combinator::Child), element("Bar")]
    );
    assert_eq!(nodes("Foo>Bar"), nodes("Foo > Bar"));
    assert_eq!(nodes("Foo >Bar"), nodes("Foo > Bar"));
}

#[test]
fn sibling_combinators() {
    assert_eq!(
        nodes("Foo + Bar ~ Baz"),
        vec![
            element("Foo"),
            relation(Combinator::Adjacent),
            element("Bar"),
            relation(Combinator::Following),
            element("Baz"),
        ]
    );
}

#[test]
fn surrounding_space_is_insignificant() {
    assert_eq!(nodes("  Foo  "), vec![element("Foo")]);
}

#[test]
fn attribute_comparison() {
    assert_eq!(
        nodes("[attr=1]"),
        vec![Selector::AttrBinary {
            path: vec![attr("attr")],
            op: CompareOp::Eq,
            value: Literal::Number(1.0),
        }]
    );
    assert_eq!(
        nodes("[attr]"),
        vec![Selector::AttrExists {
            path: vec![attr("attr")],
        }]
    );
}

#[test]
fn attribute_paths_and_operators() {
    assert_eq!(
        nodes("[ a.b != 'x' ]"),
        vec![Selector::AttrBinary {
            path: vec![attr("a"), attr("b")],
            op: CompareOp::NotEq,
            value: Literal::String("x".to_owned()),
        }]
    );

    let ops: Vec<CompareOp> = ["[a>1]", "[a>=1]", "[a<1]", "[a<=1]"]
        .iter()
        .map(|source| match &nodes(source)[0] {
            Selector::AttrBinary { op, .. } => *op,
            other => panic!("unexpected node {other:?}"),
        })
        .collect();
    assert_eq!(
        ops,
        vec![CompareOp::Gt, CompareOp::Gte, CompareOp::Lt, CompareOp::Lte]
    );
}

#[test]
fn nth_child_literal() {
    assert_eq!(
        nodes(":nth-child(2)"),
        vec![Selector::PseudoNthChild {
            step: 0,
            step_offset: 1,
            repeat: false,
            of: None,
        }]
    );
}

#[test]
fn nth_child_step() {
    assert_eq!(
        nodes(":nth-child(2n+1)"),
        vec![Selector::PseudoNthChild {
            step: 2,
            step_offset: 1,
            repeat: true,
            of: None,
        }]
    );
    assert_eq!(nodes(":nth-child( 2n + 1 )"), nodes(":nth-child(2n+1)"));
    assert_eq!(nodes(":nth-child(-2n - 1)"), nodes(":nth-child(-2n-1)"));
}

#[test]
fn first_and_last_child() {
    assert_eq!(
        nodes("Foo:first-child:last-child"),
        vec![
            element("Foo"),
            Selector::PseudoFirstChild,
            Selector::PseudoLastChild,
        ]
    );
}

#[test]
fn group_of_alternatives() {
    let lists = parse("Foo, Bar > Baz,*");
    assert_eq!(lists.len(), 3);
    assert_eq!(lists[0].nodes(), &[element("Foo")]);
    assert_eq!(lists[1].len(), 3);
    assert_eq!(
        lists[2].nodes(),
        &[Selector::Element {
            id: None,
            wildcard: true,
        }]
    );
}

#[test]
fn list_spans() {
    let lists = parse("Foo , Bar > Baz ");
    assert_eq!(lists[0].span().range(), 0..3);
    assert_eq!(lists[1].span().range(), 6..15);
}

#[test]
fn space_before_is_is_a_combinator() {
    insta::assert_snapshot!(dump("Foo :is(Bar, Baz)"), @r"
    Selector
      Element Foo
      Relation Descendant
      Is
        Selector
          Element Bar
        Selector
          Element Baz
    ");
}

#[test]
fn space_before_other_parts_is_not() {
    assert_eq!(nodes("Foo [attr]"), nodes("Foo[attr]"));
    assert_eq!(nodes("Foo :first-child"), nodes("Foo:first-child"));
    assert_eq!(nodes("Foo .callee"), nodes("Foo.callee"));
}

#[test]
fn where_and_matches_alias_is() {
    assert_eq!(dump(":where(Foo)"), dump(":is(Foo)"));
    assert_eq!(dump(":matches(Foo)"), dump(":is(Foo)"));
    assert_eq!(dump(":matches(Foo > Bar)"), dump(":is(Foo > Bar)"));
}

#[test]
fn nested_pseudo_classes() {
    let source = indoc! {r#"
        Foo > Bar:has(Baz[name="x"], :not([attr])),
        *.callee.object
    "#};
    insta::assert_snapshot!(dump(source), @r#"
    Selector
      Element Foo
      Relation Child
      Element Bar
      Has
        Selector
          Element Baz
          AttrBinary name = "x"
        Selector
          Not
            Selector
              AttrExists attr
    Selector
      Element *
      Field callee.object
    "#);
}

#[test]
fn nth_child_of() {
    insta::assert_snapshot!(dump("Bar:nth-child(2n+1 of Foo > Baz)"), @r"
    Selector
      Element Bar
      NthChild step=2 offset=1 repeat=true
        Of
          Selector
            Element Foo
            Relation Child
            Element Baz
    ");
}

#[test]
fn literal_values() {
    insta::assert_snapshot!(dump("[a=true][a=null][a=undefined][a=-2.5][a=7n][a=bare word][a=/x+/i]"), @r#"
    Selector
      AttrBinary a = true
      AttrBinary a = null
      AttrBinary a = undefined
      AttrBinary a = -2.5
      AttrBinary a = 7n
      AttrBinary a = "bare word"
      AttrBinary a = /x+/i
    "#);
}

#[test]
fn dump_with_spans() {
    let names = names();
    let lists = parse("Foo, :is(Bar)");
    insta::assert_snapshot!(AstPrinter::new(&lists, &names).with_spans(true).dump(), @r"
    Selector 0..3
      Element Foo
    Selector 5..13
      Is
        Selector 9..12
          Element Bar
    ");
}

#[test]
fn custom_resolvers() {
    let resolve_element = |name: &str| (name == "Call").then_some(TypeId::new(7));
    let resolve_attr = |name: &str| (name == "callee").then_some(AttrId::new(3));
    let lists = Parser::new("Call.callee", &resolve_element, &resolve_attr)
        .parse()
        .unwrap();
    assert_eq!(
        lists[0].nodes(),
        &[
            Selector::Element {
                id: Some(TypeId::new(7)),
                wildcard: false,
            },
            Selector::Field {
                path: vec![AttrId::new(3)],
            },
        ]
    );
}

#[test]
fn unlimited_recursion() {
    let names = names();
    let resolve_element = |n: &str| names.element(n);
    let resolve_attr = |n: &str| names.attr(n);
    let source = format!("{}Foo{}", ":not(".repeat(100), ")".repeat(100));
    let lists = Parser::new(&source, &resolve_element, &resolve_attr)
        .with_recursion_limit(None)
        .parse()
        .unwrap();
    assert_eq!(lists.len(), 1);
}
