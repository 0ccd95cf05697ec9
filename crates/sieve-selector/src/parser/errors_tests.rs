use sieve_core::NameTable;

use super::Parser;
use crate::diagnostics::DiagnosticKind;
use crate::{Error, parse_selector};

fn names() -> NameTable {
    NameTable::with_names(["Foo", "Bar", "Baz"], ["attr", "name"])
}

fn parse_error(source: &str) -> Error {
    let names = names();
    match parse_selector(source, |n| names.element(n), |n| names.attr(n)) {
        Ok(lists) => panic!("expected {source:?} to fail, got {lists:?}"),
        Err(err) => err,
    }
}

fn kind(source: &str) -> DiagnosticKind {
    match parse_error(source) {
        Error::Lex(diagnostic) | Error::Parse(diagnostic) => diagnostic.kind(),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unclosed_bracket() {
    let Error::Parse(diagnostic) = parse_error("[attr") else {
        panic!("expected a parse error");
    };
    assert_eq!(diagnostic.kind(), DiagnosticKind::UnclosedBracket);
    assert_eq!(diagnostic.span().range(), 0..1);
    assert_eq!(kind("Foo[attr=1"), DiagnosticKind::UnclosedBracket);
    assert_eq!(kind("["), DiagnosticKind::UnclosedBracket);
}

#[test]
fn multiple_selectors_in_of_clause() {
    assert_eq!(
        kind(":nth-child(2n+1 of Foo, Bar)"),
        DiagnosticKind::MultipleSelectors
    );
}

#[test]
fn empty_selectors() {
    assert_eq!(kind(""), DiagnosticKind::EmptySelector);
    assert_eq!(kind("   "), DiagnosticKind::EmptySelector);
    assert_eq!(kind("Foo,"), DiagnosticKind::EmptySelector);
    assert_eq!(kind("Foo,,Bar"), DiagnosticKind::EmptySelector);
    assert_eq!(kind(":is()"), DiagnosticKind::EmptySelector);
}

#[test]
fn dangling_combinators() {
    assert_eq!(kind("Foo >"), DiagnosticKind::ExpectedSelector);
    assert_eq!(kind("> Foo"), DiagnosticKind::ExpectedSelector);
    assert_eq!(kind("Foo > ~ Bar"), DiagnosticKind::ExpectedSelector);
    assert_eq!(kind(":has(Foo +)"), DiagnosticKind::ExpectedSelector);
}

#[test]
fn invalid_operators() {
    assert_eq!(kind("Foo >> Bar"), DiagnosticKind::InvalidOperator);
    assert_eq!(kind("Foo = Bar"), DiagnosticKind::InvalidOperator);
    assert_eq!(kind("[attr~=1]"), DiagnosticKind::InvalidOperator);
}

#[test]
fn unknown_names() {
    let Error::Parse(diagnostic) = parse_error("Foo > Qux") else {
        panic!("expected a parse error");
    };
    assert_eq!(diagnostic.kind(), DiagnosticKind::UnknownElement);
    assert_eq!(diagnostic.text(), "unknown element `Qux`");
    assert_eq!(diagnostic.span().range(), 6..9);

    assert_eq!(kind("[nope]"), DiagnosticKind::UnknownAttribute);
    assert_eq!(kind("Foo.nope"), DiagnosticKind::UnknownAttribute);
    assert_eq!(kind(":hover"), DiagnosticKind::UnknownPseudoClass);
}

#[test]
fn parentheses() {
    assert_eq!(kind(":is(Foo"), DiagnosticKind::UnclosedParen);
    assert_eq!(kind(":has(Foo, :not(Bar)"), DiagnosticKind::UnclosedParen);
    assert_eq!(kind(":nth-child(2"), DiagnosticKind::UnclosedParen);
    assert_eq!(kind("Foo)"), DiagnosticKind::UnmatchedParen);
    assert_eq!(kind(":not Foo"), DiagnosticKind::UnexpectedToken);
}

#[test]
fn invalid_values() {
    assert_eq!(kind(":nth-child(x)"), DiagnosticKind::InvalidNth);
    assert_eq!(kind(":nth-child()"), DiagnosticKind::InvalidNth);
    assert_eq!(kind(":nth-child(2n+)"), DiagnosticKind::InvalidNth);
    assert_eq!(kind("[attr=/(/]"), DiagnosticKind::InvalidRegex);
    assert_eq!(kind("[attr=]"), DiagnosticKind::ExpectedValue);
}

#[test]
fn lexical_errors() {
    assert!(matches!(parse_error("Foo#id"), Error::Lex(_)));
    assert_eq!(kind("Foo#id"), DiagnosticKind::UnexpectedCharacter);
    assert_eq!(kind(r#"[attr="x]"#), DiagnosticKind::UnterminatedString);
    assert_eq!(kind("[attr=/x]"), DiagnosticKind::UnterminatedRegex);
}

#[test]
fn recursion_limit() {
    let names = names();
    let resolve_element = |n: &str| names.element(n);
    let resolve_attr = |n: &str| names.attr(n);

    let err = Parser::new(":is(:not(:has(Foo)))", &resolve_element, &resolve_attr)
        .with_recursion_limit(Some(2))
        .parse()
        .unwrap_err();
    assert_eq!(err, Error::RecursionLimitExceeded(2));
    assert_eq!(err.to_string(), "selector nesting exceeds the limit of 2");

    let lists = Parser::new(":is(:not(Foo))", &resolve_element, &resolve_attr)
        .with_recursion_limit(Some(2))
        .parse()
        .unwrap();
    assert_eq!(lists.len(), 1);
}

#[test]
fn error_renders_source() {
    let err = parse_error("Foo > Qux");
    let diagnostic = err.diagnostic().unwrap();
    insta::assert_snapshot!(diagnostic.render(), @r"
    error: unknown element `Qux`
      |
    1 | Foo > Qux
      |       ^^^
    ");
    assert_eq!(err.to_string(), "unknown element `Qux` at 6");
}
