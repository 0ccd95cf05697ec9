//! Recursive-descent parser over the token cursor.
//!
//! Each nesting construct (`:is(..)`, `:has(..)`, `:not(..)`, the `of` clause
//! of `:nth-child`) recurses into [`Parser::parse_group`] or
//! [`Parser::parse_list`], so the Rust call stack plays the role of the frame
//! stack. Nesting depth is bounded by the recursion limit.
//!
//! No recovery: the first error aborts the parse.

use sieve_core::{AttrId, TypeId};
use tracing::trace;

use super::ast::{Combinator, CompareOp, Selector, SelectorList};
use super::lexer::{Lexer, Token, TokenKind};
use super::literal;
use super::nth::parse_nth;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Span};
use crate::{Error, Result};

/// Default bound on pseudo-class nesting.
pub const DEFAULT_RECURSION_LIMIT: u32 = 64;

pub type ResolveElement<'r> = dyn Fn(&str) -> Option<TypeId> + 'r;
pub type ResolveAttr<'r> = dyn Fn(&str) -> Option<AttrId> + 'r;

pub struct Parser<'src, 'r> {
    pub(super) lexer: Lexer<'src>,
    resolve_element: &'r ResolveElement<'r>,
    resolve_attr: &'r ResolveAttr<'r>,
    depth: u32,
    recursion_limit: Option<u32>,
}

impl<'src, 'r> Parser<'src, 'r> {
    pub fn new(
        source: &'src str,
        resolve_element: &'r ResolveElement<'r>,
        resolve_attr: &'r ResolveAttr<'r>,
    ) -> Self {
        Self {
            lexer: Lexer::new(source),
            resolve_element,
            resolve_attr,
            depth: 0,
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }

    /// Caps nesting of selector arguments. `None` removes the cap.
    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Parses the whole input as a comma-separated group.
    pub fn parse(mut self) -> Result<Vec<SelectorList>> {
        self.lexer.next()?;
        self.parse_group(None)
    }

    /// Alternatives up to `)` (when nested) or end of input.
    ///
    /// Leaves a closing `)` as the current token for the caller to consume.
    fn parse_group(&mut self, open: Option<Span>) -> Result<Vec<SelectorList>> {
        let mut lists = Vec::new();
        loop {
            lists.push(self.parse_list()?);

            let token = self.lexer.token();
            match token.kind {
                TokenKind::Comma => self.lexer.next()?,
                TokenKind::ParenClose => {
                    if open.is_none() {
                        return Err(self.error(DiagnosticKind::UnmatchedParen, token.span));
                    }
                    return Ok(lists);
                }
                TokenKind::Eof => {
                    if let Some(open) = open {
                        return Err(self.error(DiagnosticKind::UnclosedParen, open));
                    }
                    return Ok(lists);
                }
                _ => return Err(self.unexpected(token, "`,`")),
            }
        }
    }

    /// One selector: compounds joined by combinators, up to `,`, `)` or end of input.
    fn parse_list(&mut self) -> Result<SelectorList> {
        self.skip_space()?;
        let start = self.lexer.token().span.start;
        let mut nodes: Vec<Selector> = Vec::new();

        loop {
            let token = self.lexer.token();
            match token.kind {
                TokenKind::Eof | TokenKind::Comma | TokenKind::ParenClose => break,
                TokenKind::Word => {
                    nodes.push(self.parse_element(token)?);
                    self.lexer.next()?;
                }
                TokenKind::Space => {
                    self.lexer.next()?;
                    if self.starts_descendant(&nodes)? {
                        trace!(op = ?Combinator::Descendant, "relation");
                        nodes.push(Selector::Relation {
                            op: Combinator::Descendant,
                        });
                    }
                }
                TokenKind::BracketOpen => nodes.push(self.parse_attr()?),
                TokenKind::Dot => nodes.push(self.parse_field()?),
                TokenKind::Colon => nodes.push(self.parse_pseudo()?),
                TokenKind::Op => {
                    let op = self.parse_combinator(token, &nodes)?;
                    trace!(?op, "relation");
                    nodes.push(Selector::Relation { op });
                    self.lexer.next()?;
                }
                _ => return Err(self.unexpected(token, "a selector")),
            }
        }

        let end = self.lexer.token();
        if nodes.is_empty() {
            return Err(self.error(DiagnosticKind::EmptySelector, end.span));
        }
        if nodes.last().is_some_and(Selector::is_relation) {
            return Err(self.error(DiagnosticKind::ExpectedSelector, end.span));
        }

        let text = &self.lexer.source()[start..end.span.start];
        let span = Span::new(start, start + text.trim_end().len());
        Ok(SelectorList::new(nodes, span))
    }

    /// Whitespace is a descendant combinator only between two compounds, and
    /// only when the next compound starts with a name or `:is`/`:where`/`:matches`.
    fn starts_descendant(&self, nodes: &[Selector]) -> Result<bool> {
        if nodes.last().is_none_or(Selector::is_relation) {
            return Ok(false);
        }
        let token = self.lexer.token();
        match token.kind {
            TokenKind::Word => Ok(true),
            TokenKind::Colon => {
                let name = self.lexer.peek()?;
                Ok(name.is(TokenKind::Word) && matches!(name.text, "is" | "where" | "matches"))
            }
            _ => Ok(false),
        }
    }

    fn parse_element(&self, token: Token<'src>) -> Result<Selector> {
        if token.text == "*" {
            return Ok(Selector::Element {
                id: None,
                wildcard: true,
            });
        }
        match (self.resolve_element)(token.text) {
            Some(id) => Ok(Selector::Element {
                id: Some(id),
                wildcard: false,
            }),
            None => Err(self.error_with(
                DiagnosticKind::UnknownElement,
                token.span,
                format!("unknown element `{}`", token.text),
            )),
        }
    }

    fn parse_combinator(&self, token: Token<'src>, nodes: &[Selector]) -> Result<Combinator> {
        let text = token.op_text();
        let op = match text {
            ">" => Combinator::Child,
            "+" => Combinator::Adjacent,
            "~" => Combinator::Following,
            _ => {
                return Err(self.error_with(
                    DiagnosticKind::InvalidOperator,
                    token.span,
                    format!("invalid operator `{text}`"),
                ));
            }
        };
        if nodes.last().is_none_or(Selector::is_relation) {
            return Err(self.error_with(
                DiagnosticKind::ExpectedSelector,
                token.span,
                format!("expected a selector before `{text}`"),
            ));
        }
        Ok(op)
    }

    /// `[path]` or `[path <op> value]`.
    fn parse_attr(&mut self) -> Result<Selector> {
        self.assert_current(TokenKind::BracketOpen);
        let open = self.lexer.token().span;
        self.lexer.next()?;
        self.skip_space()?;

        if self.lexer.at(TokenKind::Eof) {
            return Err(self.error(DiagnosticKind::UnclosedBracket, open));
        }
        let path = self.parse_path()?;
        self.skip_space()?;

        let token = self.lexer.token();
        if !token.is(TokenKind::Op) {
            self.close_bracket(open)?;
            return Ok(Selector::AttrExists { path });
        }

        let text = token.op_text();
        let Some(op) = CompareOp::from_text(text) else {
            return Err(self.error_with(
                DiagnosticKind::InvalidOperator,
                token.span,
                format!("invalid operator `{text}`"),
            ));
        };

        self.lexer.read_value()?;
        let raw = self.lexer.token();
        if raw.text.is_empty() {
            return Err(self.error(DiagnosticKind::ExpectedValue, raw.span));
        }
        let value = literal::coerce(raw.text).map_err(|err| {
            self.error_with(
                DiagnosticKind::InvalidRegex,
                raw.span,
                format!("invalid regular expression: {err}"),
            )
        })?;
        trace!(kind = ?raw.kind, text = raw.text, "attribute value");

        self.lexer.next()?;
        self.skip_space()?;
        self.close_bracket(open)?;
        Ok(Selector::AttrBinary { path, op, value })
    }

    fn close_bracket(&mut self, open: Span) -> Result<()> {
        let token = self.lexer.token();
        match token.kind {
            TokenKind::BracketClose => self.lexer.next(),
            TokenKind::Eof => Err(self.error(DiagnosticKind::UnclosedBracket, open)),
            _ => Err(self.unexpected(token, "`]`")),
        }
    }

    /// `.a.b` outside brackets.
    fn parse_field(&mut self) -> Result<Selector> {
        self.assert_current(TokenKind::Dot);
        self.lexer.next()?;
        let path = self.parse_path()?;
        Ok(Selector::Field { path })
    }

    /// Dot-separated attribute names; at least one.
    fn parse_path(&mut self) -> Result<Vec<AttrId>> {
        let mut path = vec![self.parse_attr_name()?];
        while self.lexer.at(TokenKind::Dot) {
            self.lexer.next()?;
            path.push(self.parse_attr_name()?);
        }
        Ok(path)
    }

    fn parse_attr_name(&mut self) -> Result<AttrId> {
        let token = self.lexer.token();
        self.lexer.expect(TokenKind::Word)?;
        let Some(id) = (self.resolve_attr)(token.text) else {
            return Err(self.error_with(
                DiagnosticKind::UnknownAttribute,
                token.span,
                format!("unknown attribute `{}`", token.text),
            ));
        };
        self.lexer.next()?;
        Ok(id)
    }

    fn parse_pseudo(&mut self) -> Result<Selector> {
        self.assert_current(TokenKind::Colon);
        let colon = self.lexer.token().span;
        self.lexer.next()?;

        let name = self.lexer.token();
        self.lexer.expect(TokenKind::Word)?;
        let span = colon.cover(name.span);
        self.lexer.next()?;

        match name.text {
            "first-child" => Ok(Selector::PseudoFirstChild),
            "last-child" => Ok(Selector::PseudoLastChild),
            "nth-child" => self.parse_nth_child(),
            "is" | "where" | "matches" => Ok(Selector::PseudoIs {
                alternatives: self.parse_arguments(name.text)?,
            }),
            "has" => Ok(Selector::PseudoHas {
                alternatives: self.parse_arguments(name.text)?,
            }),
            "not" => Ok(Selector::PseudoNot {
                alternatives: self.parse_arguments(name.text)?,
            }),
            other => Err(self.error_with(
                DiagnosticKind::UnknownPseudoClass,
                span,
                format!("unknown pseudo-class `:{other}`"),
            )),
        }
    }

    /// `( group )` after a selector-taking pseudo-class.
    fn parse_arguments(&mut self, name: &str) -> Result<Vec<SelectorList>> {
        self.lexer.expect(TokenKind::ParenOpen)?;
        let open = self.lexer.token().span;
        self.enter()?;
        trace!(pseudo = name, depth = self.depth, "open pseudo-class");
        self.lexer.next()?;

        let alternatives = self.parse_group(Some(open))?;
        self.assert_current(TokenKind::ParenClose);
        self.lexer.next()?;
        self.exit();
        Ok(alternatives)
    }

    /// `( An+B [of S] )`.
    fn parse_nth_child(&mut self) -> Result<Selector> {
        self.lexer.expect(TokenKind::ParenOpen)?;
        let open = self.lexer.token().span;
        self.lexer.next()?;

        let start = self.lexer.token().span.start;
        let mut text = String::new();
        loop {
            let token = self.lexer.token();
            match token.kind {
                TokenKind::Space => {}
                TokenKind::Word if token.text == "of" => break,
                TokenKind::Word | TokenKind::Op | TokenKind::Minus => {
                    text.push_str(token.op_text());
                }
                TokenKind::ParenClose | TokenKind::Eof => break,
                _ => return Err(self.error(DiagnosticKind::InvalidNth, token.span)),
            }
            self.lexer.next()?;
        }

        let argument = &self.lexer.source()[start..self.lexer.token().span.start];
        let argument_span = Span::new(start, start + argument.trim_end().len());
        let Some(nth) = parse_nth(&text) else {
            return Err(self.error_with(
                DiagnosticKind::InvalidNth,
                argument_span,
                format!("invalid `An+B` expression `{}`", argument.trim()),
            ));
        };

        // The argument loop only stops on a word at `of`.
        let of = if self.lexer.at(TokenKind::Word) {
            self.enter()?;
            trace!(pseudo = "nth-child", depth = self.depth, "open of clause");
            self.lexer.next()?;
            let list = self.parse_list()?;
            let token = self.lexer.token();
            if token.is(TokenKind::Comma) {
                return Err(self.error(DiagnosticKind::MultipleSelectors, token.span));
            }
            self.exit();
            Some(list)
        } else {
            None
        };

        let token = self.lexer.token();
        match token.kind {
            TokenKind::ParenClose => self.lexer.next()?,
            TokenKind::Eof => return Err(self.error(DiagnosticKind::UnclosedParen, open)),
            _ => return Err(self.unexpected(token, "`)`")),
        }

        Ok(Selector::PseudoNthChild {
            step: nth.step,
            step_offset: nth.offset,
            repeat: nth.repeat,
            of,
        })
    }

    fn skip_space(&mut self) -> Result<()> {
        while self.lexer.at(TokenKind::Space) {
            self.lexer.next()?;
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if let Some(limit) = self.recursion_limit
            && self.depth > limit
        {
            return Err(Error::RecursionLimitExceeded(limit));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    fn error(&self, kind: DiagnosticKind, span: Span) -> Error {
        Diagnostic::new(kind, span, self.lexer.source()).into()
    }

    fn error_with(&self, kind: DiagnosticKind, span: Span, message: String) -> Error {
        Diagnostic::new(kind, span, self.lexer.source())
            .message(message)
            .into()
    }

    fn unexpected(&self, token: Token<'src>, expected: &str) -> Error {
        self.error_with(
            DiagnosticKind::UnexpectedToken,
            token.span,
            format!("expected {expected}, found {}", token.kind.describe()),
        )
    }
}
