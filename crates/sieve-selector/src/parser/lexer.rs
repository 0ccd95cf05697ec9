//! Lexer for the selector language.
//!
//! Logos recognizes the tokens; [`Lexer`] wraps it in a cursor that produces
//! one token at a time, with lookahead by cloning the underlying state.
//!
//! ## Whitespace
//!
//! A run of whitespace is a single `Space` token, except around operators:
//! `Op` absorbs its surrounding whitespace, so `A > B`, `A>B` and `A >B`
//! produce the same stream. `Space` is only significant to the parser as the
//! descendant combinator.

use logos::Logos;

use super::literal;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Span};
use crate::{Error, Result};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// One of `= != > >= < <= ~ + !`, with surrounding whitespace.
    /// Contiguous operator characters lex greedily; the parser validates them.
    #[regex(r"[ \t\r\n]*[+~>=<!]+[ \t\r\n]*")]
    Op,

    #[regex(r"[ \t\r\n]+")]
    Space,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(".")]
    Dot,

    #[token("-")]
    Minus,

    /// Contents are taken verbatim, no escapes.
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    String,

    /// Element names, attribute names, pseudo-class names, `*`, and raw
    /// operands such as `2n`.
    #[token("*")]
    #[regex(r"[A-Za-z0-9_][A-Za-z0-9_\-]*")]
    Word,

    // Produced only by `Lexer::read_value`
    Number,
    Bool,
    Null,
    Undefined,

    Eof,
}

impl TokenKind {
    /// Human-readable name for "expected X, found Y" messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Op => "operator",
            TokenKind::Space => "whitespace",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::ParenOpen => "`(`",
            TokenKind::ParenClose => "`)`",
            TokenKind::BracketOpen => "`[`",
            TokenKind::BracketClose => "`]`",
            TokenKind::Dot => "`.`",
            TokenKind::Minus => "`-`",
            TokenKind::String => "string",
            TokenKind::Word => "name",
            TokenKind::Number => "number",
            TokenKind::Bool => "boolean",
            TokenKind::Null => "`null`",
            TokenKind::Undefined => "`undefined`",
            TokenKind::Eof => "end of input",
        }
    }

    /// Classifies a raw attribute operand the way [`literal::coerce`] will read it.
    pub fn classify(raw: &str) -> TokenKind {
        match raw {
            "true" | "false" => TokenKind::Bool,
            "null" => TokenKind::Null,
            "undefined" => TokenKind::Undefined,
            _ if literal::is_quoted(raw) => TokenKind::String,
            _ if literal::is_number(raw) => TokenKind::Number,
            _ => TokenKind::Word,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    fn eof(offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: "",
            span: Span::empty(offset),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Operator text without the absorbed whitespace.
    pub fn op_text(&self) -> &'src str {
        self.text.trim()
    }
}

/// Token cursor over a selector source. Owned by exactly one parse.
#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
    token: Token<'src>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned before the first token; call [`next`](Self::next) to start.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            token: Token::eof(0),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// The current token.
    pub fn token(&self) -> Token<'src> {
        self.token
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.token.is(kind)
    }

    /// Byte offset just past the current token.
    pub fn position(&self) -> usize {
        self.token.span.end
    }

    /// Advances to the next token.
    pub fn next(&mut self) -> Result<()> {
        self.token = lex_one(self.source, &mut self.inner)?;
        Ok(())
    }

    /// The token after the current one, without consuming anything.
    pub fn peek(&self) -> Result<Token<'src>> {
        let mut ahead = self.inner.clone();
        lex_one(self.source, &mut ahead)
    }

    /// Fails unless the current token has `kind`.
    pub fn expect(&self, kind: TokenKind) -> Result<()> {
        if self.token.is(kind) {
            return Ok(());
        }
        let found = self.token.kind.describe();
        let message = format!("expected {}, found {found}", kind.describe());
        Err(Error::Parse(
            Diagnostic::new(DiagnosticKind::UnexpectedToken, self.token.span, self.source)
                .message(message),
        ))
    }

    /// Reads an attribute operand as one raw token, replacing the current token.
    ///
    /// Quoted strings and `/regex/flags` run to their closing delimiter; anything
    /// else runs to the next `]`. Surrounding whitespace is not part of the value.
    pub fn read_value(&mut self) -> Result<()> {
        let base = self.inner.span().end;
        let rest = self.inner.remainder();
        let leading = rest.len() - rest.trim_start_matches([' ', '\t', '\r', '\n']).len();
        let value = &rest[leading..];

        let len = match value.chars().next() {
            Some(quote @ ('"' | '\'')) => match value[1..].find(quote) {
                Some(close) => close + 2,
                None => {
                    return Err(self.lex_error(
                        DiagnosticKind::UnterminatedString,
                        Span::new(base + leading, base + rest.len()),
                    ));
                }
            },
            Some('/') => match regex_len(value) {
                Some(len) => len,
                None => {
                    return Err(self.lex_error(
                        DiagnosticKind::UnterminatedRegex,
                        Span::new(base + leading, base + rest.len()),
                    ));
                }
            },
            _ => {
                let raw = value.find(']').map_or(value, |end| &value[..end]);
                raw.trim_end().len()
            }
        };

        let start = base + leading;
        let text = &self.source[start..start + len];
        self.inner.bump(leading + len);
        self.token = Token {
            kind: TokenKind::classify(text),
            text,
            span: Span::new(start, start + len),
        };
        Ok(())
    }

    fn lex_error(&self, kind: DiagnosticKind, span: Span) -> Error {
        Error::Lex(Diagnostic::new(kind, span, self.source))
    }
}

fn lex_one<'src>(source: &'src str, inner: &mut logos::Lexer<'src, TokenKind>) -> Result<Token<'src>> {
    match inner.next() {
        None => Ok(Token::eof(source.len())),
        Some(Ok(kind)) => Ok(Token {
            kind,
            text: inner.slice(),
            span: inner.span().into(),
        }),
        Some(Err(())) => {
            let span: Span = inner.span().into();
            let kind = if matches!(inner.slice().chars().next(), Some('"' | '\'')) {
                DiagnosticKind::UnterminatedString
            } else {
                DiagnosticKind::UnexpectedCharacter
            };
            let span = match kind {
                DiagnosticKind::UnterminatedString => Span::new(span.start, source.len()),
                _ => span,
            };
            let found = &source[span.range()];
            let mut diagnostic = Diagnostic::new(kind, span, source);
            if kind == DiagnosticKind::UnexpectedCharacter {
                diagnostic = diagnostic.message(format!("unexpected character `{found}`"));
            }
            Err(Error::Lex(diagnostic))
        }
    }
}

/// Length of `/pattern/flags` at the start of `value`.
///
/// A `/` ends the pattern unless it is escaped or inside a `[...]` class.
fn regex_len(value: &str) -> Option<usize> {
    let mut escaped = false;
    let mut in_class = false;
    for (i, ch) in value.char_indices().skip(1) {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                let flags = value[i + 1..]
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(value.len() - i - 1);
                return Some(i + 1 + flags);
            }
            _ => {}
        }
    }
    None
}
