//! Selector diagnostics: what went wrong, where, and how to show it.

mod printer;


use std::fmt;
use std::ops::Range;

pub use printer::DiagnosticPrinter;

/// Byte range into the selector source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Diagnostic kinds, lexical ones first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexer
    UnterminatedString,
    UnterminatedRegex,
    UnexpectedCharacter,

    // Structure
    UnexpectedToken,
    UnclosedBracket,
    UnclosedParen,
    UnmatchedParen,
    EmptySelector,
    ExpectedSelector,
    ExpectedValue,
    MultipleSelectors,

    // Names
    UnknownElement,
    UnknownAttribute,
    UnknownPseudoClass,

    // Values
    InvalidOperator,
    InvalidNth,
    InvalidRegex,
}

impl DiagnosticKind {
    pub fn is_lex_error(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedString | Self::UnterminatedRegex | Self::UnexpectedCharacter
        )
    }

    /// Base message, used when the call site has nothing more specific to say.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string literal",
            Self::UnterminatedRegex => "unterminated regex literal",
            Self::UnexpectedCharacter => "unexpected character",

            Self::UnexpectedToken => "unexpected token",
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedParen => "missing closing `)`",
            Self::UnmatchedParen => "unmatched `)`",
            Self::EmptySelector => "empty selector",
            Self::ExpectedSelector => "expected a selector after the combinator",
            Self::ExpectedValue => "expected a value to compare against",
            Self::MultipleSelectors => "multiple selector arguments not supported here",

            Self::UnknownElement => "unknown element",
            Self::UnknownAttribute => "unknown attribute",
            Self::UnknownPseudoClass => "unknown pseudo-class",

            Self::InvalidOperator => "invalid operator",
            Self::InvalidNth => "invalid `An+B` expression",
            Self::InvalidRegex => "invalid regular expression",
        }
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::MultipleSelectors => Some("`:nth-child(.. of ..)` takes a single selector"),
            Self::InvalidNth => Some("e.g., `2`, `2n`, `2n+1`, `-1n+3`"),
            Self::InvalidOperator => Some("combinators are `>`, `+`, `~`, or whitespace"),
            _ => None,
        }
    }
}

/// A single selector error, carrying enough context to render itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    span: Span,
    message: String,
    source: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, source: &str) -> Self {
        Self {
            kind,
            span,
            message: kind.fallback_message().to_owned(),
            source: source.to_owned(),
        }
    }

    /// Overrides the default message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.kind.default_hint()
    }

    pub fn printer(&self) -> DiagnosticPrinter<'_> {
        DiagnosticPrinter::new(self)
    }

    /// Caret-pointing rendering of the source, uncolored.
    pub fn render(&self) -> String {
        self.printer().render()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span.start)
    }
}
