//! Coercion of raw attribute operands into typed literals.

use std::fmt;

use regex_automata::meta;
use regex_automata::util::syntax;

use super::ast::Literal;

pub type RegexError = Box<meta::BuildError>;

/// `/pattern/flags` literal compiled to an unanchored matcher.
///
/// Supported flags: `i` (case-insensitive), `m` (multi-line), `s` (dot matches
/// newline). Any other flag letter is accepted and has no effect.
#[derive(Clone)]
pub struct Regex {
    pattern: String,
    flags: String,
    inner: meta::Regex,
}

impl Regex {
    pub fn new(pattern: &str, flags: &str) -> Result<Self, RegexError> {
        let syntax = syntax::Config::new()
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'));
        let inner = meta::Regex::builder()
            .syntax(syntax)
            .build(pattern)
            .map_err(Box::new)?;
        Ok(Self {
            pattern: pattern.to_owned(),
            flags: flags.to_owned(),
            inner,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Whether the pattern matches anywhere in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.inner.is_match(haystack)
    }
}

impl PartialEq for Regex {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.flags == other.flags
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}

/// Reads a raw operand the way a selector author means it.
///
/// Keywords first, then quoted strings, regexes, numbers and `123n` big
/// integers. Anything else is kept as a bare string, so `[name=foo]` compares
/// against `"foo"`.
pub fn coerce(raw: &str) -> Result<Literal, RegexError> {
    let literal = match raw {
        "true" => Literal::Bool(true),
        "false" => Literal::Bool(false),
        "null" => Literal::Null,
        "undefined" => Literal::Undefined,
        _ if is_quoted(raw) => Literal::String(raw[1..raw.len() - 1].to_owned()),
        _ if raw.starts_with('/') => match raw.rfind('/') {
            Some(last) if last > 0 => Literal::Regex(Regex::new(&raw[1..last], &raw[last + 1..])?),
            _ => Literal::String(raw.to_owned()),
        },
        _ if is_number(raw) => match raw.parse::<f64>() {
            Ok(n) => Literal::Number(n),
            Err(_) => Literal::String(raw.to_owned()),
        },
        _ if is_bigint(raw) => match raw[..raw.len() - 1].parse::<i128>() {
            Ok(n) => Literal::BigInt(n),
            Err(_) => Literal::String(raw.to_owned()),
        },
        _ => Literal::String(raw.to_owned()),
    };
    Ok(literal)
}

pub fn is_quoted(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2
        && matches!(bytes[0], b'"' | b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
}

/// `-?digits(.digits)?`
pub fn is_number(raw: &str) -> bool {
    let unsigned = raw.strip_prefix('-').unwrap_or(raw);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    is_digits(int) && frac.is_none_or(is_digits)
}

/// `digits n`
fn is_bigint(raw: &str) -> bool {
    raw.strip_suffix('n').is_some_and(is_digits)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
