//! The `An+B` argument of `:nth-child`.
//!
//! Grammar (whitespace already removed): `-? digits ( n ( [+-] digits )? )?`.
//! A plain number is a 1-based position and is stored 0-based. The `n` form is
//! stored as written: `2n+1` selects 0-based indices `2*i + 1` for `i >= 0`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nth {
    pub step: i64,
    pub offset: i64,
    pub repeat: bool,
}

pub fn parse_nth(text: &str) -> Option<Nth> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    let rest = &rest[digits_end..];

    if rest.is_empty() {
        return Some(Nth {
            step: 0,
            offset: value.checked_sub(1)?,
            repeat: false,
        });
    }

    let rest = rest.strip_prefix('n')?;
    if rest.is_empty() {
        return Some(Nth {
            step: value,
            offset: 0,
            repeat: true,
        });
    }

    let (sign, digits) = if let Some(digits) = rest.strip_prefix('+') {
        (1, digits)
    } else if let Some(digits) = rest.strip_prefix('-') {
        (-1, digits)
    } else {
        return None;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let offset: i64 = digits.parse().ok()?;

    Some(Nth {
        step: value,
        offset: sign * offset,
        repeat: true,
    })
}
