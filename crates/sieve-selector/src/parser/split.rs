//! Comma splitting that respects nesting, for reporting per-selector errors.

/// Splits `input` on commas outside `()`, `[]`, `{}` and quotes.
///
/// Pieces are trimmed; empty pieces are dropped. The input is not validated,
/// so unbalanced brackets simply keep the remainder in one piece.
pub fn split_top_level_selectors(input: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in input.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                push_piece(&mut pieces, &input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_piece(&mut pieces, &input[start..]);

    pieces
}

fn push_piece(pieces: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        pieces.push(piece.to_owned());
    }
}
