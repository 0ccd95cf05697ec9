use super::nth::{Nth, parse_nth};

fn nth(step: i64, offset: i64, repeat: bool) -> Option<Nth> {
    Some(Nth {
        step,
        offset,
        repeat,
    })
}

#[test]
fn literal_position_is_zero_based() {
    assert_eq!(parse_nth("1"), nth(0, 0, false));
    assert_eq!(parse_nth("2"), nth(0, 1, false));
    assert_eq!(parse_nth("10"), nth(0, 9, false));
}

#[test]
fn step_forms() {
    assert_eq!(parse_nth("2n"), nth(2, 0, true));
    assert_eq!(parse_nth("2n+1"), nth(2, 1, true));
    assert_eq!(parse_nth("3n-2"), nth(3, -2, true));
    assert_eq!(parse_nth("-1n+3"), nth(-1, 3, true));
    assert_eq!(parse_nth("0n+4"), nth(0, 4, true));
}

#[test]
fn rejects_malformed() {
    assert_eq!(parse_nth(""), None);
    assert_eq!(parse_nth("n"), None);
    assert_eq!(parse_nth("-n+1"), None);
    assert_eq!(parse_nth("2n+"), None);
    assert_eq!(parse_nth("2n1"), None);
    assert_eq!(parse_nth("2x"), None);
    assert_eq!(parse_nth("odd"), None);
    assert_eq!(parse_nth("2n+1+1"), None);
    assert_eq!(parse_nth("99999999999999999999"), None);
}
