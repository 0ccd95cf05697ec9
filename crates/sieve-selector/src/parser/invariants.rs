//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::lexer::TokenKind;

impl Parser<'_, '_> {
    #[inline]
    pub(super) fn assert_current(&self, expected: TokenKind) {
        let current = self.lexer.token().kind;
        assert_eq!(
            current, expected,
            "broken parser invariant: expected {:?} but found {:?} (upstream caller's responsibility)",
            expected, current,
        );
    }
}
