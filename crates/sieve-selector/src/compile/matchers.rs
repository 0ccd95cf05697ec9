//! One matcher constructor per selector node.
//!
//! Every constructor takes the continuation `next` (the matcher built from
//! the nodes to its left) and returns a matcher that checks its own node and
//! then hands the appropriate node to `next`. Evaluation therefore starts at
//! the rightmost compound and walks outwards.

use sieve_core::{AttrId, MatchContext, Matcher, NodeId, TypeId, Value};

use super::cache::SubtreeCache;
use crate::parser::{Combinator, CompareOp, Literal};

pub(super) fn element(id: Option<TypeId>, wildcard: bool, next: Matcher) -> Matcher {
    if wildcard {
        return next;
    }
    let Some(expected) = id.filter(|id| !id.is_none()) else {
        return never();
    };
    Matcher::new(move |ctx, node| {
        !node.is_none() && ctx.node_type(node) == expected && next.matches(ctx, node)
    })
}

pub(super) fn relation(op: Combinator, next: Matcher) -> Matcher {
    match op {
        Combinator::Descendant => Matcher::new(move |ctx, node| {
            let mut current = ctx.parent(node);
            while !current.is_none() {
                if next.matches(ctx, current) {
                    return true;
                }
                current = ctx.parent(current);
            }
            false
        }),
        Combinator::Child => Matcher::new(move |ctx, node| {
            let parent = ctx.parent(node);
            !parent.is_none() && next.matches(ctx, parent)
        }),
        Combinator::Adjacent => Matcher::new(move |ctx, node| {
            let siblings = ctx.siblings(node);
            match position(siblings, node) {
                Some(index) if index > 0 => next.matches(ctx, siblings[index - 1]),
                _ => false,
            }
        }),
        Combinator::Following => Matcher::new(move |ctx, node| {
            let siblings = ctx.siblings(node);
            let Some(index) = position(siblings, node) else {
                return false;
            };
            siblings[..index]
                .iter()
                .rev()
                .any(|&earlier| next.matches(ctx, earlier))
        }),
    }
}

/// `.a.b`: `node` is the `b` field of its parent, which is the `a` field of
/// its own parent. `next` then runs on that outermost ancestor.
pub(super) fn field(path: Vec<AttrId>, next: Matcher) -> Matcher {
    Matcher::new(move |ctx, node| {
        let mut child = node;
        for &name in path.iter().rev() {
            let parent = ctx.parent(child);
            if parent.is_none() || ctx.field(parent, name) != child {
                return false;
            }
            child = parent;
        }
        next.matches(ctx, child)
    })
}

pub(super) fn attr_exists(path: Vec<AttrId>, next: Matcher) -> Matcher {
    Matcher::new(move |ctx, node| {
        matches!(ctx.attr_path_value(node, &path, 0), Ok(value) if !value.is_undefined())
            && next.matches(ctx, node)
    })
}

pub(super) fn attr_binary(
    path: Vec<AttrId>,
    op: CompareOp,
    expected: Literal,
    next: Matcher,
) -> Matcher {
    Matcher::new(move |ctx, node| {
        let Ok(actual) = ctx.attr_path_value(node, &path, 0) else {
            return false;
        };
        compare(op, &expected, &actual) && next.matches(ctx, node)
    })
}

pub(super) fn first_child(next: Matcher) -> Matcher {
    Matcher::new(move |ctx, node| {
        let parent = ctx.parent(node);
        !parent.is_none() && ctx.first_child(parent) == node && next.matches(ctx, node)
    })
}

pub(super) fn last_child(next: Matcher) -> Matcher {
    Matcher::new(move |ctx, node| {
        let parent = ctx.parent(node);
        !parent.is_none() && ctx.last_child(parent) == node && next.matches(ctx, node)
    })
}

pub(super) fn nth_child(
    step: i64,
    offset: i64,
    repeat: bool,
    of: Option<Matcher>,
    next: Matcher,
) -> Matcher {
    Matcher::new(move |ctx, node| {
        let Some(index) = position(ctx.siblings(node), node) else {
            return false;
        };
        let Ok(index) = i64::try_from(index) else {
            return false;
        };
        let hit = if repeat {
            in_progression(step, offset, index)
        } else {
            index == offset
        };
        hit && of.as_ref().is_none_or(|of| of.matches(ctx, node)) && next.matches(ctx, node)
    })
}

/// Whether `index == step * i + offset` for some `i >= 0`.
///
/// Closed form of walking `i = 0, 1, 2, ..`: with a positive step the walk
/// passes `index` once `step * i + offset` exceeds it, with a negative step it
/// only reaches indices at or below `offset`.
pub(super) fn in_progression(step: i64, offset: i64, index: i64) -> bool {
    let Some(distance) = index.checked_sub(offset) else {
        return false;
    };
    if step == 0 {
        return distance == 0;
    }
    distance.checked_rem(step) == Some(0) && distance.checked_div(step).is_some_and(|i| i >= 0)
}

pub(super) fn is(alternatives: Vec<Matcher>, next: Matcher) -> Matcher {
    Matcher::new(move |ctx, node| {
        alternatives.iter().any(|m| m.matches(ctx, node)) && next.matches(ctx, node)
    })
}

pub(super) fn has(alternatives: Vec<Matcher>, next: Matcher) -> Matcher {
    let cache = SubtreeCache::new();
    Matcher::new(move |ctx, node| {
        next.matches(ctx, node) && subtree_contains(&cache, &alternatives, ctx, node)
    })
}

/// Negated subtree search: no descendant of `node` matches any alternative.
pub(super) fn not(alternatives: Vec<Matcher>, next: Matcher) -> Matcher {
    let cache = SubtreeCache::new();
    Matcher::new(move |ctx, node| {
        next.matches(ctx, node) && !subtree_contains(&cache, &alternatives, ctx, node)
    })
}

fn subtree_contains(
    cache: &SubtreeCache,
    alternatives: &[Matcher],
    ctx: &dyn MatchContext,
    node: NodeId,
) -> bool {
    cache.get_or_search(node, || ctx.sub_select(alternatives, node))
}

fn never() -> Matcher {
    Matcher::new(|_, _| false)
}

fn position(siblings: &[NodeId], node: NodeId) -> Option<usize> {
    siblings.iter().position(|&sibling| sibling == node)
}

fn compare(op: CompareOp, expected: &Literal, actual: &Value<'_>) -> bool {
    match op {
        CompareOp::Eq => equals(expected, actual),
        CompareOp::NotEq => !equals(expected, actual),
        CompareOp::Gt => ordering(expected, actual).is_some_and(|ord| ord.is_gt()),
        CompareOp::Gte => ordering(expected, actual).is_some_and(|ord| ord.is_ge()),
        CompareOp::Lt => ordering(expected, actual).is_some_and(|ord| ord.is_lt()),
        CompareOp::Lte => ordering(expected, actual).is_some_and(|ord| ord.is_le()),
    }
}

/// Strict equality; a regex tests string values only.
fn equals(expected: &Literal, actual: &Value<'_>) -> bool {
    match (expected, actual) {
        (Literal::Bool(e), Value::Bool(a)) => e == a,
        (Literal::Null, Value::Null) => true,
        (Literal::Undefined, Value::Undefined) => true,
        (Literal::Number(e), Value::Number(a)) => e == a,
        (Literal::BigInt(e), Value::BigInt(a)) => e == a,
        (Literal::String(e), Value::Str(a)) => e == a,
        (Literal::Regex(re), Value::Str(a)) => re.is_match(a),
        _ => false,
    }
}

/// `actual` relative to `expected`, when both are numbers of the same kind.
fn ordering(expected: &Literal, actual: &Value<'_>) -> Option<std::cmp::Ordering> {
    match (expected, actual) {
        (Literal::Number(e), Value::Number(a)) => a.partial_cmp(e),
        (Literal::BigInt(e), Value::BigInt(a)) => Some(a.cmp(e)),
        _ => None,
    }
}
