use std::cell::Cell;

use sieve_core::NodeId;

use super::SubtreeCache;

#[test]
fn searches_once_per_node() {
    let cache = SubtreeCache::new();
    let searches = Cell::new(0);
    let search = |result: bool| {
        searches.set(searches.get() + 1);
        result
    };

    assert!(cache.get_or_search(NodeId::new(1), || search(true)));
    assert!(cache.get_or_search(NodeId::new(1), || search(false)));
    assert!(!cache.get_or_search(NodeId::new(2), || search(false)));
    assert!(!cache.get_or_search(NodeId::new(2), || search(true)));

    assert_eq!(searches.get(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn search_may_reenter() {
    let cache = SubtreeCache::new();
    let outer = cache.get_or_search(NodeId::new(1), || {
        cache.get_or_search(NodeId::new(2), || true)
    });
    assert!(outer);
    assert_eq!(cache.len(), 2);
}
