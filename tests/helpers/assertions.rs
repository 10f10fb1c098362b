//! Structural assertions over a built index.

use srcrange::{Range, SortedRangeSet, SourceRangeIndex};
use std::fmt::Debug;

/// Assert the non-overlap and containment invariants for every range set
/// reachable in the index: adjacent siblings are ordered with no shared
/// lines, and every child lies entirely inside its parent.
pub fn assert_well_formed<E: Debug>(index: &SourceRangeIndex<E>) {
    for path in index.files() {
        let file = index.file(path).expect("listed file must resolve");
        assert_set_well_formed(file.ranges(), path);
    }
}

fn assert_set_well_formed<E: Debug>(set: &SortedRangeSet<E>, path: &str) {
    let ranges: Vec<&Range<E>> = set.iter().collect();
    for pair in ranges.windows(2) {
        assert!(
            pair[0].span().end <= pair[1].span().start,
            "siblings overlap in {path}: {} of {:?} and {} of {:?}",
            pair[0].span(),
            pair[0].owner(),
            pair[1].span(),
            pair[1].owner()
        );
    }
    for range in ranges {
        for child in range.children() {
            assert!(
                range.span().contains_span(child.span()),
                "child {} of {:?} escapes parent {} in {path}",
                child.span(),
                child.owner(),
                range.span()
            );
        }
        assert_set_well_formed(range.children(), path);
    }
}
