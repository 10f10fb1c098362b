//! Build traversal tests: nesting discovery, skip policy, conflicts.

use srcrange::{IndexError, LineSpan, SourceRangeIndex};

use crate::helpers::assertions::assert_well_formed;
use crate::helpers::tree_fixture::FixtureTree;

#[test]
fn test_nested_declaration_becomes_child() {
    let mut tree = FixtureTree::new();
    let class = tree.root("Car", Some("Car.java"), Some(LineSpan::new(0, 20)));
    tree.decl(class, "drive", "Car.java", 5, 10);

    let index = SourceRangeIndex::from_tree(&tree).unwrap();

    assert_eq!(index.count(), 2);
    let file = index.file("Car.java").unwrap();
    // One top-level range; the method nests inside it.
    assert_eq!(file.ranges().len(), 1);
    let class_range = file.ranges().iter().next().unwrap();
    assert_eq!(class_range.children().len(), 1);
    assert_well_formed(&index);
}

#[test]
fn test_partial_overlap_aborts_build() {
    let mut tree = FixtureTree::new();
    tree.root("First", Some("a.java"), Some(LineSpan::new(0, 10)));
    tree.root("Second", Some("a.java"), Some(LineSpan::new(5, 15)));

    let err = SourceRangeIndex::from_tree(&tree).unwrap_err();
    let IndexError::Overlap {
        existing, incoming, ..
    } = err;
    assert_eq!(existing, LineSpan::new(0, 10));
    assert_eq!(incoming, LineSpan::new(5, 15));
}

#[test]
fn test_overlap_error_names_both_owners() {
    let mut tree = FixtureTree::new();
    tree.root("First", Some("a.java"), Some(LineSpan::new(0, 10)));
    tree.root("Second", Some("a.java"), Some(LineSpan::new(5, 15)));

    let err = SourceRangeIndex::from_tree(&tree).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("[0..10)"), "got: {message}");
    assert!(message.contains("[5..15)"), "got: {message}");
}

#[test]
fn test_lossy_build_skips_conflict_and_continues() {
    let mut tree = FixtureTree::new();
    tree.root("First", Some("a.java"), Some(LineSpan::new(0, 10)));
    let bad = tree.root("Second", Some("a.java"), Some(LineSpan::new(5, 15)));
    // The conflicting entity's subtree is still visited.
    tree.decl(bad, "inner", "a.java", 100, 110);
    tree.root("Third", Some("a.java"), Some(LineSpan::new(20, 30)));

    let (index, conflicts) = SourceRangeIndex::from_tree_lossy(&tree);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(index.count(), 3);
    assert!(index.find("a.java", 7).is_some()); // still the first entity
    assert!(index.find("a.java", 105).is_some());
    assert!(index.find("a.java", 25).is_some());
    assert_well_formed(&index);
}

#[test]
fn test_entity_without_key_is_skipped() {
    let mut tree = FixtureTree::new();
    // A synthetic root with no declaring file; its child is real.
    let root = tree.root("synthetic", None, Some(LineSpan::new(0, 100)));
    tree.decl(root, "Car", "Car.java", 0, 20);

    let index = SourceRangeIndex::from_tree(&tree).unwrap();

    assert_eq!(index.count(), 1);
    assert_eq!(index.files().collect::<Vec<_>>(), vec!["Car.java"]);
}

#[test]
fn test_entity_with_empty_key_is_skipped() {
    let mut tree = FixtureTree::new();
    tree.root("broken", Some(""), Some(LineSpan::new(0, 10)));

    let index = SourceRangeIndex::from_tree(&tree).unwrap();

    assert!(index.is_empty());
    assert_eq!(index.count(), 0);
}

#[test]
fn test_entity_without_range_is_skipped_but_children_are_indexed() {
    let mut tree = FixtureTree::new();
    let package = tree.root("pkg", Some("Car.java"), None);
    let class = tree.child(package, "Car", Some("Car.java"), Some(LineSpan::new(0, 20)));
    tree.decl(class, "drive", "Car.java", 5, 10);

    let index = SourceRangeIndex::from_tree(&tree).unwrap();

    // The package is invisible; the class is a top-level range.
    assert_eq!(index.count(), 2);
    assert_eq!(index.file("Car.java").unwrap().ranges().len(), 1);
}

#[test]
fn test_build_is_idempotent() {
    let mut tree = FixtureTree::new();
    let class = tree.root("Car", Some("Car.java"), Some(LineSpan::new(0, 40)));
    tree.decl(class, "drive", "Car.java", 5, 10);
    tree.decl(class, "brake", "Car.java", 12, 20);
    tree.root("Util", Some("Util.java"), Some(LineSpan::new(0, 15)));

    let first = SourceRangeIndex::from_tree(&tree).unwrap();
    let second = SourceRangeIndex::from_tree(&tree).unwrap();

    assert_eq!(first.count(), second.count());
    for path in ["Car.java", "Util.java", "missing.java"] {
        for line in 0..45 {
            assert_eq!(
                first.find(path, line),
                second.find(path, line),
                "diverging answer at {path}:{line}"
            );
        }
    }
}

#[test]
fn test_files_partition_independently() {
    let mut tree = FixtureTree::new();
    let a = tree.root("A", Some("a.java"), Some(LineSpan::new(0, 10)));
    let b = tree.root("B", Some("b.java"), Some(LineSpan::new(0, 10)));

    let index = SourceRangeIndex::from_tree(&tree).unwrap();

    assert_eq!(index.find("a.java", 5), Some(&a));
    assert_eq!(index.find("b.java", 5), Some(&b));
    assert_eq!(index.files().count(), 2);
}

#[test]
fn test_larger_tree_keeps_invariants() {
    let mut tree = FixtureTree::new();
    for (file, base) in [("a.java", 0), ("b.java", 100), ("c.java", 0)] {
        let class = tree.root(file, Some(file), Some(LineSpan::new(base, base + 90)));
        for m in 0..4 {
            let start = base + 10 + m * 20;
            let method = tree.decl(class, "method", file, start, start + 15);
            tree.decl(method, "block", file, start + 2, start + 6);
        }
    }

    let index = SourceRangeIndex::from_tree(&tree).unwrap();

    assert_eq!(index.count(), 3 * (1 + 4 * 2));
    assert_well_formed(&index);
}
