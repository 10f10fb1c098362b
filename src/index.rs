//! The index facade: per-file range partitions and the (path, line) lookup.
//!
//! [`SourceRangeIndex`] is built once from a [`SourceTree`] and is read-only
//! afterwards. It partitions ranges by grouping key (file path) into lazily
//! created [`FileIndex`]es and answers point queries with the innermost
//! declaration enclosing the queried line.
//!
//! Build is single-threaded; the built index contains no interior
//! mutability, so shared references may be queried from any number of
//! threads at once.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{trace, warn};

use crate::error::IndexError;
use crate::ranges::{Range, SortedRangeSet};
use crate::span::LineSpan;
use crate::tree::SourceTree;

// ============================================================================
// FILE INDEX
// ============================================================================

/// All ranges declared in one file.
///
/// A thin wrapper over the file's top-level [`SortedRangeSet`]; nesting below
/// the top level lives inside the ranges themselves.
#[derive(Debug, Clone)]
pub struct FileIndex<E> {
    ranges: SortedRangeSet<E>,
}

impl<E> FileIndex<E> {
    fn new() -> Self {
        Self {
            ranges: SortedRangeSet::new(),
        }
    }

    /// Insert a range for `owner`. Callers have already filtered out
    /// entities without a usable span; no filtering happens here.
    pub fn add(&mut self, owner: E, span: LineSpan) -> Result<(), IndexError>
    where
        E: fmt::Debug,
    {
        self.ranges.insert(Range::new(span, owner))
    }

    /// The entity of the innermost range containing `line`, if any.
    pub fn find(&self, line: u32) -> Option<&E> {
        self.ranges.find(line).map(Range::owner)
    }

    /// Total number of ranges in this file, at all nesting depths.
    pub fn count(&self) -> usize {
        self.ranges.count()
    }

    /// The file's top-level ranges.
    pub fn ranges(&self) -> &SortedRangeSet<E> {
        &self.ranges
    }
}

// ============================================================================
// SOURCE RANGE INDEX
// ============================================================================

/// Maps (file path, line) to the innermost entity declared at that line.
#[derive(Debug, Clone)]
pub struct SourceRangeIndex<E> {
    /// Per-file partitions, in first-encounter order so dumps and violation
    /// reports are deterministic.
    files: IndexMap<SmolStr, FileIndex<E>>,
}

impl<E: Clone + fmt::Debug> SourceRangeIndex<E> {
    /// Build an index from every entity reachable from the tree's roots.
    ///
    /// Entities without a grouping key or without a line range are skipped;
    /// an entity with a present-but-empty key is skipped with a warning,
    /// since an empty path is a data defect rather than expected absence.
    /// The first overlap conflict aborts the build.
    pub fn from_tree<T>(tree: &T) -> Result<Self, IndexError>
    where
        T: SourceTree<Entity = E>,
    {
        let mut index = Self {
            files: IndexMap::new(),
        };
        for entity in preorder(tree) {
            index.add_entity(tree, &entity)?;
        }
        Ok(index)
    }

    /// Build like [`from_tree`](Self::from_tree), but skip entities whose
    /// ranges conflict and keep going, returning the conflicts alongside the
    /// index. The subtree below a skipped entity is still visited.
    pub fn from_tree_lossy<T>(tree: &T) -> (Self, Vec<IndexError>)
    where
        T: SourceTree<Entity = E>,
    {
        let mut index = Self {
            files: IndexMap::new(),
        };
        let mut conflicts = Vec::new();
        for entity in preorder(tree) {
            if let Err(err) = index.add_entity(tree, &entity) {
                warn!("skipping conflicting entity: {err}");
                conflicts.push(err);
            }
        }
        (index, conflicts)
    }

    /// Insert one entity, skipping it when key or range is unusable.
    fn add_entity<T>(&mut self, tree: &T, entity: &E) -> Result<(), IndexError>
    where
        T: SourceTree<Entity = E>,
    {
        let Some(key) = tree.grouping_key(entity) else {
            return Ok(());
        };
        if key.is_empty() {
            warn!("entity {entity:?} has an empty grouping key; skipping");
            return Ok(());
        }
        let Some(span) = tree.line_range(entity) else {
            trace!("entity {entity:?} has no line range; skipping");
            return Ok(());
        };
        self.files
            .entry(key)
            .or_insert_with(FileIndex::new)
            .add(entity.clone(), span)
    }
}

impl<E> SourceRangeIndex<E> {
    /// The entity whose declaration most narrowly encloses `line` in the
    /// file at `path`. An unknown path is an ordinary miss.
    pub fn find(&self, path: &str, line: u32) -> Option<&E> {
        self.files.get(path)?.find(line)
    }

    /// Total number of ranges across all files and nesting depths.
    pub fn count(&self) -> usize {
        self.files.values().map(FileIndex::count).sum()
    }

    /// True if no entity contributed a range.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The grouping keys with at least one range, in first-encounter order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(SmolStr::as_str)
    }

    /// The per-file index for `path`, if any entity was declared there.
    pub fn file(&self, path: &str) -> Option<&FileIndex<E>> {
        self.files.get(path)
    }

    /// Check that range nesting is consistent with structural ancestry.
    ///
    /// `is_ancestor(a, b)` answers whether `a` is a strict ancestor of `b`
    /// in the external structure tree. For every range nested inside
    /// another, the enclosing range's owner must be an ancestor of the
    /// nested range's owner: an ancestor, not necessarily the immediate
    /// parent, because structural levels without line information are
    /// invisible to the range hierarchy.
    pub fn is_homomorphic<F>(&self, is_ancestor: F) -> bool
    where
        F: Fn(&E, &E) -> bool,
        E: Clone,
    {
        self.homomorphism_violations(is_ancestor).is_empty()
    }

    /// All `(enclosing owner, nested owner)` pairs whose range nesting is
    /// not backed by structural ancestry. Every violation is reported, not
    /// just the first.
    pub fn homomorphism_violations<F>(&self, is_ancestor: F) -> Vec<(E, E)>
    where
        F: Fn(&E, &E) -> bool,
        E: Clone,
    {
        let mut violations = Vec::new();
        for file in self.files.values() {
            for range in file.ranges() {
                collect_violations(range, &is_ancestor, &mut violations);
            }
        }
        violations
    }

    /// Render the whole index as an indented per-file tree, for diagnostics.
    pub fn dump(&self) -> String
    where
        E: fmt::Debug,
    {
        let mut out = String::new();
        for (path, file) in &self.files {
            out.push_str(&format!("{path} ({} ranges)\n", file.count()));
            for range in file.ranges() {
                dump_range(range, 1, &mut out);
            }
        }
        out
    }
}

/// Every entity reachable from the roots, parents before children.
fn preorder<T: SourceTree>(tree: &T) -> Vec<T::Entity> {
    let mut order = Vec::new();
    let mut stack = tree.roots();
    stack.reverse();
    while let Some(entity) = stack.pop() {
        let mut children = tree.children(&entity);
        children.reverse();
        stack.append(&mut children);
        order.push(entity);
    }
    order
}

fn collect_violations<E, F>(range: &Range<E>, is_ancestor: &F, violations: &mut Vec<(E, E)>)
where
    E: Clone,
    F: Fn(&E, &E) -> bool,
{
    for child in range.children() {
        if !is_ancestor(range.owner(), child.owner()) {
            violations.push((range.owner().clone(), child.owner().clone()));
        }
        collect_violations(child, is_ancestor, violations);
    }
}

fn dump_range<E: fmt::Debug>(range: &Range<E>, depth: usize, out: &mut String) {
    out.push_str(&format!(
        "{:indent$}{} {:?}\n",
        "",
        range.span(),
        range.owner(),
        indent = depth * 2
    ));
    for child in range.children() {
        dump_range(child, depth + 1, out);
    }
}
