//! Sorted, non-overlapping range sets: the engine behind the index.
//!
//! A [`SortedRangeSet`] keeps [`Range`]s ordered by start line with no two
//! ranges sharing a line. The same type is used at every nesting level: the
//! top level of a file and the children of each range are all plain sets.
//! Nesting is discovered at insertion time. When a new range lands inside
//! an existing one, the insert recurses into that range's children, so the
//! containment hierarchy emerges from a flat stream of spans without any
//! precomputed parent information.
//!
//! Both insertion and point lookup locate their position with one binary
//! search over the sorted backing `Vec` per nesting level.

use std::cmp::Ordering;
use std::fmt;
use std::slice;

use tracing::trace;

use crate::error::IndexError;
use crate::span::LineSpan;

/// A declaration's line span, its owning entity, and the ranges nested
/// inside it.
///
/// Ranges are created once at insertion and only ever mutated to receive
/// children. The owner is a non-owning handle back into the external tree.
#[derive(Debug, Clone)]
pub struct Range<E> {
    span: LineSpan,
    owner: E,
    children: SortedRangeSet<E>,
}

impl<E> Range<E> {
    /// Create a leaf range for `owner` covering `span`.
    pub fn new(span: LineSpan, owner: E) -> Self {
        Self {
            span,
            owner,
            children: SortedRangeSet::new(),
        }
    }

    /// The lines this range covers.
    pub fn span(&self) -> LineSpan {
        self.span
    }

    /// The entity whose declaration this range represents.
    pub fn owner(&self) -> &E {
        &self.owner
    }

    /// Ranges nested directly inside this one.
    pub fn children(&self) -> &SortedRangeSet<E> {
        &self.children
    }
}

/// An ordered set of mutually non-overlapping ranges.
///
/// Invariant: ranges are sorted ascending by start line, and for any two
/// adjacent ranges A before B, `A.span().end <= B.span().start`.
#[derive(Debug, Clone)]
pub struct SortedRangeSet<E> {
    ranges: Vec<Range<E>>,
}

impl<E> Default for SortedRangeSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SortedRangeSet<E> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Number of ranges directly in this set (children not counted).
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if the set holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterate over the ranges directly in this set, in start order.
    pub fn iter(&self) -> slice::Iter<'_, Range<E>> {
        self.ranges.iter()
    }

    /// Total number of ranges in this set and all nested sets.
    pub fn count(&self) -> usize {
        self.ranges
            .iter()
            .map(|range| 1 + range.children.count())
            .sum()
    }

    /// Binary-search for the range containing `line`.
    ///
    /// `Ok(i)` means `ranges[i]` contains `line`; `Err(i)` is the position
    /// where a range starting at `line` would be inserted. A probed range
    /// sorts below the query when the query line is at or past its end, and
    /// above when the query line is before its start; anything else is a hit.
    fn locate(&self, line: u32) -> Result<usize, usize> {
        self.ranges.binary_search_by(|probed| {
            if probed.span.end <= line {
                Ordering::Less
            } else if line < probed.span.start {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
    }

    /// Insert a range, recursing into an existing range that contains it.
    ///
    /// Fails with [`IndexError::Overlap`] when the new range shares lines
    /// with an existing one without either containing the other. The set is
    /// unchanged on failure.
    pub fn insert(&mut self, range: Range<E>) -> Result<(), IndexError>
    where
        E: fmt::Debug,
    {
        match self.locate(range.span.start) {
            Ok(pos) => {
                let existing = &mut self.ranges[pos];
                if existing.span.contains_span(range.span) {
                    trace!(
                        "nesting {} under {} of {:?}",
                        range.span, existing.span, existing.owner
                    );
                    existing.children.insert(range)
                } else {
                    // The existing range covers the new start line but not
                    // the whole span, so the two declarations interleave.
                    Err(overlap(existing, &range))
                }
            }
            Err(pos) => {
                // The left neighbor cannot overlap: locate missed, so its
                // end is at or before the new start line. Only the right
                // neighbor can still collide.
                if let Some(next) = self.ranges.get(pos) {
                    if next.span.start < range.span.end {
                        return Err(overlap(next, &range));
                    }
                }
                self.ranges.insert(pos, range);
                Ok(())
            }
        }
    }

    /// Find the innermost range containing `line`.
    ///
    /// On a hit at this level the lookup recurses into the hit's children
    /// and prefers the deeper match, so the result is never an ancestor of
    /// another containing range. `None` is an ordinary miss.
    pub fn find(&self, line: u32) -> Option<&Range<E>> {
        let pos = self.locate(line).ok()?;
        let hit = &self.ranges[pos];
        hit.children.find(line).or(Some(hit))
    }
}

impl<'a, E> IntoIterator for &'a SortedRangeSet<E> {
    type Item = &'a Range<E>;
    type IntoIter = slice::Iter<'a, Range<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn overlap<E: fmt::Debug>(existing: &Range<E>, incoming: &Range<E>) -> IndexError {
    IndexError::Overlap {
        existing: existing.span,
        existing_owner: format!("{:?}", existing.owner),
        incoming: incoming.span,
        incoming_owner: format!("{:?}", incoming.owner),
    }
}
