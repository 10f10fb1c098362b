//! Line intervals for declarations.
//!
//! A [`LineSpan`] covers the source lines of one declaration as a half-open
//! interval `[start, end)`. End-exclusive bounds keep comparisons at shared
//! boundaries unambiguous: a declaration ending on line 9 and its successor
//! starting on line 10 are `[.., 10)` and `[10, ..)` and do not overlap.

use std::fmt;

/// A half-open interval of source lines `[start, end)`.
///
/// Line numbering (0-based or 1-based) is the caller's convention; the span
/// only requires that it is applied consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    /// First line of the declaration (inclusive).
    pub start: u32,
    /// First line after the declaration (exclusive).
    pub end: u32,
}

impl LineSpan {
    /// Create a span from an inclusive start and exclusive end line.
    ///
    /// # Panics
    ///
    /// Panics if `start >= end`. An empty or inverted span signals a defect
    /// in whatever produced the line numbers and is not recoverable here.
    pub fn new(start: u32, end: u32) -> Self {
        assert!(
            start < end,
            "line span must be non-empty: start {start} >= end {end}"
        );
        Self { start, end }
    }

    /// Create a span from inclusive start and end lines.
    ///
    /// Converts to the exclusive convention, so a single-line declaration is
    /// `from_inclusive(line, line)` == `[line, line + 1)`.
    ///
    /// # Panics
    ///
    /// Panics if `end_inclusive < start`.
    pub fn from_inclusive(start: u32, end_inclusive: u32) -> Self {
        Self::new(start, end_inclusive + 1)
    }

    /// Number of lines covered.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check whether a line falls within this span.
    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line < self.end
    }

    /// Check whether `other` lies entirely within this span.
    pub fn contains_span(&self, other: LineSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check whether `other` shares at least one line with this span.
    pub fn overlaps(&self, other: LineSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}
