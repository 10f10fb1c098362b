//! # srcrange
//!
//! A build-once, read-many index mapping a (file path, source line) pair to
//! the innermost syntactic element whose declaration encloses that line.
//! Given a structure tree of declarations with line spans, the index answers
//! "what is declared at this line?" with the most specific entity (a method
//! rather than its enclosing class) in one binary search per nesting level.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! index    → FileIndex, SourceRangeIndex (build, find, count, consistency check)
//!   ↓
//! ranges   → Range, SortedRangeSet (sorted non-overlapping sets, nesting)
//!   ↓
//! tree     → SourceTree (the boundary to the external structure tree)
//!   ↓
//! span     → LineSpan (half-open [start, end) line intervals)
//! error    → IndexError
//! ```
//!
//! ## Usage
//!
//! Implement [`SourceTree`] for whatever holds your declarations, then:
//!
//! ```ignore
//! let index = SourceRangeIndex::from_tree(&tree)?;
//! let entity = index.find("src/vehicle.rs", 42);
//! ```
//!
//! Nesting is discovered during the build: an entity whose span lies inside
//! an already-indexed span becomes a child of that range, and any pair of
//! declarations whose spans partially overlap is reported as an
//! [`IndexError::Overlap`].

/// Errors reported during index construction.
pub mod error;

/// The facade: per-file partitions, build, lookup, consistency check.
pub mod index;

/// Sorted non-overlapping range sets and nesting.
pub mod ranges;

/// Half-open line intervals.
pub mod span;

/// The collaborator boundary to the external structure tree.
pub mod tree;

pub use error::IndexError;
pub use index::{FileIndex, SourceRangeIndex};
pub use ranges::{Range, SortedRangeSet};
pub use span::LineSpan;
pub use tree::SourceTree;
