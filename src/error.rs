//! Error types for index construction.

use thiserror::Error;

use crate::span::LineSpan;

/// Errors that can occur while building a source-range index.
///
/// Only genuinely inconsistent input produces an error: two declarations in
/// the same file whose line spans partially overlap, which cannot happen for
/// well-formed nested syntax. Lookup misses and failed consistency checks are
/// ordinary negative results, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Two ranges at the same nesting level share lines without one
    /// containing the other.
    #[error(
        "range {incoming} of {incoming_owner} partially overlaps \
         range {existing} of {existing_owner}"
    )]
    Overlap {
        /// Span already present in the set.
        existing: LineSpan,
        /// Owner of the existing span, rendered for reporting.
        existing_owner: String,
        /// Span that failed to insert.
        incoming: LineSpan,
        /// Owner of the incoming span, rendered for reporting.
        incoming_owner: String,
    },
}
