//! The collaborator boundary to the program-structure tree.
//!
//! The index never owns or copies the structure tree it is built from. It
//! sees the tree only through [`SourceTree`]: root enumeration, child
//! enumeration, and two per-entity accessors. Everything else about the tree
//! (entity payloads, ancestry, how the tree was produced) stays on the
//! caller's side of this trait.

use smol_str::SmolStr;

use crate::span::LineSpan;

/// Read access to an external tree of syntactic entities.
///
/// `Entity` is an opaque handle (an id, an index, an `Arc`, whatever the
/// tree uses); the index clones it freely and hands it back from lookups.
pub trait SourceTree {
    /// Opaque handle to one entity in the tree.
    type Entity: Clone;

    /// The root entities. Traversal starts here.
    fn roots(&self) -> Vec<Self::Entity>;

    /// Immediate children of an entity. The input must be acyclic; the
    /// index traverses every reachable entity exactly once under that
    /// precondition but does not detect cycles itself.
    fn children(&self, entity: &Self::Entity) -> Vec<Self::Entity>;

    /// The key partitioning ranges into independently searchable sets,
    /// typically the path of the declaring file.
    ///
    /// `None` means the entity has no declaring file (synthetic or implicit
    /// entities); such entities are skipped silently. An empty string is
    /// treated as a data defect and skipped with a warning.
    fn grouping_key(&self, entity: &Self::Entity) -> Option<SmolStr>;

    /// The source lines of the entity's declaration, if known.
    ///
    /// `None` means the entity carries no location information and is
    /// skipped. The span's line convention (0-based or 1-based) is the
    /// tree's own; the index only compares lines against each other.
    fn line_range(&self, entity: &Self::Entity) -> Option<LineSpan>;
}
