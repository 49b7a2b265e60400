//! AssignError: Unified error type for social-assign public APIs
//!
//! Input validation, graph construction and matching-oracle failures all
//! surface through this one enum so callers can match on a single type.

use thiserror::Error;

/// Unified error type for social-assign operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// The group-size bound was negative.
    #[error("k should be 0 <= k <= |V|, got k = {0}")]
    NegativeK(i64),
    /// The group-size bound exceeds the number of vertices in the graph.
    #[error("k ({k}) cannot be greater than the number of nodes in the graph ({vertices})")]
    KExceedsVertexCount { k: i64, vertices: usize },
    /// An edge joined a vertex to itself; friendship graphs are simple.
    #[error("Graph error: self-loop on vertex `{0}`")]
    SelfLoop(String),
    /// The matching oracle returned pairs that are not a matching of the level graph.
    #[error("Matching error: {0}")]
    InvalidMatching(String),
    /// The matching oracle itself failed; propagated unchanged.
    #[error("Matching oracle failed: {0}")]
    Oracle(String),
    /// A level graph lost its structural invariants (adjacency out of sync).
    #[error("Level graph invariant violated: {0}")]
    LevelInvariant(String),
    /// A partition failed coverage or size validation.
    #[error("Partition error: {0}")]
    InvalidPartition(String),
}
