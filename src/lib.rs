#![cfg_attr(docsrs, feature(doc_cfg))]
//! # social-assign
//!
//! social-assign partitions the members of a friendship graph into groups of
//! bounded size so that as many friendships as possible end up inside a
//! group. It implements the Match-and-Merge heuristic: `k - 1` rounds of
//! maximum matching, each followed by contracting the matched pairs, and a
//! final flattening of the merged nodes into vertex groups.
//!
//! ## Features
//! - [`SocialGraph`](graph::SocialGraph): simple undirected input graph over any ordered identifier
//! - Pluggable [`MatchingOracle`](matching::MatchingOracle) with an Edmonds blossom implementation
//! - Structured per-round events through a caller-supplied [`RoundObserver`](coalition::observer::RoundObserver)
//! - Partition quality metrics and validation
//!
//! ## Determinism
//!
//! Level graphs keep nodes and adjacency in insertion order and the blossom
//! oracle breaks ties by that order, so the same graph and `k` always give
//! the same partition. Tests that need random graphs seed `SmallRng`
//! explicitly.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! social-assign = "0.1"
//! # Optional features:
//! # features = ["rayon", "strict-invariants"]
//! ```
//!
//! ```
//! use social_assign::prelude::*;
//!
//! let g = SocialGraph::from_edges([(4, 6), (4, 5), (3, 4), (2, 3), (1, 2)]).unwrap();
//! let p = match_and_merge(&g, 2).unwrap();
//! assert_eq!(p.groups(), &[vec![1, 2], vec![3, 4], vec![5], vec![6]]);
//! ```

pub mod assign_error;
pub mod coalition;
pub mod debug_invariants;
pub mod graph;
pub mod matching;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::assign_error::AssignError;
    pub use crate::coalition::flatten::Partition;
    pub use crate::coalition::metrics::{
        cut_edges, group_sizes, partition_value, validate_partition,
    };
    pub use crate::coalition::observer::{
        LogObserver, NoopObserver, RecordingObserver, RoundEvent, RoundObserver,
    };
    pub use crate::coalition::{
        CoalitionConfig, GroupBound, LevelTrace, MatchAndMerge, MatchAndMergeTrace,
        match_and_merge,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::graph::graph_traits::MatchableGraph;
    pub use crate::graph::{SocialGraph, VertexLike};
    pub use crate::matching::{BlossomMatching, Matching, MatchingOracle};
}
