//! Match-and-Merge: social-aware assignment by repeated matching.
//!
//! Given a friendship graph and a group-size bound `k`, the round engine runs
//! `k - 1` rounds. Each round asks a [`MatchingOracle`] for a maximum matching
//! of the current level graph and contracts every matched pair into one
//! composite node; the final level is flattened into groups of vertices.
//!
//! ```
//! use social_assign::prelude::*;
//!
//! let g = SocialGraph::from_edges([(4, 6), (4, 5), (3, 4), (2, 3), (1, 2)]).unwrap();
//! let p = match_and_merge(&g, 3).unwrap();
//! assert_eq!(p.groups(), &[vec![1, 2], vec![3, 4, 6], vec![5]]);
//! ```

pub mod flatten;
pub mod level;
pub mod metrics;
pub mod node;
pub mod observer;

use serde::{Deserialize, Serialize};

use self::flatten::{Partition, flatten};
use self::level::{LevelGraph, contract};
use self::node::NodeArena;
use self::observer::{LogObserver, RoundEvent, RoundObserver};
use crate::assign_error::AssignError;
use crate::debug_invariants::DebugInvariants;
use crate::graph::{SocialGraph, VertexLike};
use crate::matching::{BlossomMatching, MatchingOracle};

/// How the engine treats the group-size bound during contraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupBound {
    /// Edges whose endpoints together hold more than `k` vertices are left out
    /// of the next level, so every group has at most `k` members.
    #[default]
    Enforced,
    /// Plain contraction. Repeated merging can then produce a group larger
    /// than `k` on some graphs.
    Unchecked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoalitionConfig {
    pub group_bound: GroupBound,
}

impl CoalitionConfig {
    pub fn with_group_bound(mut self, group_bound: GroupBound) -> Self {
        self.group_bound = group_bound;
        self
    }
}

/// Summary of one round, kept by [`MatchAndMerge::run_traced`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTrace<V> {
    pub round: usize,
    /// Node count of the level the oracle was run on.
    pub nodes: usize,
    /// Edge count of that level.
    pub edges: usize,
    /// Vertices of each composite created this round, in matching order.
    pub merged: Vec<Vec<V>>,
}

/// Partition plus the per-round history that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAndMergeTrace<V> {
    pub partition: Partition<V>,
    pub levels: Vec<LevelTrace<V>>,
}

/// The round engine.
///
/// `O` supplies the matchings and `S` receives progress events. Both default
/// to the production choices, so `MatchAndMerge::new()` is what most callers
/// want.
#[derive(Debug, Clone, Default)]
pub struct MatchAndMerge<O = BlossomMatching, S = LogObserver> {
    oracle: O,
    observer: S,
    config: CoalitionConfig,
}

impl MatchAndMerge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: MatchingOracle, S: RoundObserver> MatchAndMerge<O, S> {
    /// Replaces the matching oracle.
    pub fn with_oracle<O2: MatchingOracle>(self, oracle: O2) -> MatchAndMerge<O2, S> {
        MatchAndMerge {
            oracle,
            observer: self.observer,
            config: self.config,
        }
    }

    /// Replaces the event sink.
    pub fn with_observer<S2: RoundObserver>(self, observer: S2) -> MatchAndMerge<O, S2> {
        MatchAndMerge {
            oracle: self.oracle,
            observer,
            config: self.config,
        }
    }

    pub fn with_config(mut self, config: CoalitionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CoalitionConfig {
        &self.config
    }

    pub fn observer(&self) -> &S {
        &self.observer
    }

    pub fn into_observer(self) -> S {
        self.observer
    }

    /// Partitions the vertices of `graph` into groups of at most `k`.
    ///
    /// `k == 0` yields an empty partition and `k == 1` one singleton per
    /// vertex; neither consults the oracle. The caller's graph is only read.
    ///
    /// # Errors
    /// - [`AssignError::NegativeK`] if `k < 0`;
    /// - [`AssignError::KExceedsVertexCount`] if `k` is larger than the vertex count;
    /// - any error the oracle reports, unchanged;
    /// - [`AssignError::InvalidMatching`] if the oracle's answer is not a matching.
    pub fn run<V: VertexLike>(
        &mut self,
        graph: &SocialGraph<V>,
        k: i64,
    ) -> Result<Partition<V>, AssignError> {
        self.execute(graph, k, None)
    }

    /// Like [`run`](Self::run), also returning a summary of every round.
    pub fn run_traced<V: VertexLike>(
        &mut self,
        graph: &SocialGraph<V>,
        k: i64,
    ) -> Result<MatchAndMergeTrace<V>, AssignError> {
        let mut levels = Vec::new();
        let partition = self.execute(graph, k, Some(&mut levels))?;
        Ok(MatchAndMergeTrace { partition, levels })
    }

    fn validate_k<V: VertexLike>(
        &mut self,
        graph: &SocialGraph<V>,
        k: i64,
    ) -> Result<usize, AssignError> {
        let vertices = graph.number_of_nodes();
        let checked = match usize::try_from(k) {
            Err(_) => Err(AssignError::NegativeK(k)),
            Ok(bound) if bound > vertices => Err(AssignError::KExceedsVertexCount { k, vertices }),
            Ok(bound) => Ok(bound),
        };
        if checked.is_err() {
            self.observer.on_event(&RoundEvent::Rejected { k, vertices });
        }
        checked
    }

    fn execute<V: VertexLike>(
        &mut self,
        graph: &SocialGraph<V>,
        k: i64,
        mut trace: Option<&mut Vec<LevelTrace<V>>>,
    ) -> Result<Partition<V>, AssignError> {
        let bound = self.validate_k(graph, k)?;
        self.observer.on_event(&RoundEvent::Started {
            vertices: graph.number_of_nodes(),
            edges: graph.number_of_edges(),
            k,
        });

        if bound <= 1 {
            let partition = if bound == 0 {
                Partition::empty()
            } else {
                Partition::singletons(graph.vertices().cloned())
            };
            self.observer.on_event(&RoundEvent::Trivial {
                k,
                groups: partition.len(),
            });
            self.finish(0, &partition);
            return Ok(partition);
        }

        let cap = match self.config.group_bound {
            GroupBound::Enforced => Some(bound),
            GroupBound::Unchecked => None,
        };
        let mut arena = NodeArena::with_capacity(2 * graph.number_of_nodes());
        let mut level = LevelGraph::initial(&mut arena, graph);
        level.debug_assert_invariants();

        for round in 1..bound {
            let matching = self.oracle.maximum_matching(&level)?;
            self.observer.on_event(&RoundEvent::Matched {
                round,
                nodes: level.number_of_nodes(),
                edges: level.number_of_edges(),
                pairs: matching.len(),
            });

            let next = contract(&mut arena, &level, &matching, cap)?;
            next.debug_assert_invariants();
            self.observer.on_event(&RoundEvent::Contracted {
                round,
                nodes: next.number_of_nodes(),
                edges: next.number_of_edges(),
            });

            if let Some(levels) = trace.as_deref_mut() {
                levels.push(LevelTrace {
                    round,
                    nodes: level.number_of_nodes(),
                    edges: level.number_of_edges(),
                    merged: matching
                        .iter()
                        .map(|&(a, b)| {
                            let mut group = arena.leaf_values(a);
                            group.extend(arena.leaf_values(b));
                            group.sort();
                            group
                        })
                        .collect(),
                });
            }
            level = next;
        }

        let partition = flatten(&arena, &level);
        partition.debug_assert_invariants();
        if partition.largest_group() > bound {
            self.observer.on_event(&RoundEvent::BoundExceeded {
                k,
                largest_group: partition.largest_group(),
            });
        }
        self.finish(bound - 1, &partition);
        Ok(partition)
    }

    fn finish<V>(&mut self, rounds: usize, partition: &Partition<V>) {
        self.observer.on_event(&RoundEvent::Finished {
            rounds,
            groups: partition.len(),
            largest_group: partition.largest_group(),
        });
    }
}

/// Runs Match-and-Merge with the blossom oracle, default configuration and
/// log-based reporting.
///
/// # Errors
/// See [`MatchAndMerge::run`].
pub fn match_and_merge<V: VertexLike>(
    graph: &SocialGraph<V>,
    k: i64,
) -> Result<Partition<V>, AssignError> {
    MatchAndMerge::new().run(graph, k)
}
