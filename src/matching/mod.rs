//! Maximum-matching capability consumed by the round engine.
//!
//! The engine never computes matchings itself; it asks a [`MatchingOracle`]
//! for one per round. [`BlossomMatching`] is the production oracle, and tests
//! can substitute any deterministic stub.

pub mod blossom;

pub use blossom::BlossomMatching;

use hashbrown::HashSet;

use crate::assign_error::AssignError;
use crate::graph::graph_traits::MatchableGraph;

/// Ordered set of vertex-disjoint node pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching<N> {
    pairs: Vec<(N, N)>,
}

impl<N> Default for Matching<N> {
    fn default() -> Self {
        Self { pairs: Vec::new() }
    }
}

impl<N> Matching<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, a: N, b: N) {
        self.pairs.push((a, b));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(N, N)] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (N, N)> {
        self.pairs.iter()
    }

    pub fn into_pairs(self) -> Vec<(N, N)> {
        self.pairs
    }
}

impl<N> FromIterator<(N, N)> for Matching<N> {
    fn from_iter<I: IntoIterator<Item = (N, N)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a, N> IntoIterator for &'a Matching<N> {
    type Item = &'a (N, N);
    type IntoIter = std::slice::Iter<'a, (N, N)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl<N: Clone + std::hash::Hash + Eq + std::fmt::Debug> Matching<N> {
    /// Checks that every pair is an edge of `graph` and that no node is used twice.
    ///
    /// # Errors
    /// [`AssignError::InvalidMatching`] naming the first offending pair.
    pub fn validate_on<G>(&self, graph: &G) -> Result<(), AssignError>
    where
        G: MatchableGraph<NodeId = N>,
    {
        let mut used: HashSet<N> = HashSet::with_capacity(self.pairs.len() * 2);
        for (a, b) in &self.pairs {
            if !graph.has_edge(a, b) {
                return Err(AssignError::InvalidMatching(format!(
                    "pair ({a:?}, {b:?}) is not an edge"
                )));
            }
            if !used.insert(a.clone()) || !used.insert(b.clone()) {
                return Err(AssignError::InvalidMatching(format!(
                    "pair ({a:?}, {b:?}) reuses a matched node"
                )));
            }
        }
        Ok(())
    }
}

/// A source of maximum-cardinality matchings.
///
/// When several maximum matchings exist an oracle may return any of them, but
/// it must return the same one for the same graph presented in the same order.
pub trait MatchingOracle {
    /// Returns a maximum-cardinality set of vertex-disjoint edges of `graph`.
    fn maximum_matching<G: MatchableGraph>(
        &self,
        graph: &G,
    ) -> Result<Matching<G::NodeId>, AssignError>;
}

impl<O: MatchingOracle> MatchingOracle for &O {
    fn maximum_matching<G: MatchableGraph>(
        &self,
        graph: &G,
    ) -> Result<Matching<G::NodeId>, AssignError> {
        (**self).maximum_matching(graph)
    }
}
