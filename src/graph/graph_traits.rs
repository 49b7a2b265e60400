// Graph trait abstraction for matching
use hashbrown::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for graphs a [`MatchingOracle`](crate::matching::MatchingOracle) can run on.
///
/// All methods are read-only. Iteration order is part of the contract: oracles
/// break ties by the order in which `nodes()` and `neighbors()` yield, so
/// implementors must return the same order on every call.
pub trait MatchableGraph {
    /// Node identifier type (cheap to clone, hashable).
    type NodeId: Clone + Hash + Eq + Debug;
    /// Iterator over all nodes, in the graph's fixed order.
    type NodeIter<'a>: Iterator<Item = Self::NodeId> + 'a
    where
        Self: 'a;
    /// Iterator over the neighbours of one node, in adjacency order.
    type NeighIter<'a>: Iterator<Item = Self::NodeId> + 'a
    where
        Self: 'a;

    /// Returns an iterator over all nodes.
    fn nodes(&self) -> Self::NodeIter<'_>;

    /// Returns an iterator over the neighbours of `n`.
    fn neighbors(&self, n: &Self::NodeId) -> Self::NeighIter<'_>;

    /// Degree of a node (number of neighbours).
    fn degree(&self, n: &Self::NodeId) -> usize {
        self.neighbors(n).count()
    }

    /// Number of nodes.
    fn number_of_nodes(&self) -> usize {
        self.nodes().count()
    }

    /// Whether `u` and `v` are adjacent.
    fn has_edge(&self, u: &Self::NodeId, v: &Self::NodeId) -> bool {
        self.neighbors(u).any(|w| &w == v)
    }

    /// Every undirected edge once, as `(u, v)` with `u` ahead of `v` in node order.
    fn edges(&self) -> Vec<(Self::NodeId, Self::NodeId)> {
        let position: HashMap<Self::NodeId, usize> =
            self.nodes().enumerate().map(|(i, n)| (n, i)).collect();
        let mut out = Vec::new();
        for (pu, u) in self.nodes().enumerate() {
            for v in self.neighbors(&u) {
                if position.get(&v).is_some_and(|&pv| pv > pu) {
                    out.push((u.clone(), v));
                }
            }
        }
        out
    }
}
