//! Friendship graphs handed to the assignment engine.
//!
//! [`SocialGraph`] is the caller-owned input: a simple undirected graph over
//! opaque, totally ordered vertex identifiers. The engine only ever borrows it
//! and builds its own level graphs from it, so the caller's graph is never
//! mutated by an assignment run.

pub mod graph_traits;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::assign_error::AssignError;
use graph_traits::MatchableGraph;

/// Bounds every vertex identifier must satisfy.
pub trait VertexLike: Ord + Hash + Clone + Debug {}

impl<T: Ord + Hash + Clone + Debug> VertexLike for T {}

/// Simple undirected friendship graph.
///
/// Vertices and adjacency are kept in ascending order, so iteration is
/// deterministic regardless of insertion order. Self-loops are rejected and
/// repeated edges collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialGraph<V: Ord> {
    adjacency: BTreeMap<V, BTreeSet<V>>,
}

impl<V: VertexLike> Default for SocialGraph<V> {
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }
}

impl<V: VertexLike> SocialGraph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with the given vertices and no edges.
    pub fn with_vertices<I: IntoIterator<Item = V>>(vertices: I) -> Self {
        let mut graph = Self::new();
        for v in vertices {
            graph.add_vertex(v);
        }
        graph
    }

    /// Builds a graph from an edge list; endpoints are added implicitly.
    pub fn from_edges<I: IntoIterator<Item = (V, V)>>(edges: I) -> Result<Self, AssignError> {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Builds a graph from `(vertex, neighbours)` entries, the dict-of-lists
    /// shape web front ends usually submit. A vertex with no neighbours is
    /// still added.
    pub fn from_adjacency<I, N>(entries: I) -> Result<Self, AssignError>
    where
        I: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = V>,
    {
        let mut graph = Self::new();
        for (u, neighbours) in entries {
            graph.add_vertex(u.clone());
            for v in neighbours {
                graph.add_edge(u.clone(), v)?;
            }
        }
        Ok(graph)
    }

    /// Adds `v`; returns `false` if it was already present.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.adjacency.insert(v, BTreeSet::new());
        true
    }

    /// Adds the undirected edge `u - v`, inserting missing endpoints.
    ///
    /// Returns `Ok(false)` when the edge already existed.
    ///
    /// # Errors
    /// [`AssignError::SelfLoop`] if `u == v`.
    pub fn add_edge(&mut self, u: V, v: V) -> Result<bool, AssignError> {
        if u == v {
            return Err(AssignError::SelfLoop(format!("{u:?}")));
        }
        let inserted = self.adjacency.entry(u.clone()).or_default().insert(v.clone());
        self.adjacency.entry(v).or_default().insert(u);
        Ok(inserted)
    }

    pub fn contains_vertex(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    pub fn contains_edge(&self, u: &V, v: &V) -> bool {
        self.adjacency.get(u).is_some_and(|ns| ns.contains(v))
    }

    /// Vertices in ascending order.
    pub fn vertices(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.adjacency.keys()
    }

    /// Neighbours of `v` in ascending order (empty for unknown vertices).
    pub fn neighbors_of(&self, v: &V) -> impl Iterator<Item = &V> + '_ {
        self.adjacency.get(v).into_iter().flatten()
    }

    pub fn degree_of(&self, v: &V) -> usize {
        self.adjacency.get(v).map_or(0, BTreeSet::len)
    }

    /// Each undirected edge once as `(min, max)`, in ascending order.
    pub fn edge_list(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(u, ns)| ns.iter().filter(move |v| *v > u).map(move |v| (u, v)))
    }

    pub fn number_of_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl<V: VertexLike> MatchableGraph for SocialGraph<V> {
    type NodeId = V;
    type NodeIter<'a>
        = std::iter::Cloned<std::collections::btree_map::Keys<'a, V, BTreeSet<V>>>
    where
        Self: 'a;
    type NeighIter<'a>
        = std::iter::Cloned<std::iter::Flatten<std::option::IntoIter<&'a BTreeSet<V>>>>
    where
        Self: 'a;

    fn nodes(&self) -> Self::NodeIter<'_> {
        self.adjacency.keys().cloned()
    }

    fn neighbors(&self, n: &V) -> Self::NeighIter<'_> {
        self.adjacency.get(n).into_iter().flatten().cloned()
    }

    fn degree(&self, n: &V) -> usize {
        self.degree_of(n)
    }

    fn number_of_nodes(&self) -> usize {
        self.adjacency.len()
    }

    fn has_edge(&self, u: &V, v: &V) -> bool {
        self.contains_edge(u, v)
    }
}
