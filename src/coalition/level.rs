//! Level graphs and the contraction step between rounds.
//!
//! `G_1` is built from the caller's [`SocialGraph`] with nodes and edges in
//! descending vertex order. Each later level is produced by [`contract`]:
//! matched pairs become one composite node that inherits the adjacency of both
//! endpoints towards the nodes left unmatched in that round.
//!
//! Node and adjacency order are insertion order and are what the matching
//! oracle sees; tie-breaking depends on them.

use hashbrown::{HashMap, HashSet};

use super::node::{NodeArena, NodeId};
use crate::assign_error::AssignError;
use crate::debug_invariants::DebugInvariants;
use crate::graph::graph_traits::MatchableGraph;
use crate::graph::{SocialGraph, VertexLike};
use crate::matching::Matching;

/// Simple undirected graph over arena handles.
#[derive(Debug, Clone, Default)]
pub struct LevelGraph {
    order: Vec<NodeId>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    edges: HashSet<(NodeId, NodeId)>,
}

#[inline]
fn edge_key(u: NodeId, v: NodeId) -> (NodeId, NodeId) {
    if u < v { (u, v) } else { (v, u) }
}

impl LevelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            order: Vec::with_capacity(nodes),
            adjacency: HashMap::with_capacity(nodes),
            edges: HashSet::new(),
        }
    }

    /// Builds `G_1`: one leaf per vertex, nodes in descending vertex order and
    /// edges inserted in descending `(larger, smaller)` order.
    pub fn initial<V: VertexLike>(arena: &mut NodeArena<V>, graph: &SocialGraph<V>) -> Self {
        let mut level = Self::with_capacity(graph.number_of_nodes());
        let mut handle: HashMap<&V, NodeId> = HashMap::with_capacity(graph.number_of_nodes());
        for v in graph.vertices().rev() {
            let id = arena.leaf(v.clone());
            handle.insert(v, id);
            level.add_node(id);
        }

        let mut edges: Vec<(&V, &V)> = graph.edge_list().map(|(lo, hi)| (hi, lo)).collect();
        edges.sort_unstable_by(|a, b| b.cmp(a));
        for (hi, lo) in edges {
            if let (Some(&u), Some(&v)) = (handle.get(hi), handle.get(lo)) {
                level.add_edge(u, v);
            }
        }
        level
    }

    /// Appends `n`; returns `false` if it was already present.
    pub fn add_node(&mut self, n: NodeId) -> bool {
        if self.adjacency.contains_key(&n) {
            return false;
        }
        self.order.push(n);
        self.adjacency.insert(n, Vec::new());
        true
    }

    /// Adds `u - v` if both nodes exist and the edge is new.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        if u == v || !self.contains_node(u) || !self.contains_node(v) {
            return false;
        }
        if !self.edges.insert(edge_key(u, v)) {
            return false;
        }
        for (a, b) in [(u, v), (v, u)] {
            if let Some(ns) = self.adjacency.get_mut(&a) {
                ns.push(b);
            }
        }
        true
    }

    pub fn contains_node(&self, n: NodeId) -> bool {
        self.adjacency.contains_key(&n)
    }

    pub fn contains_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.edges.contains(&edge_key(u, v))
    }

    /// Nodes in insertion order.
    pub fn node_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Neighbours of `n` in insertion order.
    pub fn neighbors_of(&self, n: NodeId) -> &[NodeId] {
        self.adjacency.get(&n).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn number_of_nodes(&self) -> usize {
        self.order.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }
}

impl MatchableGraph for LevelGraph {
    type NodeId = NodeId;
    type NodeIter<'a> = std::iter::Copied<std::slice::Iter<'a, NodeId>>;
    type NeighIter<'a> = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn nodes(&self) -> Self::NodeIter<'_> {
        self.order.iter().copied()
    }

    fn neighbors(&self, n: &NodeId) -> Self::NeighIter<'_> {
        self.neighbors_of(*n).iter().copied()
    }

    fn degree(&self, n: &NodeId) -> usize {
        self.neighbors_of(*n).len()
    }

    fn number_of_nodes(&self) -> usize {
        self.order.len()
    }

    fn has_edge(&self, u: &NodeId, v: &NodeId) -> bool {
        self.contains_edge(*u, *v)
    }
}

impl DebugInvariants for LevelGraph {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "LevelGraph invalid");
    }

    fn validate_invariants(&self) -> Result<(), AssignError> {
        if self.order.len() != self.adjacency.len() {
            return Err(AssignError::LevelInvariant(format!(
                "level lists {} nodes but stores adjacency for {}",
                self.order.len(),
                self.adjacency.len()
            )));
        }
        let mut stubs = 0usize;
        for (&u, ns) in &self.adjacency {
            for &v in ns {
                if u == v || !self.contains_edge(u, v) || !self.neighbors_of(v).contains(&u) {
                    return Err(AssignError::LevelInvariant(format!(
                        "asymmetric or stray adjacency {u:?} -> {v:?}"
                    )));
                }
            }
            stubs += ns.len();
        }
        if stubs != 2 * self.edges.len() {
            return Err(AssignError::LevelInvariant(format!(
                "{stubs} adjacency stubs for {} edges",
                self.edges.len()
            )));
        }
        Ok(())
    }
}

/// Builds `G_{l+1}` from `G_l` and its matching `M_l`.
///
/// 1. every node of `level` is carried over;
/// 2. each matched pair `(a, b)` becomes a composite node appended after the
///    carried nodes, and `a`, `b` are dropped;
/// 3. each composite `u = (a, b)` is joined to every remaining node `v` that
///    `level` connected to `u`, `a` or `b`, in `G_{l+1}` node order.
///
/// With `cap = Some(k)` an edge is left out when the two sides together hold
/// more than `k` vertices, so no later round can merge past `k`.
///
/// # Errors
/// [`AssignError::InvalidMatching`] if `matching` is not a matching of `level`.
pub fn contract<V>(
    arena: &mut NodeArena<V>,
    level: &LevelGraph,
    matching: &Matching<NodeId>,
    cap: Option<usize>,
) -> Result<LevelGraph, AssignError> {
    matching.validate_on(level)?;

    let matched: HashSet<NodeId> = matching.iter().flat_map(|&(a, b)| [a, b]).collect();
    let mut next = LevelGraph::with_capacity(level.number_of_nodes() - matching.len());
    for &n in level.node_order() {
        if !matched.contains(&n) {
            next.add_node(n);
        }
    }

    let mut composites = Vec::with_capacity(matching.len());
    for &(a, b) in matching {
        let u = arena.pair(a, b);
        next.add_node(u);
        composites.push((u, a, b));
    }

    let position: HashMap<NodeId, usize> = next
        .node_order()
        .iter()
        .enumerate()
        .map(|(i, &n)| (n, i))
        .collect();

    for (u, a, b) in composites {
        let mut targets: Vec<(usize, NodeId)> = level
            .neighbors_of(u)
            .iter()
            .chain(level.neighbors_of(a))
            .chain(level.neighbors_of(b))
            .filter(|&&v| v != u)
            .filter_map(|&v| position.get(&v).map(|&p| (p, v)))
            .collect();
        targets.sort_unstable();
        targets.dedup();

        for (_, v) in targets {
            if cap.is_some_and(|k| arena.size(u) + arena.size(v) > k) {
                continue;
            }
            next.add_edge(u, v);
        }
    }

    Ok(next)
}
