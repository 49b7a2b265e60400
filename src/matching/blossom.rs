//! Edmonds' blossom algorithm for maximum-cardinality matching.
//!
//! Each free node is used once as the root of an alternating-tree search. The
//! search is a FIFO breadth-first scan; an edge between two even nodes of the
//! tree closes an odd cycle, which is shrunk onto its base so the scan can
//! continue through it. A free node reached at an odd position ends the
//! search and the path back to the root is flipped.
//!
//! ## Determinism
//! Roots are taken from the back of the node order (the most recently listed
//! free node first) and neighbours are scanned in adjacency order. The result
//! lists each pair once, ordered by the position of its earlier endpoint, so a
//! graph presented in the same order always yields the same matching.
//!
//! Runs in `O(V^3)`, which is ample for the contracted level graphs of the
//! round engine.

use std::collections::VecDeque;

use hashbrown::HashMap;

use super::{Matching, MatchingOracle};
use crate::assign_error::AssignError;
use crate::graph::graph_traits::MatchableGraph;

/// Production [`MatchingOracle`] based on Edmonds' blossom shrinking.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlossomMatching;

impl BlossomMatching {
    pub fn new() -> Self {
        Self
    }
}

impl MatchingOracle for BlossomMatching {
    fn maximum_matching<G: MatchableGraph>(
        &self,
        graph: &G,
    ) -> Result<Matching<G::NodeId>, AssignError> {
        let nodes: Vec<G::NodeId> = graph.nodes().collect();
        let mut index: HashMap<G::NodeId, usize> = HashMap::with_capacity(nodes.len());
        for (i, n) in nodes.iter().enumerate() {
            if index.insert(n.clone(), i).is_some() {
                return Err(AssignError::Oracle(format!("node {n:?} listed twice")));
            }
        }

        let mut adj = Vec::with_capacity(nodes.len());
        for (i, u) in nodes.iter().enumerate() {
            let mut row = Vec::with_capacity(graph.degree(u));
            for v in graph.neighbors(u) {
                let Some(&j) = index.get(&v) else {
                    return Err(AssignError::Oracle(format!(
                        "neighbour {v:?} of {u:?} is not a node of the graph"
                    )));
                };
                if j == i {
                    return Err(AssignError::Oracle(format!("self-loop on {u:?}")));
                }
                row.push(j);
            }
            adj.push(row);
        }

        let mates = EdmondsSearch::new(adj).solve();
        log::trace!(
            "blossom matching: {} nodes, {} pairs",
            nodes.len(),
            mates.iter().flatten().count() / 2
        );

        Ok(mates
            .iter()
            .enumerate()
            .filter_map(|(i, mate)| match *mate {
                Some(j) if i < j => Some((nodes[i].clone(), nodes[j].clone())),
                _ => None,
            })
            .collect())
    }
}

/// Dense-index search state, reused across roots.
struct EdmondsSearch {
    adj: Vec<Vec<usize>>,
    mate: Vec<Option<usize>>,
    /// Tree predecessor of odd nodes, and of even nodes inside a shrunken blossom.
    parent: Vec<Option<usize>>,
    /// Base of the shrunken blossom each node currently belongs to.
    base: Vec<usize>,
    /// Node has been placed on the scan queue as an even node.
    queued: Vec<bool>,
    in_blossom: Vec<bool>,
    on_path: Vec<bool>,
    queue: VecDeque<usize>,
}

impl EdmondsSearch {
    fn new(adj: Vec<Vec<usize>>) -> Self {
        let n = adj.len();
        Self {
            adj,
            mate: vec![None; n],
            parent: vec![None; n],
            base: (0..n).collect(),
            queued: vec![false; n],
            in_blossom: vec![false; n],
            on_path: vec![false; n],
            queue: VecDeque::with_capacity(n),
        }
    }

    fn solve(mut self) -> Vec<Option<usize>> {
        for root in (0..self.adj.len()).rev() {
            if self.mate[root].is_some() {
                continue;
            }
            if let Some(end) = self.find_augmenting_path(root) {
                self.augment(end);
            }
        }
        self.mate
    }

    /// Flips the alternating path ending at the free odd node `end`.
    fn augment(&mut self, end: usize) {
        let mut cur = Some(end);
        while let Some(v) = cur {
            let Some(pv) = self.parent[v] else { break };
            let next = self.mate[pv];
            self.mate[v] = Some(pv);
            self.mate[pv] = Some(v);
            cur = next;
        }
    }

    fn find_augmenting_path(&mut self, root: usize) -> Option<usize> {
        self.queued.fill(false);
        self.parent.fill(None);
        for (i, b) in self.base.iter_mut().enumerate() {
            *b = i;
        }
        self.queue.clear();
        self.queued[root] = true;
        self.queue.push_back(root);

        while let Some(v) = self.queue.pop_front() {
            for k in 0..self.adj[v].len() {
                let to = self.adj[v][k];
                if self.base[v] == self.base[to] || self.mate[v] == Some(to) {
                    continue;
                }
                let to_is_even =
                    to == root || self.mate[to].is_some_and(|m| self.parent[m].is_some());
                if to_is_even {
                    self.shrink(v, to);
                } else if self.parent[to].is_none() {
                    self.parent[to] = Some(v);
                    match self.mate[to] {
                        None => return Some(to),
                        Some(m) => {
                            self.queued[m] = true;
                            self.queue.push_back(m);
                        }
                    }
                }
            }
        }
        None
    }

    /// Shrinks the odd cycle closed by the even-even edge `v - to`.
    fn shrink(&mut self, v: usize, to: usize) {
        let lca = self.common_base(v, to);
        self.in_blossom.fill(false);
        self.mark_path(v, lca, to);
        self.mark_path(to, lca, v);
        for i in 0..self.base.len() {
            if self.in_blossom[self.base[i]] {
                self.base[i] = lca;
                if !self.queued[i] {
                    self.queued[i] = true;
                    self.queue.push_back(i);
                }
            }
        }
    }

    /// Walks from `v` down to the blossom base `lca`, re-pointing odd nodes at
    /// the other side of the cycle so augmenting paths can traverse it.
    fn mark_path(&mut self, mut v: usize, lca: usize, mut child: usize) {
        while self.base[v] != lca {
            let Some(m) = self.mate[v] else { break };
            self.in_blossom[self.base[v]] = true;
            self.in_blossom[self.base[m]] = true;
            self.parent[v] = Some(child);
            child = m;
            let Some(next) = self.parent[m] else { break };
            v = next;
        }
    }

    /// First base shared by the tree paths from `a` and `b` to the root.
    fn common_base(&mut self, mut a: usize, mut b: usize) -> usize {
        self.on_path.fill(false);
        loop {
            a = self.base[a];
            self.on_path[a] = true;
            match self.mate[a].and_then(|m| self.parent[m]) {
                Some(next) => a = next,
                None => break,
            }
        }
        loop {
            b = self.base[b];
            if self.on_path[b] {
                return b;
            }
            match self.mate[b].and_then(|m| self.parent[m]) {
                Some(next) => b = next,
                None => return b,
            }
        }
    }
}
