#![allow(dead_code)]
use hashbrown::HashSet;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use social_assign::prelude::*;

/// Path 1-2-3-4 with 5 and 6 both hanging off 4.
pub fn path_fork() -> SocialGraph<u32> {
    SocialGraph::from_edges([(4, 6), (4, 5), (3, 4), (2, 3), (1, 2)]).unwrap()
}

/// Erdos-Renyi graph on `0..n`; every vertex is present even if isolated.
pub fn random_graph(n: u32, p: f64, seed: u64) -> SocialGraph<u32> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut g = SocialGraph::with_vertices(0..n);
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.r#gen::<f64>() < p {
                g.add_edge(u, v).unwrap();
            }
        }
    }
    g
}

/// Size of a maximum matching by exhaustive search (small graphs only).
pub fn brute_force_matching_size(g: &SocialGraph<u32>) -> usize {
    fn go(g: &SocialGraph<u32>, free: &mut Vec<u32>) -> usize {
        let Some(u) = free.pop() else {
            return 0;
        };
        // leave u unmatched
        let mut best = go(g, free);
        let partners: Vec<u32> = g
            .neighbors_of(&u)
            .copied()
            .filter(|v| free.contains(v))
            .collect();
        for v in partners {
            let pos = free.iter().position(|&w| w == v).unwrap();
            free.remove(pos);
            best = best.max(1 + go(g, free));
            free.insert(pos, v);
        }
        free.push(u);
        best
    }
    let mut free: Vec<u32> = g.vertices().copied().collect();
    go(g, &mut free)
}

/// Maximal (not maximum) matching: each node in order grabs its first free neighbour.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyMatching;

impl MatchingOracle for GreedyMatching {
    fn maximum_matching<G: MatchableGraph>(
        &self,
        graph: &G,
    ) -> Result<Matching<G::NodeId>, AssignError> {
        let mut used = HashSet::new();
        let mut m = Matching::new();
        for u in graph.nodes() {
            if used.contains(&u) {
                continue;
            }
            if let Some(v) = graph.neighbors(&u).find(|v| !used.contains(v)) {
                used.insert(u.clone());
                used.insert(v.clone());
                m.push(u, v);
            }
        }
        Ok(m)
    }
}

/// Oracle that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingOracle;

impl MatchingOracle for FailingOracle {
    fn maximum_matching<G: MatchableGraph>(
        &self,
        _graph: &G,
    ) -> Result<Matching<G::NodeId>, AssignError> {
        Err(AssignError::Oracle("solver unavailable".into()))
    }
}

/// Oracle that pairs the first two nodes whether or not they are adjacent.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstTwoOracle;

impl MatchingOracle for FirstTwoOracle {
    fn maximum_matching<G: MatchableGraph>(
        &self,
        graph: &G,
    ) -> Result<Matching<G::NodeId>, AssignError> {
        let mut nodes = graph.nodes();
        Ok(match (nodes.next(), nodes.next()) {
            (Some(a), Some(b)) => [(a, b)].into_iter().collect(),
            _ => Matching::new(),
        })
    }
}
