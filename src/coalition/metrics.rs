//! Partition quality metrics.
//!
//! The value of a partition `P` is `V_P`, the number of friendship edges whose
//! endpoints share a group; Match-and-Merge tries to make it large. These
//! helpers are meant for reporting, tests and CI checks, and never change the
//! partition they inspect.

use hashbrown::HashMap;
use itertools::Itertools;

use super::flatten::Partition;
use crate::assign_error::AssignError;
use crate::graph::{SocialGraph, VertexLike};

/// Maps each vertex to the index of its group.
fn group_index<V: VertexLike>(partition: &Partition<V>) -> HashMap<&V, usize> {
    partition
        .iter()
        .enumerate()
        .flat_map(|(i, g)| g.iter().map(move |v| (v, i)))
        .collect()
}

/// Number of edges with both endpoints in the same group (`V_P`).
///
/// Edges touching a vertex the partition does not cover are not counted.
#[cfg(feature = "rayon")]
pub fn partition_value<V: VertexLike + Sync>(
    graph: &SocialGraph<V>,
    partition: &Partition<V>,
) -> usize {
    use rayon::prelude::*;
    let group = group_index(partition);
    let edges: Vec<(&V, &V)> = graph.edge_list().collect();
    edges
        .par_iter()
        .filter(|(u, v)| matches!((group.get(u), group.get(v)), (Some(a), Some(b)) if a == b))
        .count()
}

/// Number of edges with both endpoints in the same group (`V_P`).
///
/// Edges touching a vertex the partition does not cover are not counted.
#[cfg(not(feature = "rayon"))]
pub fn partition_value<V: VertexLike>(graph: &SocialGraph<V>, partition: &Partition<V>) -> usize {
    let group = group_index(partition);
    graph
        .edge_list()
        .filter(|(u, v)| matches!((group.get(u), group.get(v)), (Some(a), Some(b)) if a == b))
        .count()
}

/// Number of edges whose endpoints lie in different groups.
pub fn cut_edges<V: VertexLike>(graph: &SocialGraph<V>, partition: &Partition<V>) -> usize {
    let group = group_index(partition);
    graph
        .edge_list()
        .filter(|(u, v)| matches!((group.get(u), group.get(v)), (Some(a), Some(b)) if a != b))
        .count()
}

/// Group sizes in partition order.
pub fn group_sizes<V>(partition: &Partition<V>) -> Vec<usize> {
    partition.iter().map(Vec::len).collect()
}

/// Checks that `partition` is a valid answer for `graph` and bound `k`.
///
/// Every vertex must appear in exactly one group, no group may mention a
/// vertex outside the graph, and no group may hold more than `k` vertices.
///
/// # Errors
/// [`AssignError::InvalidPartition`] describing the first violation.
pub fn validate_partition<V: VertexLike>(
    graph: &SocialGraph<V>,
    partition: &Partition<V>,
    k: usize,
) -> Result<(), AssignError> {
    if let Some(g) = partition.iter().find(|g| g.len() > k) {
        return Err(AssignError::InvalidPartition(format!(
            "group {g:?} has {} members, more than k = {k}",
            g.len()
        )));
    }
    let counts = partition.iter().flatten().counts();
    if let Some((v, _)) = counts.iter().find(|(_, n)| **n > 1) {
        return Err(AssignError::InvalidPartition(format!(
            "vertex {v:?} appears in more than one group"
        )));
    }
    if let Some(v) = counts.keys().find(|v| !graph.contains_vertex(v)) {
        return Err(AssignError::InvalidPartition(format!(
            "vertex {v:?} is not in the graph"
        )));
    }
    if let Some(v) = graph.vertices().find(|v| !counts.contains_key(v)) {
        return Err(AssignError::InvalidPartition(format!(
            "vertex {v:?} is not assigned to any group"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_fork() -> SocialGraph<u32> {
        SocialGraph::from_edges([(4, 6), (4, 5), (3, 4), (2, 3), (1, 2)]).unwrap()
    }

    #[test]
    fn value_and_cut_add_up() {
        let g = path_fork();
        let p = Partition::from_groups(vec![vec![1, 2], vec![3, 4, 6], vec![5]]);
        assert_eq!(partition_value(&g, &p), 3);
        assert_eq!(cut_edges(&g, &p), 2);
        assert_eq!(group_sizes(&p), vec![2, 3, 1]);
        validate_partition(&g, &p, 3).unwrap();
    }

    #[test]
    fn oversize_group_is_rejected() {
        let g = path_fork();
        let p = Partition::from_groups(vec![vec![1, 2], vec![3, 4, 5, 6]]);
        assert!(matches!(
            validate_partition(&g, &p, 3),
            Err(AssignError::InvalidPartition(_))
        ));
        validate_partition(&g, &p, 4).unwrap();
    }

    #[test]
    fn coverage_errors() {
        let g = path_fork();
        let missing = Partition::from_groups(vec![vec![1, 2], vec![3, 4]]);
        assert!(validate_partition(&g, &missing, 6).is_err());
        let foreign = Partition::singletons(1..=7);
        assert!(validate_partition(&g, &foreign, 6).is_err());
        let twice = Partition::from_groups(vec![vec![1, 2, 3], vec![3, 4, 5, 6]]);
        assert!(validate_partition(&g, &twice, 6).is_err());
    }
}
