//! Partition extraction from the final level graph.

use std::fmt::Debug;

use hashbrown::HashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::level::LevelGraph;
use super::node::NodeArena;
use crate::assign_error::AssignError;
use crate::debug_invariants::DebugInvariants;

/// Disjoint groups of vertices, the output of an assignment run.
///
/// Groups are sorted internally and the groups themselves are sorted
/// lexicographically, so two partitions with the same grouping compare equal.
/// Serializes as a plain list of lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition<V> {
    groups: Vec<Vec<V>>,
}

impl<V> Default for Partition<V> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<V: Ord> Partition<V> {
    /// Normalizes `groups` into canonical order; empty groups are dropped.
    pub fn from_groups<I: IntoIterator<Item = Vec<V>>>(groups: I) -> Self {
        let groups = groups
            .into_iter()
            .filter(|g| !g.is_empty())
            .map(|mut g| {
                g.sort();
                g
            })
            .sorted()
            .collect();
        Self { groups }
    }

    /// One singleton group per vertex.
    pub fn singletons<I: IntoIterator<Item = V>>(vertices: I) -> Self {
        Self::from_groups(vertices.into_iter().map(|v| vec![v]))
    }

    /// The group holding `v`, if any.
    pub fn group_of(&self, v: &V) -> Option<&[V]> {
        self.groups
            .iter()
            .find(|g| g.binary_search(v).is_ok())
            .map(Vec::as_slice)
    }
}

impl<V> Partition<V> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[Vec<V>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<V>> {
        self.groups.iter()
    }

    pub fn into_inner(self) -> Vec<Vec<V>> {
        self.groups
    }

    /// Size of the largest group (0 when empty).
    pub fn largest_group(&self) -> usize {
        self.groups.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of vertices across all groups.
    pub fn vertex_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

impl<V> IntoIterator for Partition<V> {
    type Item = Vec<V>;
    type IntoIter = std::vec::IntoIter<Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Partition<V> {
    type Item = &'a Vec<V>;
    type IntoIter = std::slice::Iter<'a, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl<V> From<Partition<V>> for Vec<Vec<V>> {
    fn from(p: Partition<V>) -> Self {
        p.groups
    }
}

impl<V: Ord + std::hash::Hash + Debug> DebugInvariants for Partition<V> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Partition invalid");
    }

    fn validate_invariants(&self) -> Result<(), AssignError> {
        let mut seen = HashSet::with_capacity(self.vertex_count());
        for g in &self.groups {
            if g.is_empty() {
                return Err(AssignError::InvalidPartition("empty group".into()));
            }
            if !g.iter().tuple_windows().all(|(a, b)| a < b) {
                return Err(AssignError::InvalidPartition(format!("group {g:?} is not sorted")));
            }
            if let Some(dup) = g.iter().find(|v| !seen.insert(*v)) {
                return Err(AssignError::InvalidPartition(format!(
                    "vertex {dup:?} appears in more than one group"
                )));
            }
        }
        if !self.groups.iter().tuple_windows().all(|(a, b)| a < b) {
            return Err(AssignError::InvalidPartition("groups are not sorted".into()));
        }
        Ok(())
    }
}

/// Expands every node of the final level into the vertices it stands for.
///
/// One group per node; pairing trees are walked down to their leaves, then
/// the groups are put into canonical order.
pub fn flatten<V: Ord + Clone>(arena: &NodeArena<V>, level: &LevelGraph) -> Partition<V> {
    Partition::from_groups(level.node_order().iter().map(|&n| arena.leaf_values(n)))
}
