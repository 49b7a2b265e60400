//! Composite nodes of the level graphs.
//!
//! A node is either an original vertex or the merge of two earlier nodes, so
//! every node is the root of a binary pairing tree whose leaves are the
//! vertices it stands for. Nodes live in a [`NodeArena`] and are addressed by
//! [`NodeId`] handles; level graphs only ever store handles.

/// Handle to a node stored in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node inside its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind<V> {
    /// An original vertex.
    Leaf(V),
    /// Two nodes merged in some round.
    Pair(NodeId, NodeId),
}

/// Append-only storage for leaves and composite pairs.
///
/// Also records how many leaves sit under each node, so group sizes are known
/// without walking the tree.
#[derive(Debug, Clone)]
pub struct NodeArena<V> {
    kinds: Vec<NodeKind<V>>,
    sizes: Vec<usize>,
}

impl<V> Default for NodeArena<V> {
    fn default() -> Self {
        Self {
            kinds: Vec::new(),
            sizes: Vec::new(),
        }
    }
}

impl<V> NodeArena<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            kinds: Vec::with_capacity(cap),
            sizes: Vec::with_capacity(cap),
        }
    }

    /// Stores an original vertex.
    pub fn leaf(&mut self, v: V) -> NodeId {
        self.push(NodeKind::Leaf(v), 1)
    }

    /// Stores the merge of `a` and `b`.
    ///
    /// Both handles must come from this arena.
    pub fn pair(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let size = self.size(a) + self.size(b);
        self.push(NodeKind::Pair(a, b), size)
    }

    fn push(&mut self, kind: NodeKind<V>, size: usize) -> NodeId {
        let id = NodeId(self.kinds.len());
        self.kinds.push(kind);
        self.sizes.push(size);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeKind<V>> {
        self.kinds.get(id.0)
    }

    /// Number of original vertices under `id` (0 for a foreign handle).
    pub fn size(&self, id: NodeId) -> usize {
        self.sizes.get(id.0).copied().unwrap_or(0)
    }

    pub fn is_composite(&self, id: NodeId) -> bool {
        matches!(self.get(id), Some(NodeKind::Pair(..)))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Leaves under `id`, left subtree first.
    ///
    /// Uses an explicit stack; pairing trees can be as deep as the number of
    /// rounds.
    pub fn leaves(&self, id: NodeId) -> Vec<&V> {
        let mut out = Vec::with_capacity(self.size(id));
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            match self.get(cur) {
                Some(NodeKind::Leaf(v)) => out.push(v),
                Some(NodeKind::Pair(a, b)) => {
                    stack.push(*b);
                    stack.push(*a);
                }
                None => {}
            }
        }
        out
    }
}

impl<V: Clone> NodeArena<V> {
    /// Owned copy of the leaves under `id`.
    pub fn leaf_values(&self, id: NodeId) -> Vec<V> {
        self.leaves(id).into_iter().cloned().collect()
    }
}
