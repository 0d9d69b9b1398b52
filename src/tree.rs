//! Huffman tree construction.
//!
//! The tree is an arena: nodes live in a `Vec` and refer to their children
//! by [`NodeId`]. Leaves are pushed first, in heap-seeding order, and every
//! merge appends one internal node, so a tree with `n` leaves holds exactly
//! `2n - 1` nodes.
//!
//! # Tie-breaking
//!
//! Equal-frequency subtrees are dequeued in an unspecified order. Two builds
//! from the same table may produce different shapes, both optimal; only the
//! prefix property and the round-trip are guaranteed.

use std::collections::BinaryHeap;

use log::debug;

use crate::frequency::FrequencyTable;
use crate::Symbol;

/// Index of a node inside a [`HuffmanTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its frequency.
    Leaf {
        /// The symbol this leaf decodes to.
        symbol: Symbol,
        /// Occurrence count of `symbol`.
        freq: u64,
    },
    /// A merge of two subtrees.
    Internal {
        /// Sum of the children's frequencies.
        freq: u64,
        /// Subtree reached on a 0 bit.
        left: NodeId,
        /// Subtree reached on a 1 bit.
        right: NodeId,
    },
}

impl Node {
    /// Aggregate frequency of the subtree rooted here.
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Heap entry referring to a subtree root in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    freq: u64,
    id: NodeId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-priority queue
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.id.0.cmp(&self.id.0))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A binary prefix-code tree over the symbols of a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    size: usize,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lowest-frequency subtrees.
    ///
    /// Returns `None` for an empty table. A table with a single symbol gives a
    /// tree whose root is a leaf.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        if frequencies.is_empty() {
            return None;
        }

        let size = frequencies.len();
        let mut nodes = Vec::with_capacity(2 * size - 1);
        let mut pq = BinaryHeap::with_capacity(size);
        for (symbol, freq) in frequencies.iter() {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf { symbol, freq });
            pq.push(Pending { freq, id });
        }

        while pq.len() > 1 {
            let (Some(left), Some(right)) = (pq.pop(), pq.pop()) else {
                break;
            };
            let freq = left.freq + right.freq;
            let id = NodeId(nodes.len());
            nodes.push(Node::Internal {
                freq,
                left: left.id,
                right: right.id,
            });
            pq.push(Pending { freq, id });
        }

        let root = pq.pop()?.id;
        let tree = Self { nodes, root, size };
        debug!(
            "built huffman tree: {} leaves, {} nodes, depth {}",
            tree.size,
            tree.nodes.len(),
            tree.depth()
        );
        Some(tree)
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node stored at `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when the tree is a single leaf.
    pub fn is_singleton(&self) -> bool {
        self.node(self.root).is_leaf()
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Frequency of the root, i.e. the length of the analyzed stream.
    pub fn total_freq(&self) -> u64 {
        self.node(self.root).freq()
    }

    /// `(symbol, freq)` of every leaf.
    pub fn leaves(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            Node::Leaf { symbol, freq } => Some((*symbol, *freq)),
            Node::Internal { .. } => None,
        })
    }

    /// Length in edges of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, d)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { .. } => max = max.max(d),
                Node::Internal { left, right, .. } => {
                    stack.push((*left, d + 1));
                    stack.push((*right, d + 1));
                }
            }
        }
        max
    }
}
