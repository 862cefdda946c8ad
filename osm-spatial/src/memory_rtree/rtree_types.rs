//! Core types and data structures for the in-memory R-Tree.
//!
//! This module defines the fundamental types used throughout the R-Tree:
//! - Error types and result types
//! - Arena handles and node variants (Internal and Leaf)
//! - Statistics structures

use crate::bounding_box::BoundingBox;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur in spatial indexing operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpatialError {
    /// A box that cannot describe an extent was passed in: a NaN coordinate or
    /// a minimum greater than its maximum. Raised before any mutation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The fanout configuration breaks `0 < m <= M/2`.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The operation exists on the interface but has no working implementation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Result type for spatial operations
pub type SpatialResult<T> = Result<T, SpatialError>;

// ============================================================================
// Arena Handles
// ============================================================================

/// Stable handle of a node inside the tree's arena.
///
/// Handles are never reused: nothing is ever freed, so a handle names the same
/// node for the lifetime of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Node Types
// ============================================================================

/// A `(box, child)` pair stored by an internal node.
///
/// The box is the cached tight extent of the subtree rooted at `child`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ChildEntry {
    pub(crate) bbox: BoundingBox,
    pub(crate) child: NodeId,
}

impl ChildEntry {
    pub(crate) fn new(bbox: BoundingBox, child: NodeId) -> Self {
        Self { bbox, child }
    }
}

/// A terminal node pairing a box with the caller's data.
#[derive(Debug, Clone)]
pub(crate) struct LeafEntry<T> {
    pub(crate) bbox: BoundingBox,
    pub(crate) data: T,
}

/// A non-terminal node: an ordered sequence of children with cached boxes.
#[derive(Debug, Clone, Default)]
pub(crate) struct InternalNode {
    pub(crate) children: Vec<ChildEntry>,
}

impl InternalNode {
    pub(crate) fn with_children(children: Vec<ChildEntry>) -> Self {
        Self { children }
    }

    pub(crate) fn len(&self) -> usize {
        self.children.len()
    }

    /// Union of the cached child boxes; the empty box when there are no children.
    pub(crate) fn compute_bbox(&self) -> BoundingBox {
        compute_children_bbox(&self.children)
    }
}

/// Node variants held by the arena.
#[derive(Debug, Clone)]
pub(crate) enum Node<T> {
    /// Internal node containing child references
    Internal(InternalNode),
    /// Leaf entry containing the stored data
    Leaf(LeafEntry<T>),
}

/// An arena slot: a node plus the handle of its structural parent.
///
/// `parent` is navigation only. Ownership always flows from the arena.
#[derive(Debug, Clone)]
pub(crate) struct Slot<T> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) node: Node<T>,
}

impl<T> Slot<T> {
    pub(crate) fn internal(node: InternalNode) -> Self {
        Self {
            parent: None,
            node: Node::Internal(node),
        }
    }

    pub(crate) fn leaf(bbox: BoundingBox, data: T) -> Self {
        Self {
            parent: None,
            node: Node::Leaf(LeafEntry { bbox, data }),
        }
    }

    /// The tightest box available for this node.
    pub(crate) fn bbox(&self) -> BoundingBox {
        match &self.node {
            Node::Internal(internal) => internal.compute_bbox(),
            Node::Leaf(leaf) => leaf.bbox,
        }
    }
}

pub(crate) fn compute_children_bbox(children: &[ChildEntry]) -> BoundingBox {
    let mut bbox = BoundingBox::empty();
    for c in children {
        bbox.expand(&c.bbox);
    }
    bbox
}

// ============================================================================
// Statistics
// ============================================================================

/// Statistics about the shape of an R-Tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RTreeStats {
    /// Number of leaf entries reachable from the root
    pub total_entries: u64,
    /// Number of internal nodes reachable from the root
    pub internal_nodes: u64,
    /// Internal levels above the leaves (0 for an empty tree)
    pub tree_height: u32,
    /// Configured maximum fanout M
    pub max_children: usize,
    /// Configured minimum fanout m
    pub min_children: usize,
}
