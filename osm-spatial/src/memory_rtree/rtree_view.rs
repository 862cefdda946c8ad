//! Read-only structural traversal.
//!
//! Exposes the tree shape (ordered children, cached boxes, leaf data) so a
//! caller can snapshot or rebuild an index without touching its internals.

use crate::bounding_box::BoundingBox;

use super::rtree_impl::MemoryRTree;
use super::rtree_types::{InternalNode, Node, NodeId};

/// Borrowed view of one internal node.
pub struct NodeView<'a, T> {
    tree: &'a MemoryRTree<T>,
    id: NodeId,
    node: &'a InternalNode,
}

impl<T> Clone for NodeView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeView<'_, T> {}

impl<T> std::fmt::Debug for NodeView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeView")
            .field("id", &self.id)
            .field("children", &self.node.len())
            .finish()
    }
}

/// A child as stored by its parent: the cached box plus either a node or a leaf.
#[derive(Debug)]
pub enum ChildView<'a, T> {
    /// An internal child and the box its parent caches for it
    Node {
        bbox: BoundingBox,
        node: NodeView<'a, T>,
    },
    /// A leaf entry and the box it was added with
    Leaf { bbox: BoundingBox, data: &'a T },
}

impl<T> ChildView<'_, T> {
    /// The box the parent stores for this child.
    pub fn bbox(&self) -> BoundingBox {
        match self {
            ChildView::Node { bbox, .. } | ChildView::Leaf { bbox, .. } => *bbox,
        }
    }
}

impl<'a, T> NodeView<'a, T> {
    /// Arena handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Tight box around the node's children.
    pub fn bbox(&self) -> BoundingBox {
        self.node.compute_bbox()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.len() == 0
    }

    pub fn is_root(&self) -> bool {
        self.tree.root == Some(self.id)
    }

    /// Handle of the structural parent; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.tree.slot(self.id).parent
    }

    /// Children in stored order.
    pub fn children(&self) -> impl Iterator<Item = ChildView<'a, T>> + 'a {
        let tree = self.tree;
        let node: &'a InternalNode = self.node;
        node.children.iter().map(move |entry| match &tree.slot(entry.child).node {
            Node::Internal(internal) => ChildView::Node {
                bbox: entry.bbox,
                node: NodeView {
                    tree,
                    id: entry.child,
                    node: internal,
                },
            },
            Node::Leaf(leaf) => ChildView::Leaf {
                bbox: entry.bbox,
                data: &leaf.data,
            },
        })
    }
}

impl<T> MemoryRTree<T> {
    /// View of the root node, or `None` when the tree is empty.
    pub fn root(&self) -> Option<NodeView<'_, T>> {
        self.root.and_then(|root| self.node(root))
    }

    /// View of any internal node by handle.
    pub fn node(&self, id: NodeId) -> Option<NodeView<'_, T>> {
        if id.index() >= self.arena.len() {
            return None;
        }
        self.internal(id).map(|node| NodeView {
            tree: self,
            id,
            node,
        })
    }

    /// Every stored `(box, data)` pair in depth-first, stored order.
    pub fn entries(&self) -> Vec<(BoundingBox, &T)> {
        let mut entries = Vec::new();
        if let Some(root) = self.root() {
            collect_entries(root, &mut entries);
        }
        entries
    }
}

fn collect_entries<'a, T>(node: NodeView<'a, T>, entries: &mut Vec<(BoundingBox, &'a T)>) {
    for child in node.children() {
        match child {
            ChildView::Node { node, .. } => collect_entries(node, entries),
            ChildView::Leaf { bbox, data } => entries.push((bbox, data)),
        }
    }
}
