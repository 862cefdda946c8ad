//! Structural integrity checks for the in-memory R-Tree.
//!
//! Walks the tree from the root and verifies:
//! - every cached child box equals the union of its subtree (tightness)
//! - every non-root node holds between m and M children (fanout)
//! - every leaf sits at the same depth (balance)
//! - every child names its true parent (parent links)
//! - the root is an internal node without a parent

use crate::bounding_box::BoundingBox;

use super::rtree_impl::MemoryRTree;
use super::rtree_types::{Node, NodeId};

// ============================================================================
// Integrity Checking
// ============================================================================

/// Result of integrity check operation
#[derive(Debug, Clone)]
pub struct IntegrityReport {
    /// Internal nodes visited
    pub nodes_checked: u64,
    /// Leaf entries visited
    pub leaves_checked: u64,
    /// Depth shared by all leaves, if they agree
    pub leaf_depth: Option<u32>,
    /// Summary of findings
    pub is_valid: bool,
    /// Detailed error messages
    pub errors: Vec<String>,
}

impl IntegrityReport {
    pub fn new() -> Self {
        Self {
            nodes_checked: 0,
            leaves_checked: 0,
            leaf_depth: None,
            is_valid: true,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, message: String) {
        self.is_valid = false;
        self.errors.push(message);
    }
}

impl Default for IntegrityReport {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemoryRTree<T> {
    /// Checks every structural invariant and reports all violations found.
    pub fn check_integrity(&self) -> IntegrityReport {
        let mut report = IntegrityReport::new();
        let Some(root) = self.root else {
            return report;
        };

        if self.slot(root).parent.is_some() {
            report.fail(format!("Root {} has a parent", root));
        }
        if self.internal(root).is_none() {
            report.fail(format!("Root {} is a leaf", root));
            return report;
        }

        self.check_node(root, 0, &mut report);
        if !report.is_valid {
            log::debug!("Integrity check found {} problems", report.errors.len());
        }
        report
    }

    /// Returns the true box of the subtree at `node`, recomputed from the leaves.
    fn check_node(&self, node: NodeId, depth: u32, report: &mut IntegrityReport) -> BoundingBox {
        let internal = match &self.slot(node).node {
            Node::Leaf(leaf) => {
                report.leaves_checked += 1;
                let seen = report.leaf_depth;
                match seen {
                    None => report.leaf_depth = Some(depth),
                    Some(expected) if expected != depth => report.fail(format!(
                        "Leaf {} at depth {} but other leaves at depth {}",
                        node, depth, expected
                    )),
                    Some(_) => {}
                }
                return leaf.bbox;
            }
            Node::Internal(internal) => internal,
        };
        report.nodes_checked += 1;

        let count = internal.len();
        let is_root = self.root == Some(node);
        if count > self.config.max_children() {
            report.fail(format!(
                "Node {} has {} children, more than {}",
                node,
                count,
                self.config.max_children()
            ));
        }
        if !is_root && count < self.config.min_children() {
            report.fail(format!(
                "Node {} has {} children, fewer than {}",
                node,
                count,
                self.config.min_children()
            ));
        }
        if is_root && count == 0 {
            report.fail(format!("Root {} has no children", node));
        }

        let mut actual = BoundingBox::empty();
        for entry in &internal.children {
            if self.slot(entry.child).parent != Some(node) {
                report.fail(format!(
                    "Child {} of node {} names parent {:?}",
                    entry.child,
                    node,
                    self.slot(entry.child).parent
                ));
            }

            let child_box = self.check_node(entry.child, depth + 1, report);
            if child_box != entry.bbox {
                report.fail(format!(
                    "Node {} caches {} for child {} but its subtree spans {}",
                    node, entry.bbox, entry.child, child_box
                ));
            }
            actual.expand(&child_box);
        }
        actual
    }
}
