//! MemoryRTree implementation.

use std::collections::HashSet;
use std::hash::Hash;

use crate::bounding_box::BoundingBox;
use crate::spatial_index::SpatialIndex;

use super::rtree_config::RTreeConfig;
use super::rtree_split::quadratic_split;
use super::rtree_types::{
    ChildEntry, InternalNode, Node, NodeId, RTreeStats, Slot, SpatialError, SpatialResult,
};

/// In-memory R-Tree keyed by 2D bounding boxes.
///
/// Nodes live in an arena and refer to each other through [`NodeId`] handles.
/// Each slot records its parent handle, so upward propagation after an insert
/// never needs a reference cycle.
///
/// The root is absent while the tree is empty and is always an internal node
/// afterwards, even when it holds a single leaf.
///
/// The tree is single-threaded and has no interior mutability. Wrap it in
/// [`SharedRTree`](crate::SharedRTree) when several threads need it.
#[derive(Debug, Clone)]
pub struct MemoryRTree<T> {
    pub(super) config: RTreeConfig,
    pub(super) root: Option<NodeId>,
    pub(super) arena: Vec<Slot<T>>,
}

impl<T> Default for MemoryRTree<T> {
    fn default() -> Self {
        Self {
            config: RTreeConfig::default(),
            root: None,
            arena: Vec::new(),
        }
    }
}

impl<T> MemoryRTree<T> {
    /// Creates an empty tree with the default fanout (M = 50, m = 20).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree after validating `config`.
    pub fn with_config(config: RTreeConfig) -> SpatialResult<Self> {
        config.validate()?;
        log::debug!(
            "Creating in-memory R-Tree with max children {} and min children {}",
            config.max_children(),
            config.min_children()
        );
        Ok(Self {
            config,
            root: None,
            arena: Vec::new(),
        })
    }

    /// Creates an empty tree with maximum fanout `max_children` (M) and
    /// minimum fanout `min_children` (m).
    pub fn with_fanout(max_children: usize, min_children: usize) -> SpatialResult<Self> {
        Self::with_config(
            RTreeConfig::new()
                .with_max_children(max_children)
                .with_min_children(min_children),
        )
    }

    /// Returns the fanout configuration.
    pub fn config(&self) -> &RTreeConfig {
        &self.config
    }

    /// Returns `true` when nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of internal levels above the leaves; 0 for an empty tree.
    pub fn height(&self) -> u32 {
        let mut height = 0;
        let mut current = self.root;
        while let Some(id) = current {
            match &self.slot(id).node {
                Node::Internal(internal) => {
                    height += 1;
                    current = internal.children.first().map(|entry| entry.child);
                }
                Node::Leaf(_) => break,
            }
        }
        height
    }

    /// The tight box around everything stored, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.root.map(|root| self.node_bbox(root))
    }

    /// Collects shape statistics by walking the whole tree.
    pub fn stats(&self) -> RTreeStats {
        let mut stats = RTreeStats {
            tree_height: self.height(),
            max_children: self.config.max_children(),
            min_children: self.config.min_children(),
            ..RTreeStats::default()
        };
        if let Some(root) = self.root {
            self.collect_stats(root, &mut stats);
        }
        stats
    }

    fn collect_stats(&self, node: NodeId, stats: &mut RTreeStats) {
        match &self.slot(node).node {
            Node::Leaf(_) => stats.total_entries += 1,
            Node::Internal(internal) => {
                stats.internal_nodes += 1;
                for entry in &internal.children {
                    self.collect_stats(entry.child, stats);
                }
            }
        }
    }

    // ========================================================================
    // Arena access
    // ========================================================================

    pub(super) fn slot(&self, id: NodeId) -> &Slot<T> {
        &self.arena[id.index()]
    }

    pub(super) fn internal(&self, id: NodeId) -> Option<&InternalNode> {
        match &self.slot(id).node {
            Node::Internal(internal) => Some(internal),
            Node::Leaf(_) => None,
        }
    }

    fn internal_mut(&mut self, id: NodeId) -> Option<&mut InternalNode> {
        match &mut self.arena[id.index()].node {
            Node::Internal(internal) => Some(internal),
            Node::Leaf(_) => None,
        }
    }

    fn allocate(&mut self, slot: Slot<T>) -> NodeId {
        let id = NodeId::new(self.arena.len());
        self.arena.push(slot);
        id
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.arena[child.index()].parent = Some(parent);
    }

    fn child_count(&self, id: NodeId) -> usize {
        self.internal(id).map_or(0, InternalNode::len)
    }

    /// The tightest box available for `id`, computed from its cached child boxes.
    pub(super) fn node_bbox(&self, id: NodeId) -> BoundingBox {
        self.slot(id).bbox()
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Descends from `start` to the internal node best suited to receive `bbox`.
    ///
    /// At each level the internal child needing the least enlargement wins,
    /// ties going to the smaller surface and then to the earlier child. A node
    /// without internal children (no children at all, or only leaves) is the
    /// insertion point.
    fn choose_subtree(&self, start: NodeId, bbox: &BoundingBox) -> NodeId {
        let mut current = start;
        loop {
            let Some(node) = self.internal(current) else {
                return current;
            };

            let mut best: Option<(NodeId, f64, f64)> = None;
            for entry in &node.children {
                if self.internal(entry.child).is_none() {
                    continue;
                }
                let enlargement = entry.bbox.enlargement(bbox);
                let surface = entry.bbox.surface();
                let better = match best {
                    None => true,
                    Some((_, best_enlargement, best_surface)) => {
                        enlargement < best_enlargement
                            || (enlargement == best_enlargement && surface < best_surface)
                    }
                };
                if better {
                    best = Some((entry.child, enlargement, surface));
                }
            }

            match best {
                Some((child, _, _)) => current = child,
                None => return current,
            }
        }
    }

    /// Appends `(bbox, child)` to `node` and repairs the path to the root.
    ///
    /// Returns the handle of a new root when the split cascade reached the top.
    fn insert(&mut self, node: NodeId, bbox: BoundingBox, child: NodeId) -> Option<NodeId> {
        let max_children = self.config.max_children();
        let entry = ChildEntry::new(bbox, child);

        let mut sibling = if self.child_count(node) >= max_children {
            Some(self.split(node, entry))
        } else {
            self.attach(node, entry);
            None
        };

        let mut current = node;
        while let Some(parent) = self.slot(current).parent {
            self.tighten_for(parent, current);

            if let Some(split_off) = sibling.take() {
                let entry = ChildEntry::new(self.node_bbox(split_off), split_off);
                if self.child_count(parent) >= max_children {
                    sibling = Some(self.split(parent, entry));
                } else {
                    self.attach(parent, entry);
                }
            }
            current = parent;
        }

        sibling.map(|split_off| self.grow_root(current, split_off))
    }

    fn attach(&mut self, parent: NodeId, entry: ChildEntry) {
        if let Some(node) = self.internal_mut(parent) {
            node.children.push(entry);
        }
        self.set_parent(entry.child, parent);
    }

    /// Splits the full node `node` while adding `overflow`, keeping the first
    /// group in place and returning a new, unattached sibling with the second.
    fn split(&mut self, node: NodeId, overflow: ChildEntry) -> NodeId {
        let mut entries = self
            .internal_mut(node)
            .map(|internal| std::mem::take(&mut internal.children))
            .unwrap_or_default();
        entries.push(overflow);

        let (kept, moved) = quadratic_split(entries, self.config.min_children());
        log::debug!(
            "Splitting node {} into groups of {} and {}",
            node,
            kept.len(),
            moved.len()
        );

        for entry in &kept {
            self.set_parent(entry.child, node);
        }
        if let Some(internal) = self.internal_mut(node) {
            internal.children = kept;
        }

        let moved_children: Vec<NodeId> = moved.iter().map(|entry| entry.child).collect();
        let sibling = self.allocate(Slot::internal(InternalNode::with_children(moved)));
        for child in moved_children {
            self.set_parent(child, sibling);
        }
        sibling
    }

    /// Creates a root above `old_root` and `sibling`, adding one level.
    fn grow_root(&mut self, old_root: NodeId, sibling: NodeId) -> NodeId {
        let children = vec![
            ChildEntry::new(BoundingBox::empty(), old_root),
            ChildEntry::new(BoundingBox::empty(), sibling),
        ];
        let root = self.allocate(Slot::internal(InternalNode::with_children(children)));
        self.set_parent(old_root, root);
        self.set_parent(sibling, root);
        self.tighten(root);

        log::debug!("Grew new root {} above {} and {}", root, old_root, sibling);
        root
    }

    /// Recomputes every cached child box of `node` from the children themselves.
    pub(super) fn tighten(&mut self, node: NodeId) {
        let boxes: Vec<BoundingBox> = match self.internal(node) {
            Some(internal) => internal
                .children
                .iter()
                .map(|entry| self.node_bbox(entry.child))
                .collect(),
            None => return,
        };
        if let Some(internal) = self.internal_mut(node) {
            for (entry, bbox) in internal.children.iter_mut().zip(boxes) {
                entry.bbox = bbox;
            }
        }
    }

    /// Recomputes the cached box `parent` keeps for `child`.
    fn tighten_for(&mut self, parent: NodeId, child: NodeId) {
        let bbox = self.node_bbox(child);
        if let Some(internal) = self.internal_mut(parent) {
            if let Some(entry) = internal.children.iter_mut().find(|e| e.child == child) {
                entry.bbox = bbox;
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Recursive search for overlapping entries.
    ///
    /// Children entirely inside the query are gathered without further box
    /// tests; leaves reached through an overlapping entry are taken as is.
    fn range_query<'a>(&'a self, node: NodeId, query: &BoundingBox, results: &mut HashSet<&'a T>)
    where
        T: Eq + Hash,
    {
        let Some(internal) = self.internal(node) else {
            return;
        };

        for entry in &internal.children {
            if !entry.bbox.overlaps(query) {
                continue;
            }
            if entry.bbox.is_inside(query) {
                self.collect_all(entry.child, results);
                continue;
            }
            match &self.slot(entry.child).node {
                Node::Internal(_) => self.range_query(entry.child, query, results),
                Node::Leaf(leaf) => {
                    results.insert(&leaf.data);
                }
            }
        }
    }

    /// Gathers every item under `node` unconditionally.
    fn collect_all<'a>(&'a self, node: NodeId, results: &mut HashSet<&'a T>)
    where
        T: Eq + Hash,
    {
        match &self.slot(node).node {
            Node::Leaf(leaf) => {
                results.insert(&leaf.data);
            }
            Node::Internal(internal) => {
                for entry in &internal.children {
                    self.collect_all(entry.child, results);
                }
            }
        }
    }

    /// Counts the data-carrying descendants of `node`.
    fn count_leaves(&self, node: NodeId) -> usize {
        match &self.slot(node).node {
            Node::Leaf(_) => 1,
            Node::Internal(internal) => internal
                .children
                .iter()
                .map(|entry| self.count_leaves(entry.child))
                .sum(),
        }
    }
}

fn validate_key(key: &BoundingBox, operation: &str) -> SpatialResult<()> {
    if key.is_valid() {
        Ok(())
    } else {
        Err(SpatialError::InvalidArgument(format!(
            "{} requires a valid bounding box, got {}",
            operation, key
        )))
    }
}

impl<T: Eq + Hash> SpatialIndex<T> for MemoryRTree<T> {
    fn add(&mut self, key: &BoundingBox, data: T) -> SpatialResult<()> {
        validate_key(key, "add")?;

        let root = match self.root {
            Some(root) => root,
            None => {
                let root = self.allocate(Slot::internal(InternalNode::default()));
                self.root = Some(root);
                root
            }
        };

        let target = self.choose_subtree(root, key);
        log::trace!("Inserting {} below node {}", key, target);

        let leaf = self.allocate(Slot::leaf(*key, data));
        if let Some(new_root) = self.insert(target, *key, leaf) {
            self.root = Some(new_root);
            log::debug!("R-Tree height is now {}", self.height());
        }
        Ok(())
    }

    fn get(&self, key: &BoundingBox) -> SpatialResult<HashSet<&T>> {
        validate_key(key, "get")?;

        let mut results = HashSet::new();
        if let Some(root) = self.root {
            self.range_query(root, key, &mut results);
        }
        log::trace!("Query {} matched {} items", key, results.len());
        Ok(results)
    }

    fn count(&self) -> usize {
        self.root.map_or(0, |root| self.count_leaves(root))
    }

    fn remove(&mut self, _item: &T) -> SpatialResult<bool> {
        log::warn!("remove called on an in-memory R-Tree, which cannot delete entries");
        Err(SpatialError::UnsupportedOperation(
            "the in-memory R-Tree does not support removing entries".into(),
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
