//! Lock-guarded handle over a [`MemoryRTree`].

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::bounding_box::BoundingBox;
use crate::memory_rtree::{MemoryRTree, RTreeConfig, SpatialResult};
use crate::spatial_index::SpatialIndex;

/// Cloneable, thread-safe handle to an in-memory R-Tree.
///
/// A single reader/writer lock serializes access: any number of queries run
/// together, while an `add` excludes everything else. The tree itself is
/// unchanged; this only supplies the external exclusion it requires.
///
/// Query results borrow from the tree, so they are handed to a closure that
/// runs while the read lock is held.
///
/// # Examples
///
/// ```rust
/// use osm_spatial::{BoundingBox, SharedRTree};
///
/// let index = SharedRTree::new();
/// index.add(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), "cafe").unwrap();
///
/// let hits = index
///     .query(&BoundingBox::new(0.5, 0.5, 2.0, 2.0), |found| found.len())
///     .unwrap();
/// assert_eq!(hits, 1);
/// ```
pub struct SharedRTree<T> {
    inner: Arc<RwLock<MemoryRTree<T>>>,
}

impl<T> Clone for SharedRTree<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedRTree<T> {
    fn default() -> Self {
        Self::from_tree(MemoryRTree::new())
    }
}

impl<T> SharedRTree<T> {
    /// Creates a handle over an empty tree with the default fanout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle over an empty tree after validating `config`.
    pub fn with_config(config: RTreeConfig) -> SpatialResult<Self> {
        Ok(Self::from_tree(MemoryRTree::with_config(config)?))
    }

    /// Takes ownership of an existing tree.
    pub fn from_tree(tree: MemoryRTree<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Acquires the read lock for direct access to the tree.
    pub fn read(&self) -> RwLockReadGuard<'_, MemoryRTree<T>> {
        self.inner.read()
    }

    /// Acquires the write lock for direct access to the tree.
    pub fn write(&self) -> RwLockWriteGuard<'_, MemoryRTree<T>> {
        self.inner.write()
    }
}

impl<T: Eq + Hash> SharedRTree<T> {
    /// Adds an item under the write lock.
    pub fn add(&self, key: &BoundingBox, data: T) -> SpatialResult<()> {
        self.inner.write().add(key, data)
    }

    /// Runs `f` over the overlapping items while holding the read lock.
    pub fn query<R>(&self, key: &BoundingBox, f: impl FnOnce(HashSet<&T>) -> R) -> SpatialResult<R> {
        let tree = self.inner.read();
        let found = tree.get(key)?;
        Ok(f(found))
    }

    /// Gets the number of stored entries under the read lock.
    pub fn count(&self) -> usize {
        self.inner.read().count()
    }
}
