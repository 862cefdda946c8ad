//! SpatialIndex trait definition for box-keyed lookups.

use std::collections::HashSet;
use std::hash::Hash;

use crate::bounding_box::BoundingBox;
use crate::memory_rtree::SpatialResult;

/// Represents a spatial index that stores items keyed by bounding boxes.
///
/// Items are held by value and handed back by reference; an index never clones
/// the data it stores.
pub trait SpatialIndex<T: Eq + Hash> {
    /// Adds an item with the corresponding box.
    ///
    /// Fails with `InvalidArgument` before touching the index when `key` has a
    /// NaN coordinate or a minimum above its maximum.
    fn add(&mut self, key: &BoundingBox, data: T) -> SpatialResult<()>;

    /// Returns the distinct items whose box overlaps `key`.
    ///
    /// Items stored more than once collapse to a single occurrence.
    fn get(&self, key: &BoundingBox) -> SpatialResult<HashSet<&T>>;

    /// Gets the number of stored entries.
    fn count(&self) -> usize;

    /// Removes the given item.
    fn remove(&mut self, item: &T) -> SpatialResult<bool>;
}
