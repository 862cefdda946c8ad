//! # OSM Spatial - In-Memory Spatial Index for Map Features
//!
//! This crate provides an R-Tree that stores arbitrary items keyed by 2D
//! axis-aligned bounding boxes and answers "what overlaps this box" queries
//! without scanning every item. It is used to find map features inside a
//! viewport or region.
//!
//! ## Features
//!
//! - **Balanced**: splits propagate upward and only grow the tree at the root
//! - **Quadratic Split**: Guttman's seed-and-distribute heuristic for tight boxes
//! - **Arena Storage**: nodes addressed by stable handles, no reference cycles
//! - **Set Queries**: each item is reported once, even if stored twice
//! - **Structural Views**: read-only traversal for snapshots and rebuilds
//! - **Integrity Checks**: verify tightness, fanout, balance and parent links
//!
//! ## R-Tree API
//!
//! ```rust
//! use osm_spatial::{BoundingBox, MemoryRTree, SpatialIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut index = MemoryRTree::new();
//!
//! // Add entries
//! index.add(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), "a")?;
//! index.add(&BoundingBox::new(10.0, 10.0, 11.0, 11.0), "b")?;
//! index.add(&BoundingBox::new(20.0, 20.0, 21.0, 21.0), "c")?;
//!
//! // Find overlapping entries
//! let found = index.get(&BoundingBox::new(0.0, 0.0, 1.0, 1.0))?;
//! assert_eq!(found.len(), 1);
//! assert!(found.contains(&"a"));
//! assert_eq!(index.count(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! Deletion is not implemented: [`SpatialIndex::remove`] always returns
//! [`SpatialError::UnsupportedOperation`].

// Core R-Tree modules
pub mod bounding_box;
pub mod memory_rtree;
pub mod spatial_index;

// Concurrency wrapper
pub mod shared_rtree;

// Re-export R-Tree types
pub use bounding_box::BoundingBox;
pub use memory_rtree::{
    ChildView, IntegrityReport, MemoryRTree, NodeId, NodeView, RTreeConfig, RTreeStats,
    SpatialError, SpatialResult,
};
pub use spatial_index::SpatialIndex;

pub use shared_rtree::SharedRTree;
