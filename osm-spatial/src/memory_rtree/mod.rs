//! In-memory R-Tree implementation.
//!
//! This module provides an R-Tree (Guttman) with quadratic splits:
//! - Arena storage with stable handles and parent back-references
//! - Choose-subtree by least enlargement, then smallest surface
//! - Split propagation that only grows the tree at the root
//! - Overlap queries that skip box tests under fully covered subtrees
//! - Read-only structural views and an integrity checker
//!
//! Entries cannot be deleted; [`SpatialIndex::remove`](crate::SpatialIndex::remove)
//! reports an unsupported operation.

pub mod integrity;
pub mod rtree_config;
pub mod rtree_constants;
mod rtree_impl;
mod rtree_split;
pub mod rtree_types;
pub mod rtree_view;

pub use integrity::IntegrityReport;
pub use rtree_config::RTreeConfig;
pub use rtree_constants::{DEFAULT_MAX_CHILDREN, DEFAULT_MIN_CHILDREN};
pub use rtree_impl::MemoryRTree;
pub use rtree_types::{NodeId, RTreeStats, SpatialError, SpatialResult};
pub use rtree_view::{ChildView, NodeView};
