//! Constants for the in-memory R-Tree implementation.

/// Default maximum number of children per internal node (M)
pub const DEFAULT_MAX_CHILDREN: usize = 50;

/// Default minimum number of children per non-root internal node (m)
pub const DEFAULT_MIN_CHILDREN: usize = 20;

/// Smallest usable maximum fanout: a split needs two groups of at least one
pub const MIN_MAX_CHILDREN: usize = 2;
