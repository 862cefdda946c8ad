//! Fanout configuration for [`MemoryRTree`](super::MemoryRTree).

use super::rtree_constants::{DEFAULT_MAX_CHILDREN, DEFAULT_MIN_CHILDREN, MIN_MAX_CHILDREN};
use super::rtree_types::{SpatialError, SpatialResult};

/// R-Tree fanout configuration.
///
/// Holds the maximum fanout `M` and the minimum fanout `m`. The quadratic split
/// only guarantees two groups of at least `m` members when `0 < m <= M/2`, so a
/// configuration is validated before a tree is built from it.
///
/// # Examples
///
/// ```rust
/// use osm_spatial::RTreeConfig;
///
/// let config = RTreeConfig::new().with_max_children(8).with_min_children(3);
/// assert!(config.validate().is_ok());
///
/// let broken = RTreeConfig::new().with_max_children(8).with_min_children(5);
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RTreeConfig {
    max_children: usize,
    min_children: usize,
}

impl Default for RTreeConfig {
    fn default() -> Self {
        Self {
            max_children: DEFAULT_MAX_CHILDREN,
            min_children: DEFAULT_MIN_CHILDREN,
        }
    }
}

impl RTreeConfig {
    /// Creates a configuration with the default fanout (M = 50, m = 20).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of children per node (M).
    #[inline]
    pub fn with_max_children(mut self, max_children: usize) -> Self {
        self.max_children = max_children;
        self
    }

    /// Sets the minimum number of children per non-root node (m).
    #[inline]
    pub fn with_min_children(mut self, min_children: usize) -> Self {
        self.min_children = min_children;
        self
    }

    /// Returns the maximum fanout M.
    #[inline]
    pub fn max_children(&self) -> usize {
        self.max_children
    }

    /// Returns the minimum fanout m.
    #[inline]
    pub fn min_children(&self) -> usize {
        self.min_children
    }

    /// Checks `M >= 2` and `0 < m <= M/2`.
    pub fn validate(&self) -> SpatialResult<()> {
        if self.max_children < MIN_MAX_CHILDREN {
            return Err(SpatialError::InvalidConfiguration(format!(
                "max children must be at least {}, got {}",
                MIN_MAX_CHILDREN, self.max_children
            )));
        }
        if self.min_children == 0 {
            return Err(SpatialError::InvalidConfiguration(
                "min children must be greater than zero".into(),
            ));
        }
        if self.min_children > self.max_children / 2 {
            return Err(SpatialError::InvalidConfiguration(format!(
                "min children {} exceeds half of max children {}",
                self.min_children, self.max_children
            )));
        }
        Ok(())
    }
}
