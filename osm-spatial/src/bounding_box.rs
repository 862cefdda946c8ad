use std::hash::Hash;

/// A 2D axis-aligned bounding box represented by minimum and maximum coordinates.
///
/// `BoundingBox` is the key type of the spatial index: every stored item carries
/// one, every internal node caches the union of the boxes below it, and queries
/// are expressed as boxes.
///
/// All arithmetic is plain IEEE-754 `f64` with no epsilon. The R-Tree split and
/// subtree selection compare [`surface`](BoundingBox::surface) values with exact
/// `<`/`>`, so identical inputs always produce identical trees.
///
/// # Examples
///
/// ```rust
/// use osm_spatial::BoundingBox;
///
/// let viewport = BoundingBox::new(4.0, 50.0, 5.0, 51.0);
/// let feature = BoundingBox::new(4.5, 50.5, 4.6, 50.6);
///
/// assert!(viewport.overlaps(&feature));
/// assert!(feature.is_inside(&viewport));
/// ```
#[derive(Clone, Copy, PartialEq, Default, Debug, serde::Deserialize, serde::Serialize)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl Eq for BoundingBox {}

impl PartialOrd for BoundingBox {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BoundingBox {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.min_x
            .total_cmp(&other.min_x)
            .then(self.min_y.total_cmp(&other.min_y))
            .then(self.max_x.total_cmp(&other.max_x))
            .then(self.max_y.total_cmp(&other.max_y))
    }
}

impl Hash for BoundingBox {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.min_x.to_bits().hash(state);
        self.min_y.to_bits().hash(state);
        self.max_x.to_bits().hash(state);
        self.max_y.to_bits().hash(state);
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundingBox({}, {}, {}, {})", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

impl BoundingBox {
    /// Creates a new bounding box with the specified coordinates.
    ///
    /// No validation happens here; use [`is_valid`](BoundingBox::is_valid) to
    /// check a box before handing it to an index.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Returns the identity element of [`union`](BoundingBox::union).
    ///
    /// The empty box has inverted infinite bounds, so `empty().union(b) == b`
    /// for every valid `b`.
    pub fn empty() -> BoundingBox {
        BoundingBox {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Returns `true` for the inverted box produced by [`empty`](BoundingBox::empty).
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the surface (area) of the bounding box.
    ///
    /// The empty box has surface `0.0`.
    pub fn surface(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.width() * self.height()
    }

    /// Returns the area of the bounding box. Same as [`surface`](BoundingBox::surface).
    pub fn area(&self) -> f64 {
        self.surface()
    }

    /// Returns the center point of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Checks if this bounding box contains a point.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Checks if this bounding box fully contains another bounding box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.min_x >= self.min_x && other.max_x <= self.max_x
            && other.min_y >= self.min_y && other.max_y <= self.max_y
    }

    /// Checks if this bounding box lies entirely inside `outer`.
    pub fn is_inside(&self, outer: &BoundingBox) -> bool {
        outer.contains(self)
    }

    /// Checks if this bounding box overlaps another bounding box.
    ///
    /// Boxes sharing only an edge or a corner overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x && self.max_x >= other.min_x
            && self.min_y <= other.max_y && self.max_y >= other.min_y
    }

    /// Returns the union of this bounding box with another.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Grows this bounding box in place to cover `other`.
    pub fn expand(&mut self, other: &BoundingBox) {
        *self = self.union(other);
    }

    /// Returns how much the surface grows when `other` is merged into this box.
    pub fn enlargement(&self, other: &BoundingBox) -> f64 {
        self.union(other).surface() - self.surface()
    }

    /// Returns the intersection of this bounding box with another, if they overlap.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.overlaps(other) {
            return None;
        }
        Some(BoundingBox::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        ))
    }

    /// Checks if this bounding box is a point (zero area).
    pub fn is_point(&self) -> bool {
        self.min_x == self.max_x && self.min_y == self.max_y
    }

    /// Checks if this bounding box is valid: no NaN coordinate and min <= max.
    pub fn is_valid(&self) -> bool {
        // NaN fails both comparisons
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }
}
