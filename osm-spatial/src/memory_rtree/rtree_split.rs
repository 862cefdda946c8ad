//! Quadratic node split.
//!
//! Divides the `M + 1` entries of an overflowing node into two groups of at
//! least `m` entries each:
//!
//! 1. *Pick seeds*: the pair wasting the most area when boxed together starts
//!    the two groups.
//! 2. *Distribute*: while entries remain, either force all of them into a group
//!    that would otherwise end below `m`, or place the entry with the strongest
//!    preference for one group into that group.
//!
//! Every comparison is exact and scans entries in stored order, so the outcome
//! depends only on the input order and the box coordinates.

use crate::bounding_box::BoundingBox;

use super::rtree_types::ChildEntry;

/// One side of a split under construction.
#[derive(Debug)]
struct Group {
    bbox: BoundingBox,
    entries: Vec<ChildEntry>,
}

impl Group {
    fn seeded(seed: ChildEntry, capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.push(seed);
        Self {
            bbox: seed.bbox,
            entries,
        }
    }

    fn push(&mut self, entry: ChildEntry) {
        self.bbox.expand(&entry.bbox);
        self.entries.push(entry);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Splits `entries` into two groups, each with at least `min_children` members.
///
/// `entries` must hold at least `2 * min_children` entries. The overflowing
/// node hands in `M + 1` of them, which a validated configuration guarantees.
pub(crate) fn quadratic_split(
    mut entries: Vec<ChildEntry>,
    min_children: usize,
) -> (Vec<ChildEntry>, Vec<ChildEntry>) {
    let capacity = entries.len();
    let (first_idx, second_idx) = pick_seeds(&entries);

    // first_idx > second_idx, remove the larger index first
    let first_seed = entries.remove(first_idx);
    let second_seed = entries.remove(second_idx);

    let mut groups = [
        Group::seeded(first_seed, capacity),
        Group::seeded(second_seed, capacity),
    ];

    while !entries.is_empty() {
        if groups[0].len() + entries.len() <= min_children {
            for entry in entries.drain(..) {
                groups[0].push(entry);
            }
        } else if groups[1].len() + entries.len() <= min_children {
            for entry in entries.drain(..) {
                groups[1].push(entry);
            }
        } else {
            let (next_idx, target) = pick_next(&entries, &groups);
            let entry = entries.remove(next_idx);
            groups[target].push(entry);
        }
    }

    let [first, second] = groups;
    (first.entries, second.entries)
}

/// Selects the pair maximizing `surface(a ∪ b) - surface(a) - surface(b)`.
///
/// Returns `(i, j)` with `i > j`. Identical boxes have negative waste, so the
/// scan starts at negative infinity to always yield a distinct pair.
pub(crate) fn pick_seeds(entries: &[ChildEntry]) -> (usize, usize) {
    let mut seeds = (1, 0);
    let mut max_waste = f64::NEG_INFINITY;

    for (i, a) in entries.iter().enumerate() {
        for (j, b) in entries.iter().enumerate().take(i) {
            let waste = a.bbox.union(&b.bbox).surface() - a.bbox.surface() - b.bbox.surface();
            if waste > max_waste {
                max_waste = waste;
                seeds = (i, j);
            }
        }
    }
    seeds
}

/// Selects the unplaced entry with the largest difference in enlargement
/// between the two groups, and the group it should join.
fn pick_next(entries: &[ChildEntry], groups: &[Group; 2]) -> (usize, usize) {
    let mut picked = 0;
    let mut target = 0;
    let mut max_difference = f64::NEG_INFINITY;

    for (idx, entry) in entries.iter().enumerate() {
        let d0 = groups[0].bbox.enlargement(&entry.bbox);
        let d1 = groups[1].bbox.enlargement(&entry.bbox);
        let difference = (d0 - d1).abs();
        if difference > max_difference {
            max_difference = difference;
            picked = idx;
            target = select_group(d0, d1, groups);
        }
    }
    (picked, target)
}

/// Smaller enlargement wins; then smaller surface; then fewer members; then group 0.
fn select_group(d0: f64, d1: f64, groups: &[Group; 2]) -> usize {
    if d0 < d1 {
        return 0;
    }
    if d1 < d0 {
        return 1;
    }
    let s0 = groups[0].bbox.surface();
    let s1 = groups[1].bbox.surface();
    if s0 < s1 {
        return 0;
    }
    if s1 < s0 {
        return 1;
    }
    if groups[1].len() < groups[0].len() {
        1
    } else {
        0
    }
}
