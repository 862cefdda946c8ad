//! Randomized invariant tests, with rstar as the reference for query results.

use std::collections::HashSet;

use osm_int_test::test_util::{create_fanout_context, random_box, run_test, tag};
use osm_spatial::{BoundingBox, MemoryRTree, SpatialIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};

fn to_aabb(bbox: &BoundingBox) -> AABB<[f64; 2]> {
    AABB::from_corners([bbox.min_x, bbox.min_y], [bbox.max_x, bbox.max_y])
}

fn oracle_for(boxes: &[BoundingBox]) -> RTree<GeomWithData<Rectangle<[f64; 2]>, usize>> {
    let items = boxes
        .iter()
        .enumerate()
        .map(|(i, bbox)| GeomWithData::new(Rectangle::from_aabb(to_aabb(bbox)), i))
        .collect::<Vec<_>>();
    RTree::bulk_load(items)
}

fn brute_force(boxes: &[BoundingBox], query: &BoundingBox) -> HashSet<usize> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, bbox)| bbox.overlaps(query))
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn test_queries_match_rstar() {
    for (max_children, min_children, seed) in [(4, 2, 1), (8, 3, 2), (16, 8, 3), (50, 20, 4)] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tree = MemoryRTree::with_fanout(max_children, min_children).unwrap();

        let boxes: Vec<BoundingBox> = (0..1500).map(|_| random_box(&mut rng, 1000.0, 25.0)).collect();
        for (i, bbox) in boxes.iter().enumerate() {
            tree.add(bbox, i).unwrap();
        }
        let oracle = oracle_for(&boxes);

        for _ in 0..200 {
            let query = random_box(&mut rng, 1000.0, 150.0);
            let expected: HashSet<usize> = oracle
                .locate_in_envelope_intersecting(&to_aabb(&query))
                .map(|item| item.data)
                .collect();
            let found: HashSet<usize> = tree.get(&query).unwrap().into_iter().copied().collect();

            assert_eq!(found, expected, "fanout ({}, {}) query {}", max_children, min_children, query);
        }

        assert_eq!(tree.count(), boxes.len());
        let report = tree.check_integrity();
        assert!(report.is_valid, "{:?}", report.errors);
    }
}

#[test]
fn test_invariants_hold_after_every_insert() {
    run_test(
        || create_fanout_context(6, 3, 99),
        |ctx| {
            for i in 0..400 {
                let bbox = ctx.random_box(500.0, 20.0);
                ctx.tree_mut().add(&bbox, tag(i))?;

                let report = ctx.tree().check_integrity();
                assert!(report.is_valid, "after insert {}: {:?}", i, report.errors);
                assert_eq!(ctx.tree().count(), i + 1);
            }
            Ok(())
        },
    )
}

#[test]
fn test_repeated_queries_are_idempotent() {
    run_test(
        || create_fanout_context(10, 4, 5),
        |ctx| {
            for i in 0..500 {
                let bbox = ctx.random_box(200.0, 5.0);
                ctx.tree_mut().add(&bbox, tag(i))?;
            }

            for _ in 0..20 {
                let query = ctx.random_box(200.0, 60.0);
                let first = ctx.tree().get(&query)?;
                let second = ctx.tree().get(&query)?;
                assert_eq!(first, second);
            }
            Ok(())
        },
    )
}

#[test]
fn test_clustered_and_degenerate_boxes() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut tree = MemoryRTree::with_fanout(5, 2).unwrap();
    let mut boxes = Vec::new();

    // points, a tight cluster and exact duplicates
    for i in 0..300 {
        let bbox = match i % 3 {
            0 => {
                let b = random_box(&mut rng, 100.0, 0.0);
                BoundingBox::new(b.min_x, b.min_y, b.min_x, b.min_y)
            }
            1 => random_box(&mut rng, 1.0, 0.01),
            _ => BoundingBox::new(50.0, 50.0, 51.0, 51.0),
        };
        boxes.push(bbox);
        tree.add(&bbox, i).unwrap();
    }

    for _ in 0..100 {
        let query = random_box(&mut rng, 100.0, 30.0);
        let found: HashSet<usize> = tree.get(&query).unwrap().into_iter().copied().collect();
        assert_eq!(found, brute_force(&boxes, &query));
    }

    let everything = tree.get(&BoundingBox::new(-1.0, -1.0, 200.0, 200.0)).unwrap();
    assert_eq!(everything.len(), 300);

    let report = tree.check_integrity();
    assert!(report.is_valid, "{:?}", report.errors);
}

#[test]
fn test_same_input_builds_same_tree() {
    let build = || {
        let mut rng = StdRng::seed_from_u64(77);
        let mut tree = MemoryRTree::with_fanout(7, 3).unwrap();
        for i in 0..250 {
            tree.add(&random_box(&mut rng, 300.0, 12.0), i).unwrap();
        }
        tree
    };

    let a = build();
    let b = build();
    let shape_a: Vec<(BoundingBox, usize)> = a.entries().into_iter().map(|(bbox, d)| (bbox, *d)).collect();
    let shape_b: Vec<(BoundingBox, usize)> = b.entries().into_iter().map(|(bbox, d)| (bbox, *d)).collect();
    assert_eq!(shape_a, shape_b);
    assert_eq!(a.stats(), b.stats());
}
