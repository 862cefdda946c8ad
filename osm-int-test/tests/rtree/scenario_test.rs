//! End-to-end scenarios for the in-memory R-Tree.

use std::collections::HashSet;

use osm_int_test::test_util::{
    create_small_fanout_context, create_test_context, run_test, tag,
};
use osm_spatial::{BoundingBox, ChildView, SpatialError, SpatialIndex};

#[test]
fn test_empty_index() {
    run_test(
        || create_test_context(),
        |ctx| {
            let tree = ctx.tree();
            assert_eq!(tree.count(), 0);
            assert!(tree.get(&BoundingBox::new(0.0, 0.0, 1.0, 1.0))?.is_empty());
            assert!(tree
                .get(&BoundingBox::new(-180.0, -90.0, 180.0, 90.0))?
                .is_empty());
            Ok(())
        },
    )
}

#[test]
fn test_three_disjoint_unit_boxes() {
    run_test(
        || create_test_context(),
        |ctx| {
            let tree = ctx.tree_mut();
            tree.add(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), "a".to_string())?;
            tree.add(&BoundingBox::new(10.0, 10.0, 11.0, 11.0), "b".to_string())?;
            tree.add(&BoundingBox::new(20.0, 20.0, 21.0, 21.0), "c".to_string())?;

            let found = tree.get(&BoundingBox::new(0.0, 0.0, 1.0, 1.0))?;
            let a = "a".to_string();
            assert_eq!(found, HashSet::from([&a]));
            assert_eq!(tree.count(), 3);
            Ok(())
        },
    )
}

#[test]
fn test_root_splits_at_default_fanout() {
    run_test(
        || create_test_context(),
        |ctx| {
            let tree = ctx.tree_mut();
            for i in 0..51 {
                let x = (i % 10) as f64 * 1000.0;
                let y = (i / 10) as f64 * 1000.0;
                tree.add(&BoundingBox::new(x, y, x + 5.0, y + 5.0), tag(i))?;
            }

            assert_eq!(tree.count(), 51);
            let root = tree.root().expect("root after inserts");
            assert_eq!(root.len(), 2);

            for child in root.children() {
                let ChildView::Node { bbox, node } = child else {
                    panic!("root children must be internal nodes after a split");
                };
                let mut expected = BoundingBox::empty();
                for leaf in node.children() {
                    expected.expand(&leaf.bbox());
                }
                assert_eq!(bbox, expected);
            }
            Ok(())
        },
    )
}

#[test]
fn test_identical_geometry_is_not_duplicated() {
    run_test(
        || create_test_context(),
        |ctx| {
            let tree = ctx.tree_mut();
            let shared = BoundingBox::new(2.0, 2.0, 4.0, 4.0);
            tree.add(&shared, "first".to_string())?;
            tree.add(&shared, "second".to_string())?;
            tree.add(&BoundingBox::new(3.0, 3.0, 6.0, 6.0), "third".to_string())?;

            let found = tree.get(&BoundingBox::new(0.0, 0.0, 10.0, 10.0))?;
            assert_eq!(found.len(), 3);

            let mut names: Vec<&String> = found.into_iter().collect();
            names.sort();
            assert_eq!(names, vec!["first", "second", "third"]);
            Ok(())
        },
    )
}

#[test]
fn test_fifth_insert_splits_small_fanout() {
    run_test(
        || create_small_fanout_context(),
        |ctx| {
            let tree = ctx.tree_mut();
            for i in 0..5 {
                let x = i as f64 * 2.0;
                tree.add(&BoundingBox::new(x, 0.0, x + 1.0, 1.0), tag(i))?;
            }

            let root = tree.root().expect("root after inserts");
            let sizes: Vec<usize> = root
                .children()
                .map(|child| match child {
                    ChildView::Node { node, .. } => node.len(),
                    ChildView::Leaf { .. } => 0,
                })
                .collect();

            assert_eq!(sizes.len(), 2);
            assert!(sizes.iter().all(|&size| size >= 2));
            assert_eq!(sizes.iter().sum::<usize>(), 5);
            Ok(())
        },
    )
}

#[test]
fn test_invalid_boxes_are_rejected() {
    run_test(
        || create_test_context(),
        |ctx| {
            let tree = ctx.tree_mut();
            tree.add(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), tag(0))?;

            let inverted = BoundingBox::new(1.0, 1.0, 0.0, 0.0);
            assert!(matches!(
                tree.add(&inverted, tag(1)),
                Err(SpatialError::InvalidArgument(_))
            ));
            assert!(matches!(
                tree.get(&inverted),
                Err(SpatialError::InvalidArgument(_))
            ));
            assert_eq!(tree.count(), 1);
            Ok(())
        },
    )
}

#[test]
fn test_remove_fails_loudly() {
    run_test(
        || create_test_context(),
        |ctx| {
            let tree = ctx.tree_mut();
            tree.add(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), tag(0))?;

            let result = tree.remove(&tag(0));
            assert!(matches!(result, Err(SpatialError::UnsupportedOperation(_))));
            assert_eq!(tree.count(), 1);
            assert_eq!(tree.get(&BoundingBox::new(0.0, 0.0, 1.0, 1.0))?.len(), 1);
            Ok(())
        },
    )
}

#[test]
fn test_touching_boxes_overlap() {
    run_test(
        || create_test_context(),
        |ctx| {
            let tree = ctx.tree_mut();
            tree.add(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), tag(0))?;
            tree.add(&BoundingBox::new(2.0, 2.0, 3.0, 3.0), tag(1))?;

            let corner = tree.get(&BoundingBox::new(1.0, 1.0, 1.5, 1.5))?;
            assert_eq!(corner.len(), 1);
            assert!(corner.contains(&tag(0)));

            let gap = tree.get(&BoundingBox::new(1.2, 1.2, 1.8, 1.8))?;
            assert!(gap.is_empty());
            Ok(())
        },
    )
}

#[test]
fn test_height_grows_one_level_at_a_time() {
    run_test(
        || create_small_fanout_context(),
        |ctx| {
            let mut last_height = 0;
            for i in 0..300 {
                let bbox = ctx.random_box(1000.0, 10.0);
                let tree = ctx.tree_mut();
                tree.add(&bbox, tag(i))?;

                let height = tree.height();
                assert!(height == last_height || height == last_height + 1);
                last_height = height;
            }
            assert!(last_height >= 4);
            Ok(())
        },
    )
}
