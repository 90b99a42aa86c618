//! Structural invariant tests for every tree variant.

use test_case::test_case;

use ranch::{tree::Node, Bound, BuiltTree, PointSet, SpatialTree, TreeVariant};

mod common;

/// Walks a tree and checks the structural invariants of every node.
fn check_tree<B: Bound<Dist = f64>>(tree: &SpatialTree<B>, data: &PointSet<f64>, leaf_size: usize) {
    // The permutation array maps tree order back to the original indices
    // exactly once each.
    let mut sorted = tree.permutation().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..data.cardinality()).collect::<Vec<_>>());

    assert_eq!(tree.leaf_size(), leaf_size);
    assert_eq!(tree.root().offset(), 0);
    assert_eq!(tree.root().cardinality(), data.cardinality());

    check_node(tree.root(), tree, data, leaf_size);
}

fn check_node<B: Bound<Dist = f64>>(node: &Node<B>, tree: &SpatialTree<B>, data: &PointSet<f64>, leaf_size: usize) {
    // Every owned point lies inside the node's bound.
    for t in node.range() {
        let p = data.get(tree.original_index(t));
        assert_eq!(node.bound().min_to_point(p), 0.0, "owned point outside bound");
    }

    // The bound's distances to an outside probe bracket the true distances.
    let probe = vec![100.0; data.dimensionality()];
    let min_d = node.bound().min_to_point(&probe);
    let max_d = node.bound().max_to_point(&probe);
    for t in node.range() {
        let p = data.get(tree.original_index(t));
        let d: f64 = distances::vectors::euclidean(p, &probe);
        assert!(min_d <= d + 1e-9 && d <= max_d + 1e-9, "bound does not bracket {d}");
    }

    match node.children() {
        None => assert!(node.cardinality() <= leaf_size, "oversized leaf"),
        Some((left, right)) => {
            assert!(node.cardinality() > leaf_size, "undersized internal node");

            // The children partition the parent's index range exactly.
            assert_eq!(left.offset(), node.offset());
            assert_eq!(left.offset() + left.cardinality(), right.offset());
            assert_eq!(left.cardinality() + right.cardinality(), node.cardinality());
            assert!(left.cardinality() >= 1 && right.cardinality() >= 1);

            // The parent's bound contains both child bounds.
            assert!(node.bound().encloses(left.bound()));
            assert!(node.bound().encloses(right.bound()));

            check_node(left, tree, data, leaf_size);
            check_node(right, tree, data, leaf_size);
        }
    }
}

#[test_case(TreeVariant::Kd; "kd")]
#[test_case(TreeVariant::Ball; "ball")]
#[test_case(TreeVariant::Vp; "vp")]
#[test_case(TreeVariant::Rp; "rp")]
fn invariants(variant: TreeVariant) {
    for (cardinality, dimensionality) in [(1, 2), (50, 2), (500, 7)] {
        let data = common::data_gen::random_points(cardinality, dimensionality, -10.0, 10.0, 42);
        for leaf_size in [1, 4, 20] {
            match BuiltTree::build(&data, variant, leaf_size, Some(42)) {
                BuiltTree::Kd(t) | BuiltTree::Rp(t) => check_tree(&t, &data, leaf_size),
                BuiltTree::Ball(t) | BuiltTree::Vp(t) => check_tree(&t, &data, leaf_size),
            }
        }
    }
}

#[test_case(TreeVariant::Kd; "kd")]
#[test_case(TreeVariant::Ball; "ball")]
#[test_case(TreeVariant::Vp; "vp")]
#[test_case(TreeVariant::Rp; "rp")]
fn construction_is_deterministic(variant: TreeVariant) {
    let data = common::data_gen::random_points(200, 3, -10.0, 10.0, 42);

    let a = BuiltTree::build(&data, variant, 5, Some(42));
    let b = BuiltTree::build(&data, variant, 5, Some(42));

    let permutation = |tree: &BuiltTree<f64>| match tree {
        BuiltTree::Kd(t) | BuiltTree::Rp(t) => t.permutation().to_vec(),
        BuiltTree::Ball(t) | BuiltTree::Vp(t) => t.permutation().to_vec(),
    };
    assert_eq!(permutation(&a), permutation(&b));
    assert_eq!(a.variant(), variant);
}

#[test]
fn degenerate_data_still_splits() {
    // All points coincide; the fallback median split must still terminate
    // with leaves no larger than the leaf size.
    let data = PointSet::new(vec![vec![1.0, 1.0]; 37]).unwrap();
    for variant in TreeVariant::ALL {
        match BuiltTree::build(&data, variant, 4, Some(42)) {
            BuiltTree::Kd(t) | BuiltTree::Rp(t) => check_tree(&t, &data, 4),
            BuiltTree::Ball(t) | BuiltTree::Vp(t) => check_tree(&t, &data, 4),
        }
    }
}
