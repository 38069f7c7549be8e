use kauri::model::features::FeatureValue;
use kauri::model::multi_tree::MultiTree;
use kauri::model::tree::{TraversalOrder, Tree, TreeBuilder};
use kauri::query::Selector;
use kauri::TreeError;
use pretty_assertions::assert_eq;

/// ((little_spotted:1,great_spotted:1):2,(okarito_brown:1.5,tokoeka:1.5):1.5);
fn kiwi_tree() -> Tree {
    let mut builder = TreeBuilder::new(4);
    let little = builder.add_leaf("little_spotted", Some(1.0));
    let great = builder.add_leaf("great_spotted", Some(1.0));
    let brown = builder.add_leaf("okarito_brown", Some(1.5));
    let tokoeka = builder.add_leaf("tokoeka", Some(1.5));
    let spotted = builder.add_internal(vec![little, great], Some(2.0));
    let southern = builder.add_internal(vec![brown, tokoeka], Some(1.5));
    builder.add_root(vec![spotted, southern]);
    builder.build().unwrap()
}

// ============= Construction and counts =============

#[test]
fn test_building_tree() {
    let tree = kiwi_tree();

    assert_eq!(tree.num_tips(), 4);
    assert_eq!(tree.num_internal(), 3);
    assert_eq!(tree.num_vertices(), 7);
    assert!(tree.is_valid());

    let root = tree.root_vertex();
    assert!(root.is_root());
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.dist(), 0.0);
}

#[test]
fn test_indices_are_contiguous_post_order() {
    let tree = kiwi_tree();

    // Arena position equals index, indices are exactly {0, .., n-1}.
    let mut seen: Vec<usize> = (0..tree.num_vertices())
        .map(|i| tree[i].index())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..tree.num_vertices()).collect::<Vec<_>>());

    // Post-order: every child precedes its parent, root is last.
    for i in 0..tree.num_vertices() {
        for &child in tree[i].children() {
            assert!(child < i);
        }
    }
    assert_eq!(tree.root_index(), tree.num_vertices() - 1);
}

#[test]
fn test_tip_labels_in_traversal_order() {
    let tree = kiwi_tree();
    assert_eq!(
        tree.tip_labels(),
        vec!["little_spotted", "great_spotted", "okarito_brown", "tokoeka"]
    );
}

// ============= Traversal =============

#[test]
fn test_traversal_orders_visit_every_vertex_once() {
    let tree = kiwi_tree();
    for order in [
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::LevelOrder,
    ] {
        let mut seen: Vec<usize> = tree.traverse(order).map(|v| v.index()).collect();
        assert_eq!(seen.len(), tree.num_vertices());
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), tree.num_vertices());
    }
}

#[test]
fn test_pre_order_starts_at_root_post_order_ends_there() {
    let tree = kiwi_tree();
    assert!(tree.pre_order_iter().next().unwrap().is_root());
    assert!(tree.post_order_iter().last().unwrap().is_root());
}

#[test]
fn test_traversal_is_restartable() {
    let tree = kiwi_tree();
    let first: Vec<usize> = tree.pre_order_iter().map(|v| v.index()).collect();
    let second: Vec<usize> = tree.pre_order_iter().map(|v| v.index()).collect();
    assert_eq!(first, second);
}

// ============= Derived state =============

#[test]
fn test_edge_list_covers_every_nonroot_vertex() {
    let tree = kiwi_tree();
    let edges = tree.edge_list();
    assert_eq!(edges.len(), tree.num_vertices() - 1);
    for (parent, child) in &edges {
        assert_eq!(tree[*child].parent(), Some(*parent));
    }
}

#[test]
fn test_depths_with_and_without_branch_lengths() {
    let tree = kiwi_tree();
    let by_length = tree.depths(true);
    let by_edges = tree.depths(false);

    let little = tree.get_node(&Selector::name("little_spotted")).unwrap();
    assert_eq!(by_length[little], 3.0);
    assert_eq!(by_edges[little], 2.0);
    assert_eq!(by_length[tree.root_index()], 0.0);
}

#[test]
fn test_bipartitions_of_four_tip_tree() {
    let tree = kiwi_tree();
    let splits = tree.bipartitions();
    // One internal edge => one non-trivial split.
    assert_eq!(splits.len(), 1);
    let split = splits.iter().next().unwrap();
    assert!(
        split.contains("okarito_brown") && split.contains("tokoeka")
            || split.contains("little_spotted") && split.contains("great_spotted")
    );
}

// ============= Feature data =============

#[test]
fn test_get_node_data_fills_missing_with_default() {
    let mut tree = kiwi_tree();
    let little = tree.get_node(&Selector::name("little_spotted")).unwrap();
    let brown = tree.get_node(&Selector::name("okarito_brown")).unwrap();
    tree.set_node_data("habitat", little, "forest");
    tree.set_node_data("habitat", brown, "coastal");

    let values = tree
        .get_node_data("habitat", FeatureValue::from("unknown"))
        .unwrap();
    assert_eq!(values.len(), tree.num_vertices());
    assert_eq!(values[little], FeatureValue::from("forest"));
    assert_eq!(values[brown], FeatureValue::from("coastal"));

    let missing = values
        .iter()
        .filter(|v| **v == FeatureValue::from("unknown"))
        .count();
    assert_eq!(missing, tree.num_vertices() - 2);
}

#[test]
fn test_unknown_feature_is_an_error() {
    let tree = kiwi_tree();
    assert_eq!(
        tree.get_node_data("plumage", FeatureValue::Float(0.0)),
        Err(TreeError::UnknownFeature("plumage".to_string()))
    );
}

#[test]
fn test_builtin_features_always_resolve() {
    let tree = kiwi_tree();
    let dists = tree.get_node_data("dist", FeatureValue::Float(0.0)).unwrap();
    assert_eq!(dists.len(), tree.num_vertices());
    assert_eq!(dists[tree.root_index()], FeatureValue::Float(0.0));

    let indices = tree.get_node_data("idx", FeatureValue::Int(-1)).unwrap();
    assert_eq!(indices[3], FeatureValue::Int(3));
}

#[test]
fn test_features_survive_ladderize() {
    let mut tree = kiwi_tree();
    let tokoeka = tree.get_node(&Selector::name("tokoeka")).unwrap();
    tree.set_node_data("flightless", tokoeka, true);

    let ladderized = tree.ladderize(true).unwrap();
    let tokoeka_after = ladderized.get_node(&Selector::name("tokoeka")).unwrap();
    assert_eq!(
        ladderized.features().get("flightless", tokoeka_after),
        Some(FeatureValue::Bool(true))
    );
}

// ============= MultiTree =============

#[test]
fn test_multi_tree_shared_labels() {
    let trees = MultiTree::new(vec![kiwi_tree(), kiwi_tree().ladderize(false).unwrap()]);
    let labels = trees.shared_tip_labels().unwrap();
    assert_eq!(labels.len(), 4);
    assert!(labels.contains("tokoeka"));
}

#[test]
fn test_multi_tree_rejects_mismatched_tip_sets() {
    let pruned = kiwi_tree()
        .prune(&Selector::names(["little_spotted", "great_spotted", "tokoeka"]))
        .unwrap();
    let trees = MultiTree::new(vec![kiwi_tree(), pruned]);
    assert!(matches!(
        trees.shared_tip_labels(),
        Err(TreeError::Structural(_))
    ));
}
