use kauri::generate::random_bifurcating;
use kauri::layout::{LayoutStyle, Orientation};
use kauri::model::tree::{Tree, TreeBuilder};
use pretty_assertions::assert_eq;

fn style(orientation: Orientation) -> LayoutStyle {
    LayoutStyle {
        orientation,
        use_branch_lengths: true,
    }
}

/// ((rimu:1,miro:2):1,totara:3);
fn conifer_tree() -> Tree {
    let mut builder = TreeBuilder::new(3);
    let rimu = builder.add_leaf("rimu", Some(1.0));
    let miro = builder.add_leaf("miro", Some(2.0));
    let totara = builder.add_leaf("totara", Some(3.0));
    let podocarp = builder.add_internal(vec![rimu, miro], Some(1.0));
    builder.add_root(vec![podocarp, totara]);
    builder.build().unwrap()
}

// ============= Determinism =============

#[test]
fn test_layout_is_bit_identical_on_repeat() {
    let tree = random_bifurcating(20, 8).unwrap();
    for orientation in [
        Orientation::Right,
        Orientation::Left,
        Orientation::Down,
        Orientation::Up,
        Orientation::Circular,
        Orientation::Unrooted,
    ] {
        let first = tree.layout(style(orientation));
        let second = tree.layout(style(orientation));
        assert_eq!(first, second);
    }
}

#[test]
fn test_layout_rows_align_with_vertex_indices() {
    let tree = conifer_tree();
    let layout = tree.layout(LayoutStyle::default());

    assert_eq!(layout.coords.len(), tree.num_vertices());
    assert_eq!(layout.edges, tree.edge_list());
    for (parent, child) in &layout.edges {
        assert_eq!(tree[*child].parent(), Some(*parent));
    }
}

// ============= Rectangular =============

#[test]
fn test_rectangular_phylogram_depths() {
    let tree = conifer_tree();
    let layout = tree.layout(LayoutStyle::default());

    let root = tree.root_index();
    assert_eq!(layout.coords[root].0, 0.0);
    // Tip depths are cumulative branch lengths.
    for (&tip, label) in tree.tip_indices().iter().zip(tree.tip_labels()) {
        let expected = match label {
            "rimu" => 2.0,
            "miro" => 3.0,
            "totara" => 3.0,
            other => panic!("unexpected tip {}", other),
        };
        assert_eq!(layout.coords[tip].0, expected);
    }
}

#[test]
fn test_rectangular_cladogram_counts_edges() {
    let tree = conifer_tree();
    let layout = tree.layout(LayoutStyle {
        orientation: Orientation::Right,
        use_branch_lengths: false,
    });

    let rimu = tree.tip_indices()[0];
    let totara = tree.tip_indices()[2];
    assert_eq!(layout.coords[rimu].0, 2.0);
    assert_eq!(layout.coords[totara].0, 1.0);
}

#[test]
fn test_tip_cross_positions_strictly_increase() {
    let tree = random_bifurcating(15, 23).unwrap();
    let layout = tree.layout(LayoutStyle::default());

    let tips = tree.tip_indices();
    for pair in tips.windows(2) {
        // Right orientation: cross axis is y.
        assert!(layout.coords[pair[0]].1 < layout.coords[pair[1]].1);
    }
}

#[test]
fn test_internal_vertices_sit_between_their_children() {
    let tree = random_bifurcating(10, 31).unwrap();
    let layout = tree.layout(LayoutStyle::default());

    for i in 0..tree.num_vertices() {
        let children = tree[i].children();
        if children.is_empty() {
            continue;
        }
        let lo = children
            .iter()
            .map(|&c| layout.coords[c].1)
            .fold(f64::INFINITY, f64::min);
        let hi = children
            .iter()
            .map(|&c| layout.coords[c].1)
            .fold(f64::NEG_INFINITY, f64::max);
        let y = layout.coords[i].1;
        assert!(lo <= y && y <= hi);
    }
}

#[test]
fn test_orientations_are_reflections_of_each_other() {
    let tree = conifer_tree();
    let right = tree.layout(style(Orientation::Right));
    let left = tree.layout(style(Orientation::Left));
    let down = tree.layout(style(Orientation::Down));
    let up = tree.layout(style(Orientation::Up));

    for i in 0..tree.num_vertices() {
        let (depth, cross) = right.coords[i];
        assert_eq!(left.coords[i], (-depth, cross));
        assert_eq!(down.coords[i], (cross, -depth));
        assert_eq!(up.coords[i], (cross, depth));
    }
}

// ============= Circular =============

#[test]
fn test_circular_places_root_at_origin() {
    let tree = random_bifurcating(12, 2).unwrap();
    let layout = tree.layout(style(Orientation::Circular));
    assert_eq!(layout.coords[tree.root_index()], (0.0, 0.0));
}

#[test]
fn test_circular_tips_sit_at_their_depth_radius() {
    let tree = conifer_tree();
    let layout = tree.layout(style(Orientation::Circular));
    let depths = tree.depths(true);

    for &tip in &tree.tip_indices() {
        let (x, y) = layout.coords[tip];
        let radius = (x * x + y * y).sqrt();
        assert!((radius - depths[tip]).abs() < 1e-12);
    }
}

// ============= Unrooted =============

#[test]
fn test_unrooted_edge_lengths_are_preserved() {
    let tree = random_bifurcating(10, 19).unwrap();
    let layout = tree.layout(style(Orientation::Unrooted));

    for (parent, child) in &layout.edges {
        let (px, py) = layout.coords[*parent];
        let (cx, cy) = layout.coords[*child];
        let drawn = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
        assert!((drawn - tree[*child].dist()).abs() < 1e-9);
    }
}

#[test]
fn test_unrooted_layout_of_trifurcation() {
    let tree = conifer_tree().unroot().unwrap();
    let layout = tree.layout(style(Orientation::Unrooted));

    assert_eq!(layout.coords[tree.root_index()], (0.0, 0.0));
    // Three subtrees, no overlapping tip positions.
    let tips = tree.tip_indices();
    for (i, &a) in tips.iter().enumerate() {
        for &b in &tips[i + 1..] {
            assert!(layout.coords[a] != layout.coords[b]);
        }
    }
}

// ============= Composition with edits =============

#[test]
fn test_ladderize_makes_layout_idempotent() {
    let tree = random_bifurcating(16, 37).unwrap();
    let once = tree.ladderize(false).unwrap();
    let twice = once.ladderize(false).unwrap();

    assert_eq!(
        once.layout(LayoutStyle::default()),
        twice.layout(LayoutStyle::default())
    );
}

#[test]
fn test_single_vertex_tree_has_one_point_layout() {
    let tree = random_bifurcating(1, 0).unwrap();
    let layout = tree.layout(LayoutStyle::default());
    assert_eq!(layout.coords, vec![(0.0, 0.0)]);
    assert!(layout.edges.is_empty());
}
