//! Rectangular layouts (right, left, down, up).

use crate::layout::{LayoutStyle, Orientation, cross_positions};
use crate::model::tree::Tree;

/// Computes rectangular coordinates: one axis is depth from the root, the
/// other the cross-axis tip spacing. The root sits at depth 0; tips grow in
/// the direction named by the orientation.
pub(crate) fn coords(tree: &Tree, style: LayoutStyle) -> Vec<(f64, f64)> {
    let depths = tree.depths(style.use_branch_lengths);
    let cross = cross_positions(tree);

    depths
        .iter()
        .zip(cross.iter())
        .map(|(&depth, &cross)| match style.orientation {
            Orientation::Right => (depth, cross),
            Orientation::Left => (-depth, cross),
            Orientation::Down => (cross, -depth),
            Orientation::Up => (cross, depth),
            // Dispatched elsewhere; rectangular never sees these.
            Orientation::Circular | Orientation::Unrooted => unreachable!(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tree::TreeBuilder;

    #[test]
    fn cladogram_depth_counts_edges() {
        // ((A:5,B:5):5,C:5);
        let mut builder = TreeBuilder::new(3);
        let a = builder.add_leaf("A", Some(5.0));
        let b = builder.add_leaf("B", Some(5.0));
        let c = builder.add_leaf("C", Some(5.0));
        let ab = builder.add_internal(vec![a, b], Some(5.0));
        builder.add_root(vec![ab, c]);
        let tree = builder.build().unwrap();

        let style = LayoutStyle {
            orientation: Orientation::Right,
            use_branch_lengths: false,
        };
        let coords = coords(&tree, style);
        // A sits two edges below the root regardless of branch lengths.
        assert_eq!(coords[0].0, 2.0);
        assert_eq!(coords[tree.root_index()].0, 0.0);
    }
}
