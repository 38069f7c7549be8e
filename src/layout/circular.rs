//! Circular (fan) layout: depth maps to radius, tip order to angle.

use std::f64::consts::TAU;

use crate::layout::{LayoutStyle, cross_positions};
use crate::model::tree::Tree;

/// Computes circular coordinates. Tips are spread evenly around the circle
/// in left-to-right traversal order; each internal vertex takes the mean of
/// its children's angles; radius is depth from the root, which sits at the
/// origin.
pub(crate) fn coords(tree: &Tree, style: LayoutStyle) -> Vec<(f64, f64)> {
    let depths = tree.depths(style.use_branch_lengths);
    let cross = cross_positions(tree);
    let num_tips = tree.num_tips();

    // n tips at n evenly spaced angles; the slice for one tip stays empty
    // so the first and last tip do not collide.
    let step = TAU / num_tips as f64;

    depths
        .iter()
        .zip(cross.iter())
        .map(|(&radius, &cross)| {
            let angle = cross * step;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Orientation;
    use crate::model::tree::TreeBuilder;

    #[test]
    fn root_is_at_the_origin() {
        let mut builder = TreeBuilder::new(2);
        let a = builder.add_leaf("A", Some(1.0));
        let b = builder.add_leaf("B", Some(1.0));
        builder.add_root(vec![a, b]);
        let tree = builder.build().unwrap();

        let style = LayoutStyle {
            orientation: Orientation::Circular,
            use_branch_lengths: true,
        };
        let coords = coords(&tree, style);
        assert_eq!(coords[tree.root_index()], (0.0, 0.0));

        // Both tips lie on the unit circle.
        for &tip in &tree.tip_indices() {
            let (x, y) = coords[tip];
            assert!((x * x + y * y - 1.0).abs() < 1e-12);
        }
    }
}
