//! Unrooted equal-angle layout.
//!
//! Each subtree receives an angular wedge proportional to its tip count,
//! recursively; a vertex is placed at its parent's position plus its branch
//! length along the bisector of its wedge. Polytomies split their wedge
//! evenly across equal-sized children by the same proportionality rule.

use std::f64::consts::TAU;

use crate::layout::LayoutStyle;
use crate::model::tree::{Tree, VertexIndex};

pub(crate) fn coords(tree: &Tree, style: LayoutStyle) -> Vec<(f64, f64)> {
    let num_vertices = tree.num_vertices();

    // Tip counts, children before parents.
    let mut tip_counts = vec![0usize; num_vertices];
    for vertex in tree.post_order_iter() {
        let index = vertex.index();
        if vertex.is_leaf() {
            tip_counts[index] = 1;
        } else {
            tip_counts[index] = vertex.children().iter().map(|&c| tip_counts[c]).sum();
        }
    }

    let mut coords = vec![(0.0f64, 0.0f64); num_vertices];

    // (vertex, wedge start, wedge span); the root covers the full circle
    // from the origin.
    let root = tree.root_index();
    let mut stack: Vec<(VertexIndex, f64, f64)> = vec![(root, 0.0, TAU)];
    while let Some((index, start, span)) = stack.pop() {
        let vertex = tree.vertex(index);
        if !vertex.is_root() {
            let length = if style.use_branch_lengths {
                vertex.dist()
            } else {
                1.0
            };
            let angle = start + span / 2.0;
            let (px, py) = coords[vertex.parent().expect("non-root has parent")];
            coords[index] = (px + length * angle.cos(), py + length * angle.sin());
        }

        let mut child_start = start;
        for &child in vertex.children() {
            let child_span = span * tip_counts[child] as f64 / tip_counts[index] as f64;
            stack.push((child, child_start, child_span));
            child_start += child_span;
        }
    }

    coords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Orientation;
    use crate::model::tree::TreeBuilder;

    #[test]
    fn wedges_are_proportional_to_tip_counts() {
        // Basal trifurcation with one tip per branch: angles 60, 180, 300.
        let mut builder = TreeBuilder::new(3);
        let a = builder.add_leaf("A", Some(1.0));
        let b = builder.add_leaf("B", Some(1.0));
        let c = builder.add_leaf("C", Some(1.0));
        builder.add_root(vec![a, b, c]);
        let tree = builder.build().unwrap();

        let style = LayoutStyle {
            orientation: Orientation::Unrooted,
            use_branch_lengths: true,
        };
        let coords = coords(&tree, style);

        for &tip in &tree.tip_indices() {
            let (x, y) = coords[tip];
            assert!((x * x + y * y - 1.0).abs() < 1e-12, "tips at unit distance");
        }
        // First tip's wedge is [0, 120) degrees, bisected at 60.
        let (x, y) = coords[tree.tip_indices()[0]];
        assert!((y / x).abs() - (60.0f64).to_radians().tan().abs() < 1e-9);
        assert!(x > 0.0 && y > 0.0);
    }
}
