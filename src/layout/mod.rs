//! Coordinate layout engine.
//!
//! Assigns a 2D coordinate to every vertex of a tree and produces an edge
//! list, so that a render backend can draw the tree without any further
//! topology knowledge. The backend must treat both arrays as read-only and
//! index-aligned: row `i` of the coordinate array belongs to the vertex with
//! index `i`, which is also how [Tree::get_node_data] orders feature
//! columns, so styling arrays compose directly.
//!
//! Layout is a pure function of (tree, style): no randomness, no hidden
//! state; computing it twice on an unchanged tree yields bit-identical
//! output. Tip order on the cross axis is the current left-to-right child
//! order, which is what [ladderize](crate::model::tree::Tree::ladderize)
//! canonicalizes.

mod circular;
mod rectangular;
mod unrooted;

use crate::model::tree::{Tree, VertexIndex};

// =#========================================================================#=
// STYLE
// =#========================================================================#=
/// Direction or shape of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Root at the left, tips growing to the right
    Right,
    /// Root at the right, tips growing to the left
    Left,
    /// Root at the top, tips growing downward
    Down,
    /// Root at the bottom, tips growing upward
    Up,
    /// Root at the center, tips on a circle
    Circular,
    /// Unrooted equal-angle layout
    Unrooted,
}

/// Parameters of a layout computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutStyle {
    /// Direction or shape of the drawing
    pub orientation: Orientation,
    /// If `true`, depth is cumulative branch length from the root
    /// (phylogram); if `false`, depth is counted in edges (cladogram).
    pub use_branch_lengths: bool,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        LayoutStyle {
            orientation: Orientation::Right,
            use_branch_lengths: true,
        }
    }
}

// =#========================================================================#=
// LAYOUT
// =#========================================================================#=
/// The result of a layout computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// One `(x, y)` coordinate per vertex, indexed by vertex index
    pub coords: Vec<(f64, f64)>,
    /// Edges as `(parent_index, child_index)` pairs, ordered by child index
    pub edges: Vec<(VertexIndex, VertexIndex)>,
    /// The style that produced this layout
    pub style: LayoutStyle,
}

impl Tree {
    /// Computes plotting coordinates for every vertex.
    ///
    /// See the [module docs](crate::layout) for the guarantees; the
    /// rectangular family places tips at unit-spaced, strictly increasing
    /// cross-axis positions in left-to-right traversal order and each
    /// internal vertex at the midpoint of its children.
    ///
    /// A single-vertex tree is a degenerate but valid input and yields a
    /// one-point layout.
    ///
    /// # Example
    /// ```
    /// use kauri::layout::LayoutStyle;
    /// use kauri::model::tree::TreeBuilder;
    ///
    /// let mut builder = TreeBuilder::new(2);
    /// let a = builder.add_leaf("A", Some(1.0));
    /// let b = builder.add_leaf("B", Some(2.0));
    /// builder.add_root(vec![a, b]);
    /// let tree = builder.build().unwrap();
    ///
    /// let layout = tree.layout(LayoutStyle::default());
    /// assert_eq!(layout.coords.len(), 3);
    /// // Root at depth 0, centered between its two tips.
    /// assert_eq!(layout.coords[tree.root_index()], (0.0, 0.5));
    /// ```
    pub fn layout(&self, style: LayoutStyle) -> Layout {
        let coords = match style.orientation {
            Orientation::Right | Orientation::Left | Orientation::Down | Orientation::Up => {
                rectangular::coords(self, style)
            }
            Orientation::Circular => circular::coords(self, style),
            Orientation::Unrooted => unrooted::coords(self, style),
        };
        debug_assert_eq!(coords.len(), self.num_vertices());
        Layout {
            coords,
            edges: self.edge_list(),
            style,
        }
    }
}

/// Cross-axis positions shared by the rectangular and circular layouts:
/// tips get `0, 1, 2, ...` in left-to-right traversal order, every internal
/// vertex the mean of its children's positions (children are computed first,
/// post-order).
pub(crate) fn cross_positions(tree: &Tree) -> Vec<f64> {
    let mut cross = vec![0.0f64; tree.num_vertices()];
    let mut next_tip = 0usize;
    for vertex in tree.post_order_iter() {
        let index = vertex.index();
        if vertex.is_leaf() {
            cross[index] = next_tip as f64;
            next_tip += 1;
        } else {
            let sum: f64 = vertex.children().iter().map(|&c| cross[c]).sum();
            cross[index] = sum / vertex.children().len() as f64;
        }
    }
    cross
}
