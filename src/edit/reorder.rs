//! Ladderizing: canonical child order by subtree size.

use tracing::debug;

use crate::edit::finish_edit;
use crate::error::TreeError;
use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::Vertex;

impl Tree {
    /// Reorders every vertex's children by subtree size (tip count),
    /// recursively, producing a canonical left-to-right drawing order.
    ///
    /// Topology and branch lengths are untouched; only child order changes,
    /// and with it the recomputed vertex indices and downstream layout
    /// cross-axis positions. The sort is stable, so children with equal tip
    /// counts keep their relative order — which makes the operation
    /// idempotent: ladderizing a ladderized tree is a no-op up to vertex
    /// identity.
    ///
    /// # Arguments
    /// * `ascending` - If `true`, smaller subtrees come first (left);
    ///   otherwise larger subtrees come first.
    ///
    /// # Example
    /// ```
    /// use kauri::model::tree::TreeBuilder;
    ///
    /// let mut builder = TreeBuilder::new(3);
    /// let a = builder.add_leaf("A", None);
    /// let b = builder.add_leaf("B", None);
    /// let c = builder.add_leaf("C", None);
    /// let bc = builder.add_internal(vec![b, c], None);
    /// builder.add_root(vec![bc, a]);
    /// let tree = builder.build().unwrap();
    ///
    /// let ladderized = tree.ladderize(true).unwrap();
    /// // The single tip "A" now draws before the two-tip clade.
    /// assert_eq!(ladderized.tip_labels(), vec!["A", "B", "C"]);
    /// ```
    pub fn ladderize(&self, ascending: bool) -> Result<Tree, TreeError> {
        // Tip counts per vertex, children before parents.
        let mut tip_counts = vec![0usize; self.num_vertices()];
        for vertex in self.post_order_iter() {
            let index = vertex.index();
            if vertex.is_leaf() {
                tip_counts[index] = 1;
            } else {
                tip_counts[index] = vertex.children().iter().map(|&c| tip_counts[c]).sum();
            }
        }

        let mut raw: Vec<Vertex> =
            (0..self.num_vertices()).map(|i| self[i].clone()).collect();
        for vertex in raw.iter_mut() {
            let mut children = vertex.children().to_vec();
            // Stable sorts keep tie order in both directions; a sort-then-
            // reverse would swap tied children back and forth instead.
            if ascending {
                children.sort_by_key(|&c| tip_counts[c]);
            } else {
                children.sort_by_key(|&c| std::cmp::Reverse(tip_counts[c]));
            }
            vertex.set_children(children);
        }

        debug!(ascending, "ladderized child order");
        let source_to_raw: Vec<Option<VertexIndex>> =
            (0..self.num_vertices()).map(Some).collect();
        finish_edit(self, raw, self.root_index(), &source_to_raw)
    }
}
