//! Pruning a tree to a subset of its tips.

use tracing::debug;

use crate::edit::{finish_edit, set_branch};
use crate::error::TreeError;
use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::Vertex;
use crate::query::Selector;

impl Tree {
    /// Restricts the tree to the tips matched by `keep`, returning a new
    /// tree.
    ///
    /// Internal vertices left with a single surviving child are collapsed:
    /// the chain's branch lengths are summed onto the surviving edge (their
    /// feature values are dropped with them). A root left with a single
    /// child is likewise suppressed, so the result's root always has two or
    /// more children — or is itself a tip when only one tip survives.
    ///
    /// # Errors
    /// - Selector errors from resolving `keep` (zero matching tips is
    ///   [TreeError::NotFound]).
    ///
    /// # Example
    /// ```
    /// use kauri::model::tree::TreeBuilder;
    /// use kauri::query::Selector;
    ///
    /// // ((A:1,B:2):3,C:4);
    /// let mut builder = TreeBuilder::new(3);
    /// let a = builder.add_leaf("A", Some(1.0));
    /// let b = builder.add_leaf("B", Some(2.0));
    /// let c = builder.add_leaf("C", Some(4.0));
    /// let ab = builder.add_internal(vec![a, b], Some(3.0));
    /// builder.add_root(vec![ab, c]);
    /// let tree = builder.build().unwrap();
    ///
    /// let pruned = tree.prune(&Selector::names(["A", "C"])).unwrap();
    /// assert_eq!(pruned.num_tips(), 2);
    /// // The unary vertex above A collapsed; its edge length was absorbed.
    /// let a = pruned.get_node(&Selector::name("A")).unwrap();
    /// assert_eq!(pruned[a].dist(), 4.0);
    /// ```
    pub fn prune(&self, keep: &Selector) -> Result<Tree, TreeError> {
        let kept_tips = self.get_tips(keep)?;
        let mut kept = vec![false; self.num_vertices()];
        for &tip in &kept_tips {
            kept[tip] = true;
        }

        // Mark every vertex with at least one kept tip below it.
        let mut retained = vec![false; self.num_vertices()];
        for vertex in self.post_order_iter() {
            let index = vertex.index();
            retained[index] = kept[index]
                || vertex.children().iter().any(|&c| retained[c]);
        }

        debug!(
            kept = kept_tips.len(),
            of = self.num_tips(),
            "pruning to tip subset"
        );

        // Walk the retained topology top-down, collapsing unary chains.
        // `resolve(v)` finds the representative of v's surviving subtree:
        // the first descendant that is a kept tip or has two or more
        // retained children, together with the branch length accumulated
        // along the collapsed chain.
        let resolve = |start: VertexIndex| -> (VertexIndex, f64, bool) {
            let mut at = start;
            let mut length = self[at].dist();
            let mut explicit = self[at].branch_length().is_some();
            loop {
                let surviving: Vec<VertexIndex> = self[at]
                    .children()
                    .iter()
                    .copied()
                    .filter(|&c| retained[c])
                    .collect();
                if surviving.len() == 1 && !kept[at] {
                    at = surviving[0];
                    length += self[at].dist();
                    explicit |= self[at].branch_length().is_some();
                } else {
                    return (at, length, explicit);
                }
            }
        };

        // The new root: resolve the old root's chain, dropping the
        // accumulated length (a root has no parent edge).
        let (new_root_source, _, _) = resolve(self.root_index());

        let mut source_to_raw: Vec<Option<VertexIndex>> = vec![None; self.num_vertices()];
        let mut raw: Vec<Vertex> = Vec::new();

        // (source vertex, raw parent) pairs still to copy.
        let mut stack: Vec<(VertexIndex, Option<VertexIndex>, f64, bool)> =
            vec![(new_root_source, None, 0.0, false)];
        while let Some((source, raw_parent, length, explicit)) = stack.pop() {
            let raw_index = raw.len();
            let mut vertex = Vertex::new(raw_index);
            vertex.set_name(self[source].name().map(String::from));
            vertex.set_support(self[source].support());
            vertex.set_parent(raw_parent);
            if raw_parent.is_some() {
                set_branch(&mut vertex, length, explicit);
            }
            raw.push(vertex);
            source_to_raw[source] = Some(raw_index);
            if let Some(parent) = raw_parent {
                raw[parent].push_child(raw_index);
            }

            // Children in reverse drawing order would invert below a stack;
            // push reversed so the rebuilt child order matches the source.
            for &child in self[source].children().iter().rev() {
                if !retained[child] {
                    continue;
                }
                let (representative, chain_length, chain_explicit) = resolve(child);
                stack.push((representative, Some(raw_index), chain_length, chain_explicit));
            }
        }

        finish_edit(self, raw, 0, &source_to_raw)
    }
}
