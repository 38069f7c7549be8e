//! Rooting and unrooting operations.
//!
//! - [Tree::root]: outgroup rooting by edge-pinching. The outgroup must be
//!   *edge-separable* on the unrooted view of the topology (the tips below
//!   some edge are exactly the outgroup, or exactly its complement);
//!   anything else fails with a structural error rather than guessing a
//!   nearby edge.
//! - [Tree::unroot]: removes a bifurcating root, merging its two child edges
//!   into one and leaving a basal polytomy.
//! - [Tree::root_on_mad]: minimal-ancestor-deviation rooting, an automatic
//!   method that searches every edge for the split point minimizing the
//!   relative deviation of tip-pair midpoints.
//!
//! All three return new trees; see the module docs of [crate::edit].

use tracing::debug;

use crate::edit::{UnrootedView, finish_edit, reroot_on_edge, set_branch};
use crate::error::TreeError;
use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::Vertex;
use crate::query::Selector;

/// Tolerance below which a tip-pair distance is treated as degenerate.
const EPSILON: f64 = 1e-9;

// ============================================================================
// Outgroup rooting
// ============================================================================
impl Tree {
    /// Roots the tree on the edge separating the given outgroup tips from
    /// the rest, splitting that edge's length evenly between the new root's
    /// two child edges.
    ///
    /// Equivalent to [`root_with_split(outgroup, 0.5)`](Tree::root_with_split).
    pub fn root(&self, outgroup: &Selector) -> Result<Tree, TreeError> {
        self.root_with_split(outgroup, 0.5)
    }

    /// Roots the tree on the edge separating the given outgroup tips from
    /// the rest.
    ///
    /// A new root vertex is inserted on that edge ("edge-pinching");
    /// `split` is the fraction of the pinched edge's length assigned to the
    /// outgroup-side child edge. The ingroup becomes the root's first child,
    /// the outgroup its second. If the current root is a bifurcation it is
    /// suppressed first (its two edges merge), so rooting is a pure function
    /// of the unrooted topology: re-rooting produces a fresh root vertex and
    /// fresh indices, never the old root's identity.
    ///
    /// # Errors
    /// - Selector errors from resolving `outgroup` (see [Tree::get_tips]).
    /// - [TreeError::Structural] if the outgroup spans all tips or is not
    ///   separable by a single edge of the unrooted topology. This operation
    ///   is strict: it never falls back to a "closest compatible" edge.
    ///
    /// # Example
    /// ```
    /// use kauri::generate::random_bifurcating;
    /// use kauri::query::Selector;
    ///
    /// let tree = random_bifurcating(8, 42).unwrap();
    /// let rooted = tree.root(&Selector::names(["t-0", "t-1"]));
    /// // t-0 and t-1 form a clade on this seed, so rooting succeeds.
    /// # let _ = rooted;
    /// ```
    pub fn root_with_split(&self, outgroup: &Selector, split: f64) -> Result<Tree, TreeError> {
        assert!(
            (0.0..=1.0).contains(&split),
            "split fraction must be in [0, 1], got {}",
            split
        );
        let mut selected = self.get_tips(outgroup)?;
        selected.sort_unstable();
        if selected.len() == self.num_tips() {
            return Err(TreeError::structural(
                "outgroup spans all tips; no edge separates it",
            ));
        }

        let complement: Vec<VertexIndex> = self
            .tip_indices()
            .into_iter()
            .filter(|t| !selected.contains(t))
            .collect();
        let complement = {
            let mut c = complement;
            c.sort_unstable();
            c
        };

        // Find the lowest-index vertex whose clade is exactly the outgroup
        // or exactly its complement; the edge above it is the pinch edge.
        let clade_sets = self.clade_tip_sets();
        let mut pinch: Option<(VertexIndex, bool)> = None;
        for index in 0..self.num_vertices() {
            if index == self.root_index() {
                continue;
            }
            if clade_sets[index] == selected {
                pinch = Some((index, true));
                break;
            }
            if clade_sets[index] == complement {
                pinch = Some((index, false));
                break;
            }
        }
        let (vertex, outgroup_below) = pinch.ok_or_else(|| {
            TreeError::structural(
                "outgroup is not separable by a single edge (not monophyletic on the unrooted topology)",
            )
        })?;

        let view = UnrootedView::new(self);
        let edge_id = view
            .edge_above(self, vertex)
            .expect("non-root vertex has an edge above");
        let edge = view.edges[edge_id];

        // Ingroup side becomes the first child; `split` is the outgroup
        // side's share of the pinched edge.
        let ingroup_anchor = if outgroup_below {
            edge.opposite(vertex)
        } else {
            vertex
        };
        let x_to_ingroup = edge.length * (1.0 - split);

        debug!(
            edge_id,
            length = edge.length,
            split,
            "rooting on outgroup edge"
        );
        reroot_on_edge(self, &view, edge_id, ingroup_anchor, x_to_ingroup)
    }
}

// ============================================================================
// Unrooting
// ============================================================================
impl Tree {
    /// Removes a bifurcating root, producing a basal polytomy.
    ///
    /// The root's two child edges merge into one whose length is their sum.
    /// The first non-leaf child of the root becomes the basal vertex; the
    /// other child is appended to its children, so the basal vertex of an
    /// unrooted binary tree is the expected trifurcation.
    ///
    /// # Errors
    /// [TreeError::Structural] if the root already has more than two
    /// children (the tree is effectively unrooted) or if the tree has fewer
    /// than three tips (no internal vertex to absorb the merge).
    pub fn unroot(&self) -> Result<Tree, TreeError> {
        let root = self.root_vertex();
        if root.children().len() != 2 {
            return Err(TreeError::structural(format!(
                "root has {} children; already unrooted",
                root.children().len()
            )));
        }
        if self.num_tips() < 3 {
            return Err(TreeError::structural(
                "fewer than three tips; nothing to unroot",
            ));
        }

        let children = root.children();
        let (basal, merged) = if !self[children[0]].is_leaf() {
            (children[0], children[1])
        } else {
            (children[1], children[0])
        };
        debug!(basal, merged, "unrooting; merging root edges");

        // Raw arena: every vertex except the old root, links rewired.
        let root_index = self.root_index();
        let mut source_to_raw: Vec<Option<VertexIndex>> = vec![None; self.num_vertices()];
        let mut raw: Vec<Vertex> = Vec::with_capacity(self.num_vertices() - 1);
        for index in 0..self.num_vertices() {
            if index == root_index {
                continue;
            }
            let raw_index = raw.len();
            let mut vertex = self[index].clone();
            vertex.set_index(raw_index);
            raw.push(vertex);
            source_to_raw[index] = Some(raw_index);
        }

        // Remap surviving links, then rewire around the removed root.
        for raw_index in 0..raw.len() {
            let parent = raw[raw_index]
                .parent()
                .map(|p| if p == root_index { p } else { source_to_raw[p].expect("survives") });
            raw[raw_index].set_parent(parent);
            let children = raw[raw_index]
                .children()
                .iter()
                .map(|&c| source_to_raw[c].expect("survives"))
                .collect();
            raw[raw_index].set_children(children);
        }

        let basal_raw = source_to_raw[basal].expect("basal survives");
        let merged_raw = source_to_raw[merged].expect("merged child survives");
        let merged_length = self[basal].dist() + self[merged].dist();
        let explicit =
            self[basal].branch_length().is_some() || self[merged].branch_length().is_some();

        raw[basal_raw].set_parent(None);
        raw[basal_raw].set_branch_length(None);
        raw[basal_raw].push_child(merged_raw);
        raw[merged_raw].set_parent(Some(basal_raw));
        set_branch(&mut raw[merged_raw], merged_length, explicit);

        finish_edit(self, raw, basal_raw, &source_to_raw)
    }
}

// ============================================================================
// Minimal ancestor deviation rooting
// ============================================================================
impl Tree {
    /// Roots the tree at the position minimizing the mean squared relative
    /// deviation of tip-pair midpoints (minimal ancestor deviation).
    ///
    /// For every edge of the unrooted view and every tip pair spanning that
    /// edge, a root at offset `x` along the edge induces the deviation
    /// `2 * d(tip, root) / d(tip, tip') - 1`; the optimal `x` per edge has a
    /// closed form, and the edge with the smallest root-mean-square
    /// deviation wins. Deterministic for a fixed tree: no randomness, and
    /// ties are broken by the lowest edge index in traversal order.
    ///
    /// Runs in O(n²) space and roughly O(n² · diameter) time for the
    /// spanning-pair sums; fine for the tree sizes this crate targets.
    ///
    /// # Errors
    /// [TreeError::Structural] if the tree has fewer than two tips.
    pub fn root_on_mad(&self) -> Result<Tree, TreeError> {
        if self.num_tips() < 2 {
            return Err(TreeError::structural(
                "fewer than two tips; nothing to root",
            ));
        }

        let view = UnrootedView::new(self);
        let num_vertices = self.num_vertices();

        // Distances from every tip to every vertex, over the unrooted view.
        let tips: Vec<VertexIndex> = (0..num_vertices)
            .filter(|&i| self[i].is_leaf())
            .collect();
        let mut tip_rank = vec![usize::MAX; num_vertices];
        for (rank, &tip) in tips.iter().enumerate() {
            tip_rank[tip] = rank;
        }
        let mut dist = vec![vec![0.0f64; num_vertices]; tips.len()];
        for (rank, &tip) in tips.iter().enumerate() {
            let mut stack: Vec<(VertexIndex, Option<usize>, f64)> = vec![(tip, None, 0.0)];
            while let Some((at, from_edge, d)) = stack.pop() {
                dist[rank][at] = d;
                for &edge_id in &view.incident[at] {
                    if Some(edge_id) == from_edge {
                        continue;
                    }
                    let edge = view.edges[edge_id];
                    stack.push((edge.opposite(at), Some(edge_id), d + edge.length));
                }
            }
        }

        // Tips on the b side of each edge, from the rooted clade sets.
        let clade_sets = self.clade_tip_sets();

        let mut best: Option<(usize, f64, f64)> = None; // (edge, x_from_a, score)
        for (edge_id, edge) in view.edges.iter().enumerate() {
            let b_side = &clade_sets[edge.b];
            let mut on_b = vec![false; num_vertices];
            for &t in b_side {
                on_b[t] = true;
            }

            // Closed-form optimum of the squared deviations over pairs
            // spanning this edge, x measured from endpoint a.
            let mut linear = 0.0f64;
            let mut quadratic = 0.0f64;
            for &p in &tips {
                if on_b[p] {
                    continue;
                }
                let d_pa = dist[tip_rank[p]][edge.a];
                for &q in b_side {
                    let d_pq = d_pa + edge.length + dist[tip_rank[q]][edge.b];
                    if d_pq < EPSILON {
                        continue;
                    }
                    linear += (d_pq - 2.0 * d_pa) / (d_pq * d_pq);
                    quadratic += 1.0 / (d_pq * d_pq);
                }
            }
            let x = if quadratic < EPSILON {
                edge.length / 2.0
            } else {
                (linear / (2.0 * quadratic)).clamp(0.0, edge.length)
            };

            let mut squared_sum = 0.0f64;
            let mut num_pairs = 0usize;
            for &p in &tips {
                if on_b[p] {
                    continue;
                }
                let d_pa = dist[tip_rank[p]][edge.a];
                for &q in b_side {
                    let d_pq = d_pa + edge.length + dist[tip_rank[q]][edge.b];
                    if d_pq < EPSILON {
                        continue;
                    }
                    let deviation = 2.0 * (d_pa + x) / d_pq - 1.0;
                    squared_sum += deviation * deviation;
                    num_pairs += 1;
                }
            }
            let score = if num_pairs == 0 {
                0.0
            } else {
                (squared_sum / num_pairs as f64).sqrt()
            };

            // Strict less-than keeps the lowest edge index on ties.
            if best.is_none_or(|(_, _, best_score)| score < best_score) {
                best = Some((edge_id, x, score));
            }
        }

        let (edge_id, x, score) = best.expect("a tree with two tips has an edge");
        debug!(edge_id, x, score, "minimal ancestor deviation root");
        let first = view.edges[edge_id].a;
        reroot_on_edge(self, &view, edge_id, first, x)
    }
}
