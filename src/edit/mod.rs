//! Structural-edit operations.
//!
//! Every edit consumes `&Tree` and returns a **new**, fully independent
//! [Tree]: the source tree and its vertices are never mutated, which makes
//! edits safely chainable and rules out aliasing bugs between a tree and its
//! derived variants. Vertex indices are recomputed from scratch on the
//! result (canonical post-order), and feature columns are remapped through
//! the edit so per-vertex data survives where the vertex does.
//!
//! Rooting operations ([Tree::root](crate::model::tree::Tree), `unroot`,
//! `root_on_mad`) share the [UnrootedView] machinery below: the rooted
//! arena is flattened into an undirected adjacency (suppressing a
//! bifurcating root, whose two child edges merge into one), the new root is
//! placed on an edge of that view, and a rooted arena is rebuilt by
//! depth-first search.

/// Rooting, unrooting, and minimal-ancestor-deviation rooting
pub mod rooting;
/// Ladderizing (canonical child order)
pub mod reorder;
/// Pruning to a tip subset
pub mod prune;

use crate::error::TreeError;
use crate::model::features::FeatureStore;
use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::{BranchLength, Vertex};

// =#========================================================================#=
// UNROOTED VIEW
// =#========================================================================#=
/// An undirected view of a tree's topology, used to place a new root.
///
/// Vertices are referenced by their index in the source tree. If the source
/// root is a bifurcation it is suppressed: its two child edges merge into a
/// single edge whose length is their sum, matching the convention that a
/// binary root carries no topological information in the unrooted tree.
pub(crate) struct UnrootedView {
    /// Undirected edges in deterministic order (increasing child index in
    /// the source tree; a merged root edge keeps the position of the first
    /// root child).
    pub edges: Vec<UnrootedEdge>,
    /// For each source vertex, the edge ids incident to it, in `edges` order.
    pub incident: Vec<Vec<usize>>,
    /// The suppressed source root, if any.
    pub suppressed_root: Option<VertexIndex>,
}

/// An undirected edge of an [UnrootedView].
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnrootedEdge {
    pub a: VertexIndex,
    pub b: VertexIndex,
    pub length: f64,
    /// Whether any source branch on this edge had an explicit length.
    pub explicit: bool,
}

impl UnrootedEdge {
    /// Returns the endpoint opposite to `vertex`.
    pub fn opposite(&self, vertex: VertexIndex) -> VertexIndex {
        if vertex == self.a { self.b } else { self.a }
    }
}

impl UnrootedView {
    /// Builds the undirected view of `tree`.
    pub fn new(tree: &Tree) -> Self {
        let root = tree.root_vertex();
        let suppressed_root = if root.children().len() == 2 {
            Some(root.index())
        } else {
            None
        };

        let mut edges = Vec::with_capacity(tree.num_vertices());
        for index in 0..tree.num_vertices() {
            let vertex = tree.vertex(index);
            match vertex.parent() {
                None => {}
                Some(parent) if Some(parent) == suppressed_root => {
                    // Merge the two root edges once, keyed on the first child.
                    let siblings = tree.vertex(parent).children();
                    if index == siblings[0] {
                        let other = siblings[1];
                        let sibling = tree.vertex(other);
                        edges.push(UnrootedEdge {
                            a: index,
                            b: other,
                            length: vertex.dist() + sibling.dist(),
                            explicit: vertex.branch_length().is_some()
                                || sibling.branch_length().is_some(),
                        });
                    }
                }
                Some(parent) => {
                    edges.push(UnrootedEdge {
                        a: parent,
                        b: index,
                        length: vertex.dist(),
                        explicit: vertex.branch_length().is_some(),
                    });
                }
            }
        }

        let mut incident = vec![Vec::new(); tree.num_vertices()];
        for (edge_id, edge) in edges.iter().enumerate() {
            incident[edge.a].push(edge_id);
            incident[edge.b].push(edge_id);
        }

        UnrootedView {
            edges,
            incident,
            suppressed_root,
        }
    }

    /// Returns the id of the edge "above" a source vertex: the edge to its
    /// parent, or the merged root edge if the parent was suppressed.
    ///
    /// Returns `None` for the source root itself.
    pub fn edge_above(&self, tree: &Tree, vertex: VertexIndex) -> Option<usize> {
        let parent = tree.vertex(vertex).parent()?;
        let target = if Some(parent) == self.suppressed_root {
            // The merged edge connects the two former root children.
            let siblings = tree.vertex(parent).children();
            if siblings[0] == vertex { siblings[1] } else { siblings[0] }
        } else {
            parent
        };
        self.incident[vertex]
            .iter()
            .copied()
            .find(|&edge_id| self.edges[edge_id].opposite(vertex) == target)
    }
}

// ============================================================================
// Rebuilding a rooted tree from the view
// ============================================================================
/// Builds a new rooted tree by pinching `edge` of the unrooted view: a fresh
/// root vertex is inserted on the edge at distance `x_to_first` from the
/// endpoint `first`, i.e. the new root's edge towards `first` has length
/// `x_to_first` and the edge towards the opposite endpoint has the
/// remainder.
///
/// Child order of the new root is `[first-side, other-side]`. Feature
/// columns are remapped; the suppressed old root (if any) and its features
/// are dropped, and the fresh root carries no features.
pub(crate) fn reroot_on_edge(
    tree: &Tree,
    view: &UnrootedView,
    edge_id: usize,
    first: VertexIndex,
    x_to_first: f64,
) -> Result<Tree, TreeError> {
    let pinched = view.edges[edge_id];
    let (end_a, end_b) = (first, pinched.opposite(first));
    let x = x_to_first.clamp(0.0, pinched.length);

    // Raw arena: survivors keep name/support, then the fresh root last.
    let num_source = tree.num_vertices();
    let mut source_to_raw: Vec<Option<VertexIndex>> = vec![None; num_source];
    let mut raw: Vec<Vertex> = Vec::with_capacity(num_source + 1);
    for index in 0..num_source {
        if Some(index) == view.suppressed_root {
            continue;
        }
        let raw_index = raw.len();
        let mut vertex = Vertex::new(raw_index);
        vertex.set_name(tree.vertex(index).name().map(String::from));
        vertex.set_support(tree.vertex(index).support());
        raw.push(vertex);
        source_to_raw[index] = Some(raw_index);
    }
    let root_raw = raw.len();
    raw.push(Vertex::new(root_raw));

    // Wire the two halves by DFS away from the pinched edge.
    let half_a = source_to_raw[end_a].expect("edge endpoint survives");
    let half_b = source_to_raw[end_b].expect("edge endpoint survives");
    raw[root_raw].set_children(vec![half_a, half_b]);
    raw[half_a].set_parent(Some(root_raw));
    raw[half_b].set_parent(Some(root_raw));
    set_branch(&mut raw[half_a], x, pinched.explicit);
    set_branch(&mut raw[half_b], pinched.length - x, pinched.explicit);

    // (vertex, arriving edge) pairs still to expand.
    let mut stack: Vec<(VertexIndex, usize)> = vec![(end_a, edge_id), (end_b, edge_id)];
    while let Some((at, from_edge)) = stack.pop() {
        let at_raw = source_to_raw[at].expect("reachable vertices survive");
        let mut children = Vec::new();
        for &next_edge in &view.incident[at] {
            if next_edge == from_edge {
                continue;
            }
            let edge = view.edges[next_edge];
            let neighbor = edge.opposite(at);
            let neighbor_raw = source_to_raw[neighbor].expect("reachable vertices survive");
            raw[neighbor_raw].set_parent(Some(at_raw));
            set_branch(&mut raw[neighbor_raw], edge.length, edge.explicit);
            children.push(neighbor_raw);
            stack.push((neighbor, next_edge));
        }
        raw[at_raw].set_children(children);
    }

    finish_edit(tree, raw, root_raw, &source_to_raw)
}

/// Sets a branch length, preserving "no explicit length" as `None`.
pub(crate) fn set_branch(vertex: &mut Vertex, length: f64, explicit: bool) {
    if explicit {
        vertex.set_branch_length(Some(BranchLength::new(length.max(0.0))));
    } else {
        vertex.set_branch_length(None);
    }
}

/// Canonicalizes a raw edited arena and carries name and remapped features
/// over from the source tree.
pub(crate) fn finish_edit(
    tree: &Tree,
    raw: Vec<Vertex>,
    root_raw: VertexIndex,
    source_to_raw: &[Option<VertexIndex>],
) -> Result<Tree, TreeError> {
    let num_new = raw.len();
    let (mut edited, raw_to_new) = Tree::from_arena(raw, root_raw)?;

    let source_to_new: Vec<Option<VertexIndex>> = source_to_raw
        .iter()
        .map(|raw_index| raw_index.and_then(|r| raw_to_new[r]))
        .collect();
    let features: FeatureStore = tree.features().remap(&source_to_new, num_new);
    edited.set_features(features);
    edited.set_name_opt(tree.name().cloned());
    debug_assert!(edited.is_valid());
    Ok(edited)
}
