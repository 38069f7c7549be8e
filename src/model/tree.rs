//! Tree module for phylogenetic tree representation.
//!
//! This module provides the core data structures for representing
//! phylogenetic trees:
//! - [Tree]: The main tree structure using the arena pattern for efficient
//!   memory layout.
//! - [TreeBuilder]: Bottom-up programmatic construction; the surface an
//!   external parser targets.
//! - [VertexIndex] is used to index vertices.
//!
//! # Canonical index order
//! Vertex indices (`idx`) are assigned by **post-order** traversal under the
//! current child order: children before parents, left to right, so the root
//! always has index `n - 1`. The arena position of every vertex equals its
//! index. Structural edits return new trees with indices recomputed from
//! scratch, so `idx` values are always unique and contiguous in `[0, n-1]`.

use std::collections::VecDeque;

use crate::error::TreeError;
use crate::model::features::{FeatureStore, FeatureValue};
use crate::model::vertex::{BranchLength, Vertex};

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// Feature keys that are derived from vertex fields rather than stored in
/// the [FeatureStore]; always resolvable through [Tree::get_node_data].
const RESERVED_FEATURES: [&str; 4] = ["idx", "name", "dist", "support"];

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Aim is to avoid referencing troubles as well as to provide
/// efficient memory layout and cache locality for traversal operations.
/// Polytomies are allowed; the tree is rooted in the structural sense
/// (exactly one vertex without a parent) even when it represents an
/// unrooted topology via a basal trifurcation.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Arena position equals vertex index; indices are post-order ranks,
///   so the root is the last vertex.
/// - Per-vertex feature values live in a parallel [FeatureStore].
///
/// # Construction
/// Trees are built through [TreeBuilder], which validates the structure and
/// canonicalizes indices. Structural edits (`root`, `unroot`, `ladderize`,
/// `prune`, ...) never mutate in place; they return new, fully independent
/// trees, so holding references into a tree while deriving others from it
/// is always safe.
///
/// # Example
/// ```
/// use kauri::model::tree::TreeBuilder;
///
/// // Build the tree ((A:0.2,B:0.2):0.2,C:0.4);
/// let mut builder = TreeBuilder::new(3);
/// let a = builder.add_leaf("A", Some(0.2));
/// let b = builder.add_leaf("B", Some(0.2));
/// let c = builder.add_leaf("C", Some(0.4));
/// let ab = builder.add_internal(vec![a, b], Some(0.2));
/// builder.add_root(vec![ab, c]);
/// let tree = builder.build().unwrap();
///
/// assert_eq!(tree.num_tips(), 3);
/// assert_eq!(tree.num_vertices(), 5);
/// assert!(tree.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Vertices of this tree (arena pattern); position == index
    vertices: Vec<Vertex>,

    /// Index of the root of this tree (always `num_vertices - 1`)
    root_index: VertexIndex,

    /// Per-vertex feature values, parallel to the arena
    features: FeatureStore,

    /// Name of tree; optional
    name: Option<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Returns a reference to the root vertex.
    pub fn root_vertex(&self) -> &Vertex {
        &self.vertices[self.root_index]
    }

    /// Returns the index of the root vertex.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self.vertices[index]
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of tips (leaves) in this tree.
    pub fn num_tips(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal (non-leaf) vertices in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| !v.is_leaf()).count()
    }

    /// Returns the tip indices in left-to-right traversal order.
    pub fn tip_indices(&self) -> Vec<VertexIndex> {
        self.pre_order_iter()
            .filter(|v| v.is_leaf())
            .map(|v| v.index())
            .collect()
    }

    /// Returns the tip names in left-to-right traversal order.
    ///
    /// Unnamed tips yield an empty string.
    pub fn tip_labels(&self) -> Vec<&str> {
        self.pre_order_iter()
            .filter(|v| v.is_leaf())
            .map(|v| v.name().unwrap_or(""))
            .collect()
    }

    /// Returns the per-vertex feature store.
    pub fn features(&self) -> &FeatureStore {
        &self.features
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// ============================================================================
// Derived state: edge list, depths, MRCA, bipartitions
// ============================================================================
impl Tree {
    /// Returns the edge list as `(parent_index, child_index)` pairs, ordered
    /// by child index.
    ///
    /// Together with a coordinate array (see [crate::layout]) this is the
    /// full contract a render backend needs; it must treat both as
    /// read-only and index-aligned.
    pub fn edge_list(&self) -> Vec<(VertexIndex, VertexIndex)> {
        self.vertices
            .iter()
            .filter_map(|v| v.parent().map(|p| (p, v.index())))
            .collect()
    }

    /// Returns the depth of every vertex, indexed by vertex index.
    ///
    /// # Arguments
    /// * `use_branch_lengths` - If `true`, depth is cumulative distance from
    ///   the root; if `false`, depth is counted in edges (cladogram style).
    pub fn depths(&self, use_branch_lengths: bool) -> Vec<f64> {
        let mut depths = vec![0.0; self.num_vertices()];
        for vertex in self.pre_order_iter() {
            if let Some(parent) = vertex.parent() {
                let step = if use_branch_lengths { vertex.dist() } else { 1.0 };
                depths[vertex.index()] = depths[parent] + step;
            }
        }
        depths
    }

    /// Returns the most recent common ancestor of the given vertices.
    ///
    /// # Errors
    /// [TreeError::Structural] if `indices` is empty or references a vertex
    /// outside this tree.
    pub fn mrca(&self, indices: &[VertexIndex]) -> Result<VertexIndex, TreeError> {
        if indices.is_empty() {
            return Err(TreeError::structural("MRCA of an empty vertex set"));
        }
        for &index in indices {
            if index >= self.num_vertices() {
                return Err(TreeError::structural(format!(
                    "vertex {} does not belong to this tree ({} vertices)",
                    index,
                    self.num_vertices()
                )));
            }
        }

        // Walk the first vertex's root path, then lift every other vertex
        // onto it. Post-order indices increase towards the root, which makes
        // the ancestor test a cheap comparison-free set lookup.
        let mut on_path = vec![false; self.num_vertices()];
        let mut current = indices[0];
        loop {
            on_path[current] = true;
            match self[current].parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        let mut mrca = indices[0];
        for &index in &indices[1..] {
            let mut current = index;
            while !on_path[current] {
                current = self[current]
                    .parent()
                    .expect("root is on every root path");
            }
            // The deepest path vertex reached by any input is the MRCA;
            // post-order rank orders ancestors above descendants.
            if current > mrca {
                mrca = current;
            }
        }
        Ok(mrca)
    }

    /// Returns the set of tips (as indices) in the clade below each vertex,
    /// indexed by vertex index. Each list is sorted.
    pub fn clade_tip_sets(&self) -> Vec<Vec<VertexIndex>> {
        let mut sets: Vec<Vec<VertexIndex>> = vec![Vec::new(); self.num_vertices()];
        for vertex in self.post_order_iter() {
            let index = vertex.index();
            if vertex.is_leaf() {
                sets[index].push(index);
            } else {
                let mut merged = Vec::new();
                for &child in vertex.children() {
                    merged.extend_from_slice(&sets[child]);
                }
                merged.sort_unstable();
                sets[index] = merged;
            }
        }
        sets
    }

    /// Returns the non-trivial bipartitions of this tree as tip-name sets.
    ///
    /// Each internal edge splits the tips in two; the returned set contains,
    /// for every such split where both sides have at least two tips, the side
    /// *not* containing the lexicographically smallest tip name. This
    /// normalization makes bipartition sets comparable across different
    /// rootings of the same topology, which is what consensus and
    /// distance consumers compare.
    pub fn bipartitions(&self) -> std::collections::HashSet<std::collections::BTreeSet<String>> {
        let mut result = std::collections::HashSet::new();
        let num_tips = self.num_tips();
        if num_tips < 4 {
            return result;
        }

        let reference = self
            .tip_labels()
            .iter()
            .min()
            .map(|s| s.to_string())
            .unwrap_or_default();

        let clade_sets = self.clade_tip_sets();
        for vertex in self.vertices.iter() {
            if vertex.is_leaf() || vertex.is_root() {
                continue;
            }
            let clade: std::collections::BTreeSet<String> = clade_sets[vertex.index()]
                .iter()
                .map(|&t| self[t].name().unwrap_or("").to_string())
                .collect();
            if clade.len() < 2 || num_tips - clade.len() < 2 {
                continue;
            }
            if clade.contains(&reference) {
                let complement: std::collections::BTreeSet<String> = self
                    .tip_labels()
                    .iter()
                    .map(|s| s.to_string())
                    .filter(|name| !clade.contains(name))
                    .collect();
                result.insert(complement);
            } else {
                result.insert(clade);
            }
        }
        result
    }
}

// ============================================================================
// Feature access
// ============================================================================
impl Tree {
    /// Returns one feature value per vertex, in index order, with missing
    /// values filled by `default`.
    ///
    /// The reserved features `"idx"`, `"name"`, `"dist"` and `"support"` are
    /// derived from vertex fields and always resolvable; any other key is
    /// looked up in the feature store. The returned vector always has length
    /// `num_vertices()`, so it composes directly with coordinate arrays as a
    /// styling input.
    ///
    /// # Errors
    /// [TreeError::UnknownFeature] if the key is not reserved and not set on
    /// any vertex. A feature set on only a subset of vertices is *not* an
    /// error; the gaps are filled with `default`.
    ///
    /// # Example
    /// ```
    /// use kauri::model::features::FeatureValue;
    /// use kauri::model::tree::TreeBuilder;
    ///
    /// let mut builder = TreeBuilder::new(2);
    /// let a = builder.add_leaf("A", Some(1.0));
    /// let b = builder.add_leaf("B", Some(2.0));
    /// builder.add_root(vec![a, b]);
    /// let tree = builder.build().unwrap();
    ///
    /// let dists = tree.get_node_data("dist", FeatureValue::Float(0.0)).unwrap();
    /// assert_eq!(dists.len(), 3);
    /// assert_eq!(dists[tree.root_index()], FeatureValue::Float(0.0));
    /// ```
    pub fn get_node_data(
        &self,
        feature: &str,
        default: FeatureValue,
    ) -> Result<Vec<FeatureValue>, TreeError> {
        match feature {
            "idx" => Ok(self
                .vertices
                .iter()
                .map(|v| FeatureValue::Int(v.index() as i64))
                .collect()),
            "name" => Ok(self
                .vertices
                .iter()
                .map(|v| match v.name() {
                    Some(name) => FeatureValue::from(name),
                    None => default.clone(),
                })
                .collect()),
            "dist" => Ok(self
                .vertices
                .iter()
                .map(|v| FeatureValue::Float(v.dist()))
                .collect()),
            "support" => Ok(self
                .vertices
                .iter()
                .map(|v| match v.support() {
                    Some(support) => FeatureValue::Float(support),
                    None => default.clone(),
                })
                .collect()),
            key => {
                let column = self
                    .features
                    .get_all_for_key(key)
                    .ok_or_else(|| TreeError::UnknownFeature(key.to_string()))?;
                Ok(column
                    .iter()
                    .map(|entry| entry.clone().unwrap_or_else(|| default.clone()))
                    .collect())
            }
        }
    }

    /// Sets a feature value on a single vertex.
    ///
    /// # Panics
    /// Panics if `feature` is one of the reserved keys (`"idx"`, `"name"`,
    /// `"dist"`, `"support"`; those are vertex fields, not stored features)
    /// or if `index` is out of bounds.
    pub fn set_node_data<V: Into<FeatureValue>>(
        &mut self,
        feature: &str,
        index: VertexIndex,
        value: V,
    ) {
        assert!(
            !RESERVED_FEATURES.contains(&feature),
            "'{}' is a reserved feature name",
            feature
        );
        self.features.set(feature.to_string(), index, value.into());
    }
}

// ============================================================================
// Validation
// ============================================================================
impl Tree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Every vertex's stored index matches its arena position
    /// - Exactly one vertex (the root) has no parent, and it is the last one
    /// - All child indices are valid and point back to the correct parent
    /// - All parent indices are valid and include this vertex as a child
    /// - Indices are post-order ranks (every child precedes its parent)
    /// - There is at least one leaf
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.vertices.is_empty() {
            return false;
        }

        if self.root_index != self.vertices.len() - 1 {
            return false;
        }

        let mut leaf_count = 0;
        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            if vertex.is_leaf() {
                leaf_count += 1;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() {
                    return false;
                }
                // Post-order: children precede parents.
                if child >= index {
                    return false;
                }
                if self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            match vertex.parent() {
                None => {
                    if index != self.root_index {
                        return false;
                    }
                }
                Some(parent) => {
                    if parent >= self.vertices.len() {
                        return false;
                    }
                    if !self.vertices[parent].children().contains(&index) {
                        return false;
                    }
                }
            }
        }

        leaf_count >= 1
    }
}

// ============================================================================
// Traversal
// ============================================================================
/// Order in which [Tree::traverse] visits vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Parents before children
    PreOrder,
    /// Children before parents
    PostOrder,
    /// Breadth-first, level by level
    LevelOrder,
}

impl Tree {
    /// Returns an iterator over the tree in the given order.
    ///
    /// Every vertex is visited exactly once; the iterator is lazy and can be
    /// restarted by calling this method again. Since edits never mutate a
    /// tree in place, traversal can never observe a structural change.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        match order {
            TraversalOrder::PreOrder => Traversal::Pre(self.pre_order_iter()),
            TraversalOrder::PostOrder => Traversal::Post(self.post_order_iter()),
            TraversalOrder::LevelOrder => Traversal::Level(self.level_order_iter()),
        }
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children before the vertex
    /// itself. This is useful for computing heights, aggregating data from
    /// leaves upward, etc.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in level-order (breadth-first).
    pub fn level_order_iter(&self) -> LevelOrderIter<'_> {
        LevelOrderIter::new(self)
    }
}

/// Iterator dispatch for [Tree::traverse].
pub enum Traversal<'a> {
    /// Pre-order traversal
    Pre(PreOrderIter<'a>),
    /// Post-order traversal
    Post(PostOrderIter<'a>),
    /// Level-order traversal
    Level(LevelOrderIter<'a>),
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traversal::Pre(iter) => iter.next(),
            Traversal::Post(iter) => iter.next(),
            Traversal::Level(iter) => iter.next(),
        }
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// Uses a stack-based approach to traverse the tree without recursion.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        PreOrderIter {
            tree,
            stack: vec![tree.root_index],
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse so the leftmost is processed first.
        for &child in vertex.children().iter().rev() {
            self.stack.push(child);
        }

        Some(vertex)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        PostOrderIter {
            tree,
            stack: vec![(tree.root_index, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for level-order traversal (breadth-first).
pub struct LevelOrderIter<'a> {
    tree: &'a Tree,
    queue: VecDeque<VertexIndex>,
}

impl<'a> LevelOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(tree.root_index);
        LevelOrderIter { tree, queue }
    }
}

impl<'a> Iterator for LevelOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.queue.pop_front()?;
        let vertex = &self.tree[index];
        for &child in vertex.children() {
            self.queue.push_back(child);
        }
        Some(vertex)
    }
}

// ============================================================================
// Canonicalization (crate-internal)
// ============================================================================
impl Tree {
    /// Builds a canonical tree from a raw arena.
    ///
    /// The arena may be in any order and may contain stale `index` fields;
    /// parent/children links (as arena positions) must be consistent and
    /// every entry must be reachable from `root_index`. Vertices are
    /// renumbered to post-order ranks and reordered so arena position equals
    /// index.
    ///
    /// # Returns
    /// The canonical tree and the old-position-to-new-index mapping, which
    /// callers use to remap feature columns.
    pub(crate) fn from_arena(
        arena: Vec<Vertex>,
        root_index: VertexIndex,
    ) -> Result<(Tree, Vec<Option<VertexIndex>>), TreeError> {
        if arena.is_empty() {
            return Err(TreeError::structural("cannot build a tree with no vertices"));
        }

        // Post-order walk over the raw arena, detecting cycles by bounding
        // the number of visits.
        let mut old_to_new: Vec<Option<VertexIndex>> = vec![None; arena.len()];
        let mut post_order: Vec<VertexIndex> = Vec::with_capacity(arena.len());
        let mut stack: Vec<(VertexIndex, bool)> = vec![(root_index, false)];
        let mut visits = 0usize;

        while let Some((old_index, children_visited)) = stack.pop() {
            if old_index >= arena.len() {
                return Err(TreeError::structural(format!(
                    "child index {} out of bounds ({} vertices)",
                    old_index,
                    arena.len()
                )));
            }
            let vertex = &arena[old_index];
            if children_visited || vertex.children().is_empty() {
                if old_to_new[old_index].is_some() {
                    return Err(TreeError::structural(
                        "vertex reachable twice; not a tree",
                    ));
                }
                old_to_new[old_index] = Some(post_order.len());
                post_order.push(old_index);
            } else {
                visits += 1;
                if visits > arena.len() {
                    return Err(TreeError::structural("cycle detected; not a tree"));
                }
                stack.push((old_index, true));
                for &child in vertex.children().iter().rev() {
                    stack.push((child, false));
                }
            }
        }

        if post_order.len() != arena.len() {
            return Err(TreeError::structural(format!(
                "{} of {} vertices unreachable from root",
                arena.len() - post_order.len(),
                arena.len()
            )));
        }

        let mut vertices: Vec<Vertex> = Vec::with_capacity(arena.len());
        for (new_index, &old_index) in post_order.iter().enumerate() {
            let mut vertex = arena[old_index].clone();
            vertex.set_index(new_index);
            vertex.set_parent(
                vertex
                    .parent()
                    .map(|p| old_to_new[p].expect("parent is reachable")),
            );
            let children = vertex
                .children()
                .iter()
                .map(|&c| old_to_new[c].expect("child is reachable"))
                .collect();
            vertex.set_children(children);
            vertices.push(vertex);
        }

        let root_index = old_to_new[root_index].expect("root is reachable");
        let num_vertices = vertices.len();
        let tree = Tree {
            vertices,
            root_index,
            features: FeatureStore::new(num_vertices),
            name: None,
        };
        Ok((tree, old_to_new))
    }

    /// Replaces the feature store, e.g. with one remapped through an edit.
    pub(crate) fn set_features(&mut self, features: FeatureStore) {
        self.features = features;
    }

    /// Carries the tree name over from an edit source.
    pub(crate) fn set_name_opt(&mut self, name: Option<String>) {
        self.name = name;
    }
}

// =#========================================================================#=
// TREE BUILDER
// =#========================================================================#=
/// Bottom-up construction of a [Tree].
///
/// Add leaves and internal vertices (children first), finish with
/// [add_root](TreeBuilder::add_root), then call [build](TreeBuilder::build),
/// which validates the structure and canonicalizes indices. The vertex
/// indices returned by the `add_*` methods are construction handles; `build`
/// renumbers everything to post-order, so do not assume they survive.
///
/// # Example
/// ```
/// use kauri::model::tree::TreeBuilder;
///
/// let mut builder = TreeBuilder::new(2);
/// let a = builder.add_leaf("A", Some(1.0));
/// let b = builder.add_leaf("B", Some(2.0));
/// builder.add_root(vec![a, b]);
/// let tree = builder.build().unwrap();
/// assert_eq!(tree.num_tips(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    vertices: Vec<Vertex>,
    root: Option<VertexIndex>,
    name: Option<String>,
}

impl TreeBuilder {
    /// Creates a new builder with capacity for a binary tree on `num_leaves`
    /// leaves. The hint only affects allocation; any tree shape can be built.
    pub fn new(num_leaves: usize) -> Self {
        let capacity = if num_leaves > 0 { 2 * num_leaves - 1 } else { 0 };
        TreeBuilder {
            vertices: Vec::with_capacity(capacity),
            root: None,
            name: None,
        }
    }

    /// Adds a leaf vertex, returning its construction handle.
    ///
    /// # Panics
    /// Panics if `branch_length` is negative or not finite.
    pub fn add_leaf(&mut self, name: &str, branch_length: Option<f64>) -> VertexIndex {
        let index = self.vertices.len();
        let mut vertex = Vertex::new(index);
        vertex.set_name(Some(name.to_string()));
        vertex.set_branch_length(branch_length.map(BranchLength::new));
        self.vertices.push(vertex);
        index
    }

    /// Adds an internal vertex with the given children, returning its
    /// construction handle.
    ///
    /// # Panics
    /// Panics if `branch_length` is negative or not finite, or if a child
    /// handle is unknown or already has a parent.
    pub fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<f64>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        let mut vertex = Vertex::new(index);
        vertex.set_branch_length(branch_length.map(BranchLength::new));
        for &child in &children {
            assert!(child < index, "unknown child handle {}", child);
            assert!(
                self.vertices[child].parent().is_none(),
                "child {} already has a parent",
                child
            );
            self.vertices[child].set_parent(Some(index));
        }
        vertex.set_children(children);
        self.vertices.push(vertex);
        index
    }

    /// Adds the root vertex with the given children, completing the
    /// structure.
    ///
    /// # Panics
    /// Panics if a child handle is unknown or already has a parent.
    pub fn add_root(&mut self, children: Vec<VertexIndex>) -> VertexIndex {
        let index = self.add_internal(children, None);
        self.root = Some(index);
        index
    }

    /// Sets a name on a previously added vertex (e.g. an internal clade name).
    ///
    /// # Panics
    /// Panics if `vertex` is not a known handle.
    pub fn set_vertex_name(&mut self, vertex: VertexIndex, name: &str) {
        self.vertices[vertex].set_name(Some(name.to_string()));
    }

    /// Sets a support value on a previously added vertex.
    ///
    /// # Panics
    /// Panics if `vertex` is not a known handle.
    pub fn set_support(&mut self, vertex: VertexIndex, support: f64) {
        self.vertices[vertex].set_support(Some(support));
    }

    /// Sets the name of the tree under construction.
    pub fn set_tree_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Finalizes the building process: validates the structure, renumbers
    /// vertices to canonical post-order, and returns the tree.
    ///
    /// # Errors
    /// [TreeError::Structural] if no root was added, if any vertex is
    /// unreachable from the root, or if the links do not form a tree.
    pub fn build(self) -> Result<Tree, TreeError> {
        let root = self
            .root
            .ok_or_else(|| TreeError::structural("no root added"))?;
        let (mut tree, _) = Tree::from_arena(self.vertices, root)?;
        tree.set_name_opt(self.name);
        debug_assert!(tree.is_valid());
        Ok(tree)
    }
}
