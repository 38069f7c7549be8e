//! Vertex module for phylogenetic tree representation.
//!
//! A [Vertex] is a single node in the arena of a
//! [Tree](crate::model::tree::Tree): it stores its own index, an optional
//! parent index, an *ordered* list of child indices, and its scalar
//! attributes (name, branch length, support). Child order is meaningful:
//! it determines left-to-right drawing position and is the target of
//! ladderizing.

use crate::model::tree::VertexIndex;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// A vertex (node) in a phylogenetic tree arena.
///
/// Unlike a strictly binary model, a vertex may have any number of children,
/// so polytomies (e.g. the basal trifurcation of an unrooted tree) are
/// representable directly.
///
/// # Invariants
/// - `index` equals this vertex's position in the tree arena (canonical form).
/// - Exactly one vertex per tree has `parent == None`; that vertex is the root.
/// - `branch_length` is non-negative if present; the root's is always `None`
///   and its distance is reported as `0.0`.
/// - Leaves have an empty `children` list.
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex; `None` only for the root
    parent: Option<VertexIndex>,
    /// Indices of child vertices, in drawing order
    children: Vec<VertexIndex>,
    /// Vertex name; typically set for leaves, often empty for internals
    name: Option<String>,
    /// Distance to parent (optional, non-negative if present)
    branch_length: Option<BranchLength>,
    /// Support value (e.g. bootstrap or posterior probability)
    support: Option<f64>,
}

impl Vertex {
    /// Creates a new vertex with the given index and no relationships set.
    pub(crate) fn new(index: VertexIndex) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            name: None,
            branch_length: None,
            support: None,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the index of the parent, or `None` if this is the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns the child indices in drawing order.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the name, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the branch length to the parent, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns the distance to the parent as a plain float.
    ///
    /// Defaults to `0.0` for vertices without an explicit branch length;
    /// in particular the root always reports `0.0`.
    pub fn dist(&self) -> f64 {
        self.branch_length.map_or(0.0, |bl| *bl)
    }

    /// Returns the support value, if set.
    pub fn support(&self) -> Option<f64> {
        self.support
    }

    // ------------------------------------------------------------------------
    // Crate-internal mutation; used by the builder and by edits while they
    // assemble a new arena. Arena position and `index` must be kept in sync
    // by the caller.
    // ------------------------------------------------------------------------

    pub(crate) fn set_index(&mut self, index: VertexIndex) {
        self.index = index;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<VertexIndex>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: VertexIndex) {
        self.children.push(child);
    }

    pub(crate) fn set_children(&mut self, children: Vec<VertexIndex>) {
        self.children = children;
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }

    pub(crate) fn set_support(&mut self, support: Option<f64>) {
        self.support = support;
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Arguments
    /// * `length` - The branch length value (must be non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(
            length >= 0.0,
            "Branch length must be non-negative, got {}",
            length
        );
        assert!(
            length.is_finite(),
            "Branch length must be finite, got {}",
            length
        );
        BranchLength(length)
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}
