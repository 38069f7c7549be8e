//! Core tree data model.

/// Phylogenetic tree structure, builder, and traversal
pub mod tree;
/// Tree vertices and branch lengths
pub mod vertex;
/// Per-vertex feature storage
pub mod features;
/// Ordered collections of trees
pub mod multi_tree;

pub use features::{FeatureStore, FeatureValue};
pub use multi_tree::MultiTree;
pub use tree::{TraversalOrder, Tree, TreeBuilder, VertexIndex};
pub use vertex::{BranchLength, Vertex};
