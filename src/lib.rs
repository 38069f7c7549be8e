//! Kauri is a library for representing phylogenetic trees in memory,
//! editing their structure, and computing plotting coordinates.
//!
//! Core functionality provided:
//! - Tree model: arena-stored vertices addressed by contiguous indices
//!   (`idx`), assigned in canonical post-order and recomputed on every
//!   structural edit. Polytomies are supported. See [crate::model].
//! - Traversal: lazy pre-order, post-order, and level-order iterators.
//! - Queries: resolve vertices by exact name, name list, regex pattern, or
//!   predicate through an explicit [Selector](crate::query::Selector) type.
//! - Structural edits: outgroup rooting ([Tree::root](model::tree::Tree)),
//!   unrooting, minimal-ancestor-deviation rooting, ladderizing, and
//!   pruning. Every edit returns a new, fully independent tree — the source
//!   is never mutated, so edits chain safely and concurrent readers of an
//!   existing tree need no locking.
//! - Layout: a deterministic coordinate engine for rectangular, circular,
//!   and unrooted equal-angle drawings; see [crate::layout].
//! - Per-vertex features: arbitrary named values with a missing-value
//!   default policy, index-aligned with coordinates for styling.
//!
//! Limitations (by design, handled by external collaborators):
//! - No Newick/Nexus parsing or serialization; construct trees through
//!   [TreeBuilder](model::tree::TreeBuilder).
//! - No rendering; [Layout](layout::Layout) is the full contract a vector
//!   backend needs.
//! - No consensus or distance algorithms; they consume traversal,
//!   [bipartitions](model::tree::Tree::bipartitions), and
//!   [MultiTree](model::multi_tree::MultiTree).
//!
//! # Example
//! ```
//! use kauri::generate::random_bifurcating;
//! use kauri::layout::LayoutStyle;
//! use kauri::query::Selector;
//!
//! let tree = random_bifurcating(8, 42).unwrap();
//! let ladderized = tree.ladderize(false).unwrap();
//! let layout = ladderized.layout(LayoutStyle::default());
//! assert_eq!(layout.coords.len(), ladderized.num_vertices());
//!
//! // The source tree is untouched by the edit.
//! assert_eq!(tree.num_tips(), 8);
//! let kea = ladderized.get_nodes(&Selector::pattern("^t-[0-3]$")).unwrap();
//! assert_eq!(kea.len(), 4);
//! ```

pub mod edit;
pub mod error;
pub mod generate;
pub mod layout;
pub mod model;
pub mod query;

pub use crate::error::TreeError;
pub use crate::layout::{Layout, LayoutStyle, Orientation};
pub use crate::model::{
    BranchLength, FeatureStore, FeatureValue, MultiTree, TraversalOrder, Tree, TreeBuilder,
    Vertex, VertexIndex,
};
pub use crate::query::Selector;
