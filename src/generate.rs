//! Deterministic random tree generation.
//!
//! Useful for tests, benchmarks, and demo drawings: topology comes from a
//! seeded [StdRng], so the same `(num_tips, seed)` pair always yields the
//! same tree.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::error::TreeError;
use crate::model::tree::{Tree, TreeBuilder, VertexIndex};

/// Generates a random bifurcating tree with `num_tips` tips.
///
/// Tips are named `t-0` .. `t-{n-1}` and every branch has length `1.0`.
/// The topology is built by repeatedly joining two subtrees picked at
/// random from the remaining pool (a coalescent-style construction), so all
/// randomness comes from `seed`.
///
/// # Errors
/// [TreeError::Structural] if `num_tips` is zero.
///
/// # Example
/// ```
/// use kauri::generate::random_bifurcating;
///
/// let tree = random_bifurcating(8, 123).unwrap();
/// let again = random_bifurcating(8, 123).unwrap();
/// assert_eq!(tree.num_tips(), 8);
/// assert_eq!(tree.edge_list(), again.edge_list());
/// ```
pub fn random_bifurcating(num_tips: usize, seed: u64) -> Result<Tree, TreeError> {
    if num_tips == 0 {
        return Err(TreeError::structural("a tree needs at least one tip"));
    }
    if num_tips == 1 {
        // The lone tip is the root; a degenerate but valid tree.
        let mut builder = TreeBuilder::new(1);
        let root = builder.add_root(vec![]);
        builder.set_vertex_name(root, "t-0");
        return builder.build();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = TreeBuilder::new(num_tips);

    let mut pool: Vec<VertexIndex> = (0..num_tips)
        .map(|i| builder.add_leaf(&format!("t-{}", i), Some(1.0)))
        .collect();

    while pool.len() > 2 {
        let first = rng.gen_range(0..pool.len());
        let a = pool.swap_remove(first);
        let second = rng.gen_range(0..pool.len());
        let b = pool.swap_remove(second);
        trace!(a, b, "joining subtrees");
        pool.push(builder.add_internal(vec![a, b], Some(1.0)));
    }

    builder.add_root(vec![pool[0], pool[1]]);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_tree() {
        let a = random_bifurcating(16, 7).unwrap();
        let b = random_bifurcating(16, 7).unwrap();
        assert_eq!(a.edge_list(), b.edge_list());
        assert_eq!(a.tip_labels(), b.tip_labels());
    }

    #[test]
    fn different_seed_usually_differs() {
        let a = random_bifurcating(16, 7).unwrap();
        let b = random_bifurcating(16, 8).unwrap();
        assert_ne!(a.edge_list(), b.edge_list());
    }

    #[test]
    fn tree_is_strictly_bifurcating() {
        let tree = random_bifurcating(9, 3).unwrap();
        for vertex in tree.pre_order_iter() {
            if !vertex.is_leaf() {
                assert_eq!(vertex.children().len(), 2);
            }
        }
        assert_eq!(tree.num_vertices(), 2 * 9 - 1);
    }

    #[test]
    fn single_tip_is_valid() {
        let tree = random_bifurcating(1, 0).unwrap();
        assert_eq!(tree.num_vertices(), 1);
        assert!(tree.is_valid());
    }
}
