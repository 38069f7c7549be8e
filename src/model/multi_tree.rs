//! Ordered collections of trees.
//!
//! Provides [MultiTree], an ordered sequence of [Tree] instances sharing no
//! structural state, as consumed by consensus and cloud-tree drawing code.
//! Those consumers assume a common tip-label set across members;
//! [MultiTree::shared_tip_labels] is the documented policy check for that
//! assumption (mismatch is an error, not a silent intersection).

use std::collections::BTreeSet;

use crate::error::TreeError;
use crate::model::tree::Tree;

// =#========================================================================#=
// MULTI TREE
// =#========================================================================#=
/// An ordered sequence of independent trees.
#[derive(Debug, Clone, Default)]
pub struct MultiTree {
    trees: Vec<Tree>,
}

impl MultiTree {
    /// Creates a collection from a vector of trees.
    pub fn new(trees: Vec<Tree>) -> Self {
        MultiTree { trees }
    }

    /// Returns the number of trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Returns `true` if the collection holds no trees.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Appends a tree.
    pub fn push(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Iterates over the trees in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tree> {
        self.trees.iter()
    }

    /// Verifies that every member tree carries the same tip-label set and
    /// returns that set.
    ///
    /// # Errors
    /// [TreeError::Structural] if the collection is empty or if any two
    /// members disagree on their tip labels.
    pub fn shared_tip_labels(&self) -> Result<BTreeSet<String>, TreeError> {
        let first = self
            .trees
            .first()
            .ok_or_else(|| TreeError::structural("empty tree collection"))?;
        let reference: BTreeSet<String> =
            first.tip_labels().iter().map(|s| s.to_string()).collect();

        for (position, tree) in self.trees.iter().enumerate().skip(1) {
            let labels: BTreeSet<String> =
                tree.tip_labels().iter().map(|s| s.to_string()).collect();
            if labels != reference {
                return Err(TreeError::structural(format!(
                    "tree {} has a different tip-label set than tree 0",
                    position
                )));
            }
        }
        Ok(reference)
    }
}

impl std::ops::Index<usize> for MultiTree {
    type Output = Tree;

    fn index(&self, index: usize) -> &Self::Output {
        &self.trees[index]
    }
}

impl IntoIterator for MultiTree {
    type Item = Tree;
    type IntoIter = std::vec::IntoIter<Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiTree {
    type Item = &'a Tree;
    type IntoIter = std::slice::Iter<'a, Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.iter()
    }
}

impl FromIterator<Tree> for MultiTree {
    fn from_iter<I: IntoIterator<Item = Tree>>(iter: I) -> Self {
        MultiTree {
            trees: iter.into_iter().collect(),
        }
    }
}
