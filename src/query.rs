//! Vertex selection by name, pattern, or predicate.
//!
//! Provides the [Selector] type used by structural edits and queries to
//! resolve a set of vertices. A selector is an explicit tagged variant
//! (exact name, name list, regex pattern, predicate function) resolved by a
//! single query function, rather than an overloaded string syntax: callers
//! say what kind of match they mean.

use regex::Regex;

use crate::error::TreeError;
use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::Vertex;

// =#========================================================================#=
// SELECTOR
// =#========================================================================#=
/// Specifies a set of vertices to resolve against a [Tree].
///
/// # Example
/// ```
/// use kauri::query::Selector;
/// use kauri::model::tree::TreeBuilder;
///
/// let mut builder = TreeBuilder::new(3);
/// let a = builder.add_leaf("kea", Some(1.0));
/// let b = builder.add_leaf("kaka", Some(1.0));
/// let c = builder.add_leaf("kakapo", Some(1.0));
/// let ab = builder.add_internal(vec![a, b], Some(1.0));
/// builder.add_root(vec![ab, c]);
/// let tree = builder.build().unwrap();
///
/// // All names starting with "kaka"
/// let matches = tree.get_nodes(&Selector::pattern("^kaka")).unwrap();
/// assert_eq!(matches.len(), 2);
/// ```
pub enum Selector {
    /// Matches the single vertex with exactly this name.
    Name(String),
    /// Matches every vertex whose name is in this list.
    Names(Vec<String>),
    /// Matches every vertex whose name matches this regular expression.
    Pattern(String),
    /// Matches every vertex for which the predicate returns `true`.
    Predicate(Box<dyn Fn(&Vertex) -> bool>),
}

impl Selector {
    /// Convenience constructor for [Selector::Name].
    pub fn name<S: Into<String>>(name: S) -> Self {
        Selector::Name(name.into())
    }

    /// Convenience constructor for [Selector::Names].
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selector::Names(names.into_iter().map(Into::into).collect())
    }

    /// Convenience constructor for [Selector::Pattern].
    pub fn pattern<S: Into<String>>(pattern: S) -> Self {
        Selector::Pattern(pattern.into())
    }

    /// Convenience constructor for [Selector::Predicate].
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Vertex) -> bool + 'static,
    {
        Selector::Predicate(Box::new(predicate))
    }

    /// A short description of the selector for error messages.
    fn describe(&self) -> String {
        match self {
            Selector::Name(name) => name.clone(),
            Selector::Names(names) => names.join(","),
            Selector::Pattern(pattern) => format!("~{}", pattern),
            Selector::Predicate(_) => "<predicate>".to_string(),
        }
    }
}

impl std::fmt::Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Selector({})", self.describe())
    }
}

// ============================================================================
// Resolution
// ============================================================================
impl Tree {
    /// Resolves a selector to all matching vertices, in index order.
    ///
    /// # Errors
    /// - [TreeError::NotFound] if nothing matched.
    /// - [TreeError::InvalidPattern] if a [Selector::Pattern] fails to
    ///   compile as a regular expression.
    pub fn get_nodes(&self, selector: &Selector) -> Result<Vec<VertexIndex>, TreeError> {
        let matches = self.resolve(selector)?;
        if matches.is_empty() {
            return Err(TreeError::not_found(selector.describe()));
        }
        Ok(matches)
    }

    /// Resolves a selector that must match exactly one vertex.
    ///
    /// # Errors
    /// - [TreeError::NotFound] if nothing matched.
    /// - [TreeError::Ambiguous] if more than one vertex matched.
    /// - [TreeError::InvalidPattern] if a [Selector::Pattern] fails to
    ///   compile.
    pub fn get_node(&self, selector: &Selector) -> Result<VertexIndex, TreeError> {
        let matches = self.get_nodes(selector)?;
        if matches.len() > 1 {
            return Err(TreeError::ambiguous(selector.describe(), matches.len()));
        }
        Ok(matches[0])
    }

    /// Resolves a selector to matching *tips* only, in index order.
    ///
    /// Used by edits whose argument designates a tip set (outgroup rooting,
    /// pruning).
    ///
    /// # Errors
    /// Same as [Tree::get_nodes].
    pub fn get_tips(&self, selector: &Selector) -> Result<Vec<VertexIndex>, TreeError> {
        let matches: Vec<VertexIndex> = self
            .get_nodes(selector)?
            .into_iter()
            .filter(|&index| self[index].is_leaf())
            .collect();
        if matches.is_empty() {
            return Err(TreeError::not_found(selector.describe()));
        }
        Ok(matches)
    }

    fn resolve(&self, selector: &Selector) -> Result<Vec<VertexIndex>, TreeError> {
        let matcher: Box<dyn Fn(&Vertex) -> bool + '_> = match selector {
            Selector::Name(name) => {
                let name = name.clone();
                Box::new(move |v: &Vertex| v.name() == Some(name.as_str()))
            }
            Selector::Names(names) => {
                let names = names.clone();
                Box::new(move |v: &Vertex| {
                    v.name().is_some_and(|n| names.iter().any(|m| m == n))
                })
            }
            Selector::Pattern(pattern) => {
                let regex =
                    Regex::new(pattern).map_err(|e| TreeError::InvalidPattern(e.to_string()))?;
                Box::new(move |v: &Vertex| v.name().is_some_and(|n| regex.is_match(n)))
            }
            Selector::Predicate(predicate) => Box::new(predicate),
        };

        Ok((0..self.num_vertices())
            .filter(|&index| matcher(&self[index]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tree::TreeBuilder;

    fn parrot_tree() -> Tree {
        let mut builder = TreeBuilder::new(3);
        let kea = builder.add_leaf("kea", Some(1.0));
        let kaka = builder.add_leaf("kaka", Some(1.0));
        let kakapo = builder.add_leaf("kakapo", Some(1.0));
        let nestor = builder.add_internal(vec![kea, kaka], Some(1.0));
        builder.set_vertex_name(nestor, "nestor");
        builder.add_root(vec![nestor, kakapo]);
        builder.build().unwrap()
    }

    #[test]
    fn exact_name_matches_single_vertex() {
        let tree = parrot_tree();
        let index = tree.get_node(&Selector::name("kakapo")).unwrap();
        assert_eq!(tree[index].name(), Some("kakapo"));
    }

    #[test]
    fn missing_name_is_not_found() {
        let tree = parrot_tree();
        assert!(matches!(
            tree.get_node(&Selector::name("moa")),
            Err(TreeError::NotFound(_))
        ));
    }

    #[test]
    fn pattern_matching_several_is_ambiguous_for_single_query() {
        let tree = parrot_tree();
        let err = tree.get_node(&Selector::pattern("^kaka")).unwrap_err();
        assert!(matches!(err, TreeError::Ambiguous { num_matches: 2, .. }));
    }

    #[test]
    fn invalid_regex_is_reported_not_panicked() {
        let tree = parrot_tree();
        assert!(matches!(
            tree.get_nodes(&Selector::pattern("(unclosed")),
            Err(TreeError::InvalidPattern(_))
        ));
    }

    #[test]
    fn predicate_selector_sees_every_vertex() {
        let tree = parrot_tree();
        let internals = tree
            .get_nodes(&Selector::predicate(|v| !v.is_leaf()))
            .unwrap();
        assert_eq!(internals.len(), 2);
    }

    #[test]
    fn get_tips_filters_internal_matches() {
        let tree = parrot_tree();
        // "nestor" names an internal vertex; tip query must not return it.
        assert!(matches!(
            tree.get_tips(&Selector::name("nestor")),
            Err(TreeError::NotFound(_))
        ));
    }
}
