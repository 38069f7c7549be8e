//! Error types for tree queries and structural edits.
//!
//! This module provides [TreeError] for representing and reporting errors
//! that occur when querying vertices or applying structural edits to a tree.
//! The taxonomy separates "your query was malformed" failures
//! ([TreeError::NotFound], [TreeError::Ambiguous], [TreeError::InvalidPattern])
//! from "your requested edit is topologically impossible" failures
//! ([TreeError::Structural]), so that interactive users can correct their
//! call without inspecting internals.

use std::error::Error;
use std::fmt;

// =#========================================================================#=
// TREE ERROR
// =#========================================================================#=
/// Errors raised by tree queries and structural edits.
///
/// Structural edits never partially apply: when an edit returns an error,
/// the source tree is unchanged (edits operate on copies anyway) and no
/// half-edited tree is ever observable.
#[derive(PartialEq, Debug, Clone)]
pub enum TreeError {
    /// The requested edit would violate a tree invariant
    /// (e.g. rooting on a non-separable tip set, unrooting a basal polytomy,
    /// pruning to zero tips).
    Structural(String),
    /// A name/pattern query matched zero vertices when at least one was required.
    NotFound(String),
    /// A query required a single match but resolved to several.
    Ambiguous { query: String, num_matches: usize },
    /// A requested feature is not set on any vertex of the tree.
    /// (A feature set on only *some* vertices is not an error; missing entries
    /// are filled with a caller-provided default, see `Tree::get_node_data`.)
    UnknownFeature(String),
    /// A pattern selector failed to compile as a regular expression.
    InvalidPattern(String),
}

impl TreeError {
    /// Convenience constructor for [TreeError::Structural].
    pub fn structural<S: Into<String>>(msg: S) -> Self {
        TreeError::Structural(msg.into())
    }

    /// Convenience constructor for [TreeError::NotFound].
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        TreeError::NotFound(query.into())
    }

    /// Convenience constructor for [TreeError::Ambiguous].
    pub fn ambiguous<S: Into<String>>(query: S, num_matches: usize) -> Self {
        TreeError::Ambiguous {
            query: query.into(),
            num_matches,
        }
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Structural(msg) => {
                write!(f, "structural edit is topologically impossible: {}", msg)
            }
            TreeError::NotFound(query) => {
                write!(f, "no vertex matched query '{}'", query)
            }
            TreeError::Ambiguous { query, num_matches } => {
                write!(
                    f,
                    "query '{}' matched {} vertices where exactly one was required",
                    query, num_matches
                )
            }
            TreeError::UnknownFeature(name) => {
                write!(f, "feature '{}' is not set on any vertex", name)
            }
            TreeError::InvalidPattern(msg) => {
                write!(f, "invalid pattern selector: {}", msg)
            }
        }
    }
}

impl Error for TreeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_distinguishes_query_from_structural_failures() {
        let structural = TreeError::structural("root already trifurcating");
        let query = TreeError::not_found("~kiwi.*");

        assert!(structural.to_string().contains("topologically impossible"));
        assert!(query.to_string().contains("no vertex matched"));
    }
}
