//! Per-vertex feature storage for phylogenetic trees.
//!
//! Provides the [FeatureStore] struct, which stores arbitrary named feature
//! values for vertices based on their indices, and [FeatureValue], the value
//! type captured for each entry (`f64`, `i64`, `String`, `bool`).
//!
//! Every feature is a column parallel to the tree's vertex arena: a
//! `Vec<Option<FeatureValue>>` of length `num_vertices`. A feature may be set
//! on only a subset of vertices; readers fill the gaps with a default value
//! rather than failing (see `Tree::get_node_data`).

use std::collections::HashMap;

use crate::model::tree::VertexIndex;

// =#========================================================================#=
// FEATURE STORE
// =#========================================================================#=
/// Vertex feature values for multiple keys.
///
/// Columns are parallel to the vertex arena, so lookups by [VertexIndex] are
/// O(1) and whole columns compose directly with coordinate arrays produced
/// by the layout engine (both are in `idx` order).
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: HashMap<String, Vec<Option<FeatureValue>>>,
    num_vertices: usize,
}

impl FeatureStore {
    /// Creates a new empty [FeatureStore] for a tree with `num_vertices` vertices.
    pub fn new(num_vertices: usize) -> Self {
        FeatureStore {
            num_vertices,
            features: HashMap::new(),
        }
    }

    /// Returns `true` if no feature key is stored.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Returns the stored feature keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(|k| k.as_str())
    }

    /// Returns `true` if the given key has a value on at least one vertex.
    pub fn contains_key(&self, key: &str) -> bool {
        self.features.contains_key(key)
    }

    /// Returns all values for a given feature key, one entry per vertex.
    ///
    /// # Returns
    /// [None] if the key does not exist, otherwise a [Vec] parallel to the
    /// tree's vertex arena where each entry is [Some] if that vertex has a
    /// value for this key.
    pub fn get_all_for_key(&self, key: &str) -> Option<&Vec<Option<FeatureValue>>> {
        self.features.get(key)
    }

    /// Returns a single feature value for a vertex.
    ///
    /// # Panics
    /// Panics if `vertex_index` is out of bounds.
    pub fn get(&self, key: &str, vertex_index: VertexIndex) -> Option<FeatureValue> {
        self.features.get(key).and_then(|c| c[vertex_index].clone())
    }

    /// Sets a feature value for a vertex.
    ///
    /// # Panics
    /// Panics if `vertex_index` is out of bounds.
    pub fn set(&mut self, key: String, vertex_index: VertexIndex, value: FeatureValue) {
        let column = self
            .features
            .entry(key)
            .or_insert_with(|| vec![None; self.num_vertices]);
        column[vertex_index] = Some(value);
    }

    /// Remaps all columns through an index mapping produced by a structural
    /// edit.
    ///
    /// `old_to_new[i]` gives the index of old vertex `i` in the edited tree,
    /// or [None] if the vertex was removed. New vertices introduced by the
    /// edit (e.g. a fresh root) carry no feature values.
    ///
    /// # Arguments
    /// * `old_to_new` - Mapping from old to new vertex indices
    /// * `new_num_vertices` - Vertex count of the edited tree
    pub fn remap(&self, old_to_new: &[Option<VertexIndex>], new_num_vertices: usize) -> Self {
        let mut remapped = FeatureStore::new(new_num_vertices);
        for (key, column) in &self.features {
            let mut new_column = vec![None; new_num_vertices];
            for (old_index, value) in column.iter().enumerate() {
                if let (Some(new_index), Some(value)) = (old_to_new[old_index], value) {
                    new_column[new_index] = Some(value.clone());
                }
            }
            // A column can lose all its values, e.g. when pruning away every
            // vertex that carried it; keep the key so readers still see it.
            remapped.features.insert(key.clone(), new_column);
        }
        remapped
    }
}

// =#========================================================================#=
// FEATURE VALUE
// =#========================================================================#=
/// Enum to encapsulate a stored feature value.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// For floating point values
    Float(f64),
    /// For integer values
    Int(i64),
    /// For strings (categorical values)
    Str(String),
    /// For boolean flags
    Bool(bool),
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

impl From<f32> for FeatureValue {
    fn from(v: f32) -> Self {
        FeatureValue::Float(v as f64)
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<i32> for FeatureValue {
    fn from(v: i32) -> Self {
        FeatureValue::Int(v as i64)
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Str(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Str(v.to_string())
    }
}

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        FeatureValue::Bool(v)
    }
}
