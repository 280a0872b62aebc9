//! The fixed, ordered set of disaggregation dimensions.

use std::sync::Arc;

/// Ordered disaggregation dimension names, identical for every indicator.
///
/// Records and result rows store one slot per dimension, addressed by the
/// position of the dimension in this set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionSet {
    names: Arc<[String]>,
}

impl DimensionSet {
    /// Build from names already checked by [`crate::config::EngineConfig::validate`]
    pub(crate) fn from_validated(names: Vec<String>) -> Self {
        Self {
            names: names.into(),
        }
    }

    /// Dimension names in order
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of dimensions
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty (never true for a validated configuration)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a dimension by name
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Iterate over `(index, name)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }
}
