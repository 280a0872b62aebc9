//! Detection of the dimensions an indicator is actually broken down by.

use crate::models::{DimensionSet, Record};

/// Which dimensions carry genuine values for one indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDimensions {
    mask: Vec<bool>,
}

impl ActiveDimensions {
    /// Mark every dimension inactive
    #[must_use]
    pub fn none(len: usize) -> Self {
        Self {
            mask: vec![false; len],
        }
    }

    /// Whether the dimension at `idx` is active
    #[must_use]
    pub fn is_active(&self, idx: usize) -> bool {
        self.mask.get(idx).copied().unwrap_or(false)
    }

    /// Indices of the active dimensions, in configured order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(idx, _)| idx)
    }

    /// Names of the active dimensions
    #[must_use]
    pub fn names<'a>(&self, dimensions: &'a DimensionSet) -> Vec<&'a str> {
        dimensions
            .iter()
            .filter(|(idx, _)| self.is_active(*idx))
            .map(|(_, name)| name)
            .collect()
    }

    /// Number of active dimensions
    #[must_use]
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|active| **active).count()
    }

    /// Total number of dimensions, active or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    /// Whether the mask covers no dimensions at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }
}

/// Whether a single cell carries a genuine category value
fn is_genuine(value: Option<&str>, not_applicable_marker: &str) -> bool {
    value.is_some_and(|v| v != not_applicable_marker)
}

/// Decide which dimensions are active for one indicator's records.
///
/// A dimension is active when at least one record has a value for it that
/// is neither null nor the not-applicable marker. The decision is taken
/// once over the whole record subset, so every partition of the indicator
/// shares it.
#[must_use]
pub fn detect_active_dimensions(
    records: &[&Record],
    dimensions: &DimensionSet,
    not_applicable_marker: &str,
) -> ActiveDimensions {
    let mask = (0..dimensions.len())
        .map(|idx| {
            records
                .iter()
                .any(|record| is_genuine(record.dimension(idx), not_applicable_marker))
        })
        .collect();

    ActiveDimensions { mask }
}
