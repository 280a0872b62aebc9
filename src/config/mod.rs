//! Configuration for the availability engine.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::columns;
use crate::error::{AvailabilityError, Result};
use crate::models::DimensionSet;

/// How repeated indicators in the criteria table are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCriteriaPolicy {
    /// Fail with [`AvailabilityError::AmbiguousCriteria`]
    #[default]
    Reject,
    /// Keep the threshold from the last row for that indicator
    LastWins,
}

/// Configuration for the availability engine
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Disaggregation columns, in output order
    pub dimensions: Vec<String>,
    /// Indicator column in both input tables
    pub indicator_column: String,
    /// Observation value column
    pub value_column: String,
    /// Threshold column in the criteria table
    pub required_years_column: String,
    /// Text marking a dimension as not applicable for a record
    pub not_applicable_marker: String,
    /// Text written for dimensions an indicator is not broken down by.
    ///
    /// Exported tables and dimension filters compare slots as text, so a
    /// genuine category equal to this label is indistinguishable from the
    /// sentinel there. In-memory rows keep the two apart
    /// ([`crate::models::DimensionSlot`]). The observation adapter warns
    /// when it reads such a value.
    pub not_disaggregated_label: String,
    /// Handling of duplicate indicators in the criteria table
    pub duplicate_criteria: DuplicateCriteriaPolicy,
    /// Process indicators on the rayon pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dimensions: columns::DEFAULT_DIMENSIONS
                .iter()
                .map(|d| (*d).to_string())
                .collect(),
            indicator_column: columns::INDICATOR.to_string(),
            value_column: columns::VALUE.to_string(),
            required_years_column: columns::NUMBER_OF_YEARS.to_string(),
            not_applicable_marker: columns::NOT_APPLICABLE.to_string(),
            not_disaggregated_label: columns::NOT_DISAGGREGATED.to_string(),
            duplicate_criteria: DuplicateCriteriaPolicy::Reject,
            parallel: false,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file; absent keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Use a different set of disaggregation columns
    #[must_use]
    pub fn with_dimensions<I, S>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the duplicate criteria policy
    #[must_use]
    pub const fn with_duplicate_criteria(mut self, policy: DuplicateCriteriaPolicy) -> Self {
        self.duplicate_criteria = policy;
        self
    }

    /// Enable or disable per-indicator parallelism
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that the configuration describes a usable dimension set
    ///
    /// # Errors
    /// Returns [`AvailabilityError::InvalidConfig`] when the dimension list is
    /// empty, contains blank or repeated names, or reuses a name reserved for
    /// the indicator, value or result columns.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions.is_empty() {
            return Err(AvailabilityError::invalid_config(
                "at least one disaggregation dimension is required",
            ));
        }

        let mut reserved: HashSet<&str> = columns::RESULT_COLUMNS.into_iter().collect();
        reserved.insert(self.indicator_column.as_str());
        reserved.insert(self.value_column.as_str());

        let mut seen = HashSet::new();
        for name in &self.dimensions {
            if name.trim().is_empty() {
                return Err(AvailabilityError::invalid_config(
                    "dimension names must not be blank",
                ));
            }
            if reserved.contains(name.as_str()) {
                return Err(AvailabilityError::invalid_config(format!(
                    "dimension '{name}' collides with a reserved column"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(AvailabilityError::invalid_config(format!(
                    "dimension '{name}' is listed more than once"
                )));
            }
        }

        if self.not_disaggregated_label.is_empty() {
            return Err(AvailabilityError::invalid_config(
                "the not-disaggregated label must not be empty",
            ));
        }

        Ok(())
    }

    /// Validated, ordered dimension set for this configuration
    pub fn dimension_set(&self) -> Result<DimensionSet> {
        self.validate()?;
        Ok(DimensionSet::from_validated(self.dimensions.clone()))
    }
}
