//! Per-indicator thresholds of valid observations.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::DuplicateCriteriaPolicy;
use crate::error::{AvailabilityError, Result};

/// Number of valid years an indicator needs to be available.
///
/// Indicators without criteria get [`RequiredYears::Unbounded`], which no
/// count satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RequiredYears {
    /// A finite threshold
    Years(u64),
    /// No criteria entry; never satisfiable
    Unbounded,
}

impl RequiredYears {
    /// Whether `count` valid years meet this threshold
    #[must_use]
    pub const fn is_satisfied_by(self, count: u64) -> bool {
        match self {
            Self::Years(required) => count >= required,
            Self::Unbounded => false,
        }
    }

    /// Finite threshold, `None` when unbounded
    #[must_use]
    pub const fn as_years(self) -> Option<u64> {
        match self {
            Self::Years(required) => Some(required),
            Self::Unbounded => None,
        }
    }
}

impl fmt::Display for RequiredYears {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("inf"),
        }
    }
}

/// One row of the criteria table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaEntry {
    /// Indicator name
    pub indicator: String,
    /// Valid years needed
    pub required_years: u64,
}

impl CriteriaEntry {
    /// Create a criteria entry
    pub fn new(indicator: impl Into<String>, required_years: u64) -> Self {
        Self {
            indicator: indicator.into(),
            required_years,
        }
    }
}

/// Lookup from indicator to its required years
#[derive(Debug, Clone, Default)]
pub struct CriteriaIndex {
    thresholds: FxHashMap<String, u64>,
}

impl CriteriaIndex {
    /// Build the index from criteria rows
    ///
    /// # Errors
    /// Returns [`AvailabilityError::AmbiguousCriteria`] for a repeated
    /// indicator under [`DuplicateCriteriaPolicy::Reject`].
    pub fn build(entries: &[CriteriaEntry], policy: DuplicateCriteriaPolicy) -> Result<Self> {
        let mut thresholds =
            FxHashMap::with_capacity_and_hasher(entries.len(), Default::default());

        for entry in entries {
            let previous = thresholds.insert(entry.indicator.clone(), entry.required_years);
            if let Some(previous) = previous {
                match policy {
                    DuplicateCriteriaPolicy::Reject => {
                        return Err(AvailabilityError::AmbiguousCriteria {
                            indicator: entry.indicator.clone(),
                        });
                    }
                    DuplicateCriteriaPolicy::LastWins => {
                        log::warn!(
                            "Duplicate criteria for '{}': replacing {} with {}",
                            entry.indicator,
                            previous,
                            entry.required_years
                        );
                    }
                }
            }
        }

        Ok(Self { thresholds })
    }

    /// Required years for `indicator`; unbounded when it has no entry
    #[must_use]
    pub fn lookup(&self, indicator: &str) -> RequiredYears {
        self.thresholds
            .get(indicator)
            .map_or(RequiredYears::Unbounded, |&years| RequiredYears::Years(years))
    }

    /// Whether `indicator` has an entry
    #[must_use]
    pub fn contains(&self, indicator: &str) -> bool {
        self.thresholds.contains_key(indicator)
    }

    /// Number of indicators with criteria
    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Whether no criteria were supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}
