//! Observation records.

use std::fmt;

use serde::Serialize;

use crate::error::{AvailabilityError, Result};
use crate::models::DimensionSet;

/// A non-null observation value.
///
/// Text values are kept rather than rejected: a record counts towards
/// availability whenever its value is present, whatever its content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObservationValue {
    /// Numeric observation
    Number(f64),
    /// Non-numeric observation as supplied by the source table
    Text(String),
}

impl fmt::Display for ObservationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ObservationValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ObservationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One observation row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Indicator this observation belongs to
    pub indicator: String,
    /// Observed value, `None` when the source cell is empty
    pub value: Option<ObservationValue>,
    /// One slot per configured dimension; `None` is a null cell
    pub dimensions: Vec<Option<String>>,
}

impl Record {
    /// Create a record from positional dimension values
    pub fn new(
        indicator: impl Into<String>,
        value: Option<ObservationValue>,
        dimensions: Vec<Option<String>>,
    ) -> Self {
        Self {
            indicator: indicator.into(),
            value,
            dimensions,
        }
    }

    /// Create a record from named dimension values; unnamed dimensions are null
    ///
    /// # Errors
    /// Returns [`AvailabilityError::InvalidConfig`] if a name is not part of
    /// the dimension set.
    pub fn with_named_dimensions<'a, I>(
        indicator: impl Into<String>,
        value: Option<ObservationValue>,
        dimensions: &DimensionSet,
        named: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut slots = vec![None; dimensions.len()];
        for (name, cell) in named {
            let idx = dimensions.index_of(name).ok_or_else(|| {
                AvailabilityError::invalid_config(format!("unknown dimension '{name}'"))
            })?;
            slots[idx] = cell.map(str::to_string);
        }
        Ok(Self::new(indicator, value, slots))
    }

    /// Whether the observation counts as a valid year
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Value of the dimension at `idx`, `None` when null
    #[must_use]
    pub fn dimension(&self, idx: usize) -> Option<&str> {
        self.dimensions.get(idx).and_then(|v| v.as_deref())
    }

    /// Ensure the record has exactly one slot per configured dimension
    pub(crate) fn check_arity(&self, dimensions: &DimensionSet) -> Result<()> {
        if self.dimensions.len() == dimensions.len() {
            Ok(())
        } else {
            Err(AvailabilityError::DimensionArity {
                indicator: self.indicator.clone(),
                expected: dimensions.len(),
                actual: self.dimensions.len(),
            })
        }
    }
}
