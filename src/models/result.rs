//! Availability results.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::columns;
use crate::criteria::RequiredYears;
use crate::models::DimensionSet;

/// Binary availability status of a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Availability {
    /// Enough valid years
    #[serde(rename = "Available")]
    Available,
    /// Too few valid years, or no criteria for the indicator
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl Availability {
    /// Label used in exported tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => columns::AVAILABLE,
            Self::NotAvailable => columns::NOT_AVAILABLE,
        }
    }

    /// Parse an exported label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            columns::AVAILABLE => Some(Self::Available),
            columns::NOT_AVAILABLE => Some(Self::NotAvailable),
            _ => None,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The value one dimension takes in a partition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum DimensionSlot {
    /// Active dimension with a concrete value (may be the not-applicable marker)
    Value(String),
    /// Active dimension whose value is null in this partition
    Missing,
    /// Dimension not used for this indicator
    NotDisaggregated,
}

impl DimensionSlot {
    /// Text shown for this slot; `None` for a null value
    #[must_use]
    pub fn display<'a>(&'a self, not_disaggregated_label: &'a str) -> Option<&'a str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing => None,
            Self::NotDisaggregated => Some(not_disaggregated_label),
        }
    }

    /// Whether the dimension was grouped on for this indicator
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::NotDisaggregated)
    }
}

/// One output row: the availability of a single partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    /// Indicator name
    pub indicator: String,
    /// Threshold from the criteria index
    pub required_years: RequiredYears,
    /// Records in the partition with a non-null value
    pub valid_years_count: u64,
    /// Classification of `valid_years_count` against `required_years`
    pub availability: Availability,
    /// One slot per configured dimension, in configured order
    pub dimensions: Vec<DimensionSlot>,
}

impl ResultRow {
    /// Slot of the dimension at `idx`
    #[must_use]
    pub fn slot(&self, idx: usize) -> Option<&DimensionSlot> {
        self.dimensions.get(idx)
    }

    /// Indices of the dimensions this row's indicator is broken down by
    pub fn active_dimensions(&self) -> impl Iterator<Item = usize> + '_ {
        self.dimensions
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
            .map(|(idx, _)| idx)
    }
}

/// The flat result table handed to consumers
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityTable {
    dimensions: DimensionSet,
    not_disaggregated_label: String,
    rows: Vec<ResultRow>,
}

impl AvailabilityTable {
    /// Wrap result rows with the dimension set they were computed against
    #[must_use]
    pub fn new(
        dimensions: DimensionSet,
        not_disaggregated_label: impl Into<String>,
        rows: Vec<ResultRow>,
    ) -> Self {
        Self {
            dimensions,
            not_disaggregated_label: not_disaggregated_label.into(),
            rows,
        }
    }

    /// Dimension set shared by every row
    #[must_use]
    pub const fn dimensions(&self) -> &DimensionSet {
        &self.dimensions
    }

    /// Label written for not-disaggregated slots
    #[must_use]
    pub fn not_disaggregated_label(&self) -> &str {
        &self.not_disaggregated_label
    }

    /// Result rows in output order
    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the table, returning its rows
    #[must_use]
    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    /// Same dimensions and label, different rows
    #[must_use]
    pub fn with_rows(&self, rows: Vec<ResultRow>) -> Self {
        Self {
            dimensions: self.dimensions.clone(),
            not_disaggregated_label: self.not_disaggregated_label.clone(),
            rows,
        }
    }

    /// Rows for one indicator
    pub fn rows_for<'a>(&'a self, indicator: &'a str) -> impl Iterator<Item = &'a ResultRow> {
        self.rows.iter().filter(move |r| r.indicator == indicator)
    }

    /// Rows as JSON objects keyed by exported column name
    #[must_use]
    pub fn to_json_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                obj.insert(columns::INDICATOR.to_string(), Value::from(row.indicator.clone()));
                obj.insert(
                    columns::REQUIRED_YEARS.to_string(),
                    row.required_years.as_years().map_or(Value::Null, Value::from),
                );
                obj.insert(
                    columns::AVAILABLE_YEARS.to_string(),
                    Value::from(row.valid_years_count),
                );
                obj.insert(
                    columns::AVAILABILITY.to_string(),
                    Value::from(row.availability.label()),
                );
                for (idx, name) in self.dimensions.iter() {
                    let text = row
                        .slot(idx)
                        .and_then(|slot| slot.display(&self.not_disaggregated_label));
                    obj.insert(name.to_string(), text.map_or(Value::Null, Value::from));
                }
                Value::Object(obj)
            })
            .collect()
    }
}
