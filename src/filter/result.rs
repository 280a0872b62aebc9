//! Stateless queries over availability results
//!
//! A [`FilterSpec`] mirrors the selections of a dashboard: indicators,
//! availability statuses and allowed values per dimension. An empty
//! selection places no restriction on its field.

use std::collections::{BTreeMap, HashSet};

use crate::columns;
use crate::error::{AvailabilityError, Result};
use crate::filter::generic::{Filter, FilterBuilder};
use crate::models::{Availability, AvailabilityTable, ResultRow};

/// Selections to apply to a result table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Indicators to keep
    pub indicators: HashSet<String>,
    /// Availability statuses to keep
    pub availability: HashSet<Availability>,
    /// Allowed displayed values per dimension name
    pub dimensions: BTreeMap<String, HashSet<String>>,
}

impl FilterSpec {
    /// A spec that keeps every row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the given indicators
    #[must_use]
    pub fn with_indicators<I, S>(mut self, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indicators = indicators.into_iter().map(Into::into).collect();
        self
    }

    /// Keep only the given availability statuses
    #[must_use]
    pub fn with_availability<I>(mut self, availability: I) -> Self
    where
        I: IntoIterator<Item = Availability>,
    {
        self.availability = availability.into_iter().collect();
        self
    }

    /// Keep only rows whose displayed `dimension` value is one of `values`
    #[must_use]
    pub fn with_dimension<I, S>(mut self, dimension: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions.insert(
            dimension.into(),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Whether the spec restricts nothing
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.indicators.is_empty()
            && self.availability.is_empty()
            && self.dimensions.values().all(HashSet::is_empty)
    }
}

/// Keeps rows of the selected indicators
#[derive(Debug, Clone)]
pub struct IndicatorFilter {
    indicators: HashSet<String>,
}

impl Filter<ResultRow> for IndicatorFilter {
    fn matches(&self, row: &ResultRow) -> bool {
        self.indicators.contains(&row.indicator)
    }

    fn required_resources(&self) -> HashSet<String> {
        HashSet::from([columns::INDICATOR.to_string()])
    }
}

/// Keeps rows with the selected availability
#[derive(Debug, Clone)]
pub struct AvailabilityFilter {
    statuses: HashSet<Availability>,
}

impl Filter<ResultRow> for AvailabilityFilter {
    fn matches(&self, row: &ResultRow) -> bool {
        self.statuses.contains(&row.availability)
    }

    fn required_resources(&self) -> HashSet<String> {
        HashSet::from([columns::AVAILABILITY.to_string()])
    }
}

/// Keeps rows whose displayed dimension value is selected.
///
/// Null slots never match.
#[derive(Debug, Clone)]
pub struct DimensionFilter {
    name: String,
    index: usize,
    allowed: HashSet<String>,
    not_disaggregated_label: String,
}

impl Filter<ResultRow> for DimensionFilter {
    fn matches(&self, row: &ResultRow) -> bool {
        row.slot(self.index)
            .and_then(|slot| slot.display(&self.not_disaggregated_label))
            .is_some_and(|text| self.allowed.contains(text))
    }

    fn required_resources(&self) -> HashSet<String> {
        HashSet::from([self.name.clone()])
    }
}

/// Filters a table's rows according to `spec`, preserving row order.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidConfig`] if `spec` names a dimension
/// the table does not have.
pub fn query(table: &AvailabilityTable, spec: &FilterSpec) -> Result<AvailabilityTable> {
    let indicator_filter = (!spec.indicators.is_empty()).then(|| IndicatorFilter {
        indicators: spec.indicators.clone(),
    });
    let availability_filter = (!spec.availability.is_empty()).then(|| AvailabilityFilter {
        statuses: spec.availability.clone(),
    });

    let mut builder = FilterBuilder::new()
        .add_optional(indicator_filter)
        .add_optional(availability_filter);

    for (name, allowed) in &spec.dimensions {
        if allowed.is_empty() {
            continue;
        }
        let index = table.dimensions().index_of(name).ok_or_else(|| {
            AvailabilityError::invalid_config(format!("unknown dimension '{name}' in filter"))
        })?;
        builder = builder.add_filter(DimensionFilter {
            name: name.clone(),
            index,
            allowed: allowed.clone(),
            not_disaggregated_label: table.not_disaggregated_label().to_string(),
        });
    }

    let filter = builder.build_and();
    let rows = table
        .rows()
        .iter()
        .filter(|row| filter.matches(row))
        .cloned()
        .collect();

    Ok(table.with_rows(rows))
}
