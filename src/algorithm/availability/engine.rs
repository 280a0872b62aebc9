//! The availability engine: criteria and records in, result table out.

use std::time::Instant;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::algorithm::availability::assembler::assemble_row;
use crate::algorithm::availability::partition::partition_records;
use crate::algorithm::availability::validity::detect_active_dimensions;
use crate::config::EngineConfig;
use crate::criteria::{CriteriaEntry, CriteriaIndex};
use crate::error::Result;
use crate::models::{AvailabilityTable, DimensionSet, Record, ResultRow};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// One indicator with its records, in input order
struct IndicatorGroup<'a> {
    indicator: &'a str,
    records: Vec<&'a Record>,
}

/// Computes availability tables under a fixed configuration
#[derive(Debug, Clone)]
pub struct AvailabilityEngine {
    config: EngineConfig,
    dimensions: DimensionSet,
}

impl AvailabilityEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        let dimensions = config.dimension_set()?;
        Ok(Self { config, dimensions })
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The dimension set records must conform to
    #[must_use]
    pub const fn dimensions(&self) -> &DimensionSet {
        &self.dimensions
    }

    /// Compute one result row per partition of every indicator.
    ///
    /// Indicators appear in the order they first occur in `records`, and
    /// partitions within an indicator in the order their key first occurs.
    /// The output is identical with and without `parallel`.
    ///
    /// # Errors
    /// Fails on duplicate criteria (under the `Reject` policy) or when a
    /// record does not have one slot per configured dimension. No records
    /// are dropped silently.
    pub fn compute(
        &self,
        records: &[Record],
        criteria: &[CriteriaEntry],
    ) -> Result<AvailabilityTable> {
        let start = Instant::now();
        log_operation_start("Computing availability", records.len());

        let index = CriteriaIndex::build(criteria, self.config.duplicate_criteria)?;
        for record in records {
            record.check_arity(&self.dimensions)?;
        }

        let groups = group_by_indicator(records);
        for group in &groups {
            if !index.contains(group.indicator) {
                log::warn!(
                    "No criteria for indicator '{}'; all of its partitions are Not Available",
                    group.indicator
                );
            }
        }

        let rows: Vec<ResultRow> = if self.config.parallel {
            groups
                .par_iter()
                .map(|group| self.process_indicator(group, &index))
                .collect::<Vec<_>>()
                .into_iter()
                .flatten()
                .collect()
        } else {
            groups
                .iter()
                .flat_map(|group| self.process_indicator(group, &index))
                .collect()
        };

        log_operation_complete(
            "computed availability for",
            groups.len(),
            rows.len(),
            Some(start.elapsed()),
        );

        Ok(AvailabilityTable::new(
            self.dimensions.clone(),
            self.config.not_disaggregated_label.clone(),
            rows,
        ))
    }

    fn process_indicator(&self, group: &IndicatorGroup<'_>, index: &CriteriaIndex) -> Vec<ResultRow> {
        let active = detect_active_dimensions(
            &group.records,
            &self.dimensions,
            &self.config.not_applicable_marker,
        );
        log::debug!(
            "Indicator '{}': {} records, active dimensions {:?}",
            group.indicator,
            group.records.len(),
            active.names(&self.dimensions)
        );

        let required = index.lookup(group.indicator);
        partition_records(group.indicator, &group.records, &active)
            .into_iter()
            .map(|partition| assemble_row(partition, required))
            .collect()
    }
}

/// Group records by indicator in first-appearance order
fn group_by_indicator(records: &[Record]) -> Vec<IndicatorGroup<'_>> {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<IndicatorGroup<'_>> = Vec::new();

    for record in records {
        let indicator = record.indicator.as_str();
        if let Some(&pos) = positions.get(indicator) {
            groups[pos].records.push(record);
        } else {
            positions.insert(indicator, groups.len());
            groups.push(IndicatorGroup {
                indicator,
                records: vec![record],
            });
        }
    }

    groups
}

/// Compute availability with a one-off engine
///
/// # Errors
/// Fails on an invalid configuration, duplicate criteria under the `Reject`
/// policy, or a record with the wrong number of dimension slots.
pub fn compute(
    records: &[Record],
    criteria: &[CriteriaEntry],
    config: &EngineConfig,
) -> Result<AvailabilityTable> {
    AvailabilityEngine::new(config.clone())?.compute(records, criteria)
}
