//! Availability statistics and summaries
//!
//! This module aggregates result rows into the counts a dashboard plots:
//! overall partitions by availability, and per-indicator breakdowns.

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::models::{Availability, AvailabilityTable, ResultRow};

/// Partition counts for one indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSummary {
    /// Indicator name
    pub indicator: String,
    /// Partitions classified Available
    pub available: usize,
    /// Partitions classified Not Available
    pub not_available: usize,
}

impl IndicatorSummary {
    /// Total partitions for the indicator
    #[must_use]
    pub const fn total(&self) -> usize {
        self.available + self.not_available
    }
}

/// Partition counts over a result table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailabilitySummary {
    /// Partitions classified Available
    pub available: usize,
    /// Partitions classified Not Available
    pub not_available: usize,
    /// Per-indicator counts, in first-appearance order
    pub by_indicator: Vec<IndicatorSummary>,
}

impl AvailabilitySummary {
    /// Aggregate result rows
    #[must_use]
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
        let mut summary = Self::default();

        for row in rows {
            let pos = *positions.entry(row.indicator.as_str()).or_insert_with(|| {
                summary.by_indicator.push(IndicatorSummary {
                    indicator: row.indicator.clone(),
                    available: 0,
                    not_available: 0,
                });
                summary.by_indicator.len() - 1
            });

            let entry = &mut summary.by_indicator[pos];
            match row.availability {
                Availability::Available => {
                    summary.available += 1;
                    entry.available += 1;
                }
                Availability::NotAvailable => {
                    summary.not_available += 1;
                    entry.not_available += 1;
                }
            }
        }

        summary
    }

    /// Aggregate a result table
    #[must_use]
    pub fn from_table(table: &AvailabilityTable) -> Self {
        Self::from_rows(table.rows())
    }

    /// Total partitions
    #[must_use]
    pub const fn total(&self) -> usize {
        self.available + self.not_available
    }

    /// Share of partitions that are available, in percent
    #[must_use]
    pub fn available_percentage(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.available as f64 / self.total() as f64 * 100.0
        }
    }

    /// Plain-text report of the summary
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Data Availability Summary:\n");
        out.push_str(&format!("  Total Partitions: {}\n", self.total()));
        out.push_str(&format!(
            "  Available: {} ({:.1}%)\n",
            self.available,
            self.available_percentage()
        ));
        out.push_str(&format!("  Not Available: {}\n", self.not_available));

        if !self.by_indicator.is_empty() {
            out.push_str("\nAvailability by Indicator:\n");
            for entry in &self.by_indicator {
                out.push_str(&format!(
                    "  {}: {} available, {} not available\n",
                    entry.indicator, entry.available, entry.not_available
                ));
            }
        }

        out
    }
}

/// Option lists for filtering a result table
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityStatistics;

impl AvailabilityStatistics {
    /// Distinct indicators in first-appearance order
    #[must_use]
    pub fn distinct_indicators(table: &AvailabilityTable) -> Vec<String> {
        table
            .rows()
            .iter()
            .map(|row| row.indicator.as_str())
            .unique()
            .map(str::to_string)
            .collect()
    }

    /// Distinct displayed values of one dimension, nulls excluded.
    ///
    /// Returns `None` when `dimension` is not part of the table.
    #[must_use]
    pub fn distinct_dimension_values(
        table: &AvailabilityTable,
        dimension: &str,
    ) -> Option<Vec<String>> {
        let idx = table.dimensions().index_of(dimension)?;
        let label = table.not_disaggregated_label();

        Some(
            table
                .rows()
                .iter()
                .filter_map(|row| row.slot(idx).and_then(|slot| slot.display(label)))
                .unique()
                .map(str::to_string)
                .collect(),
        )
    }
}
