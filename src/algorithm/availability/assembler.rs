//! Turning partitions into uniform result rows.

use crate::algorithm::availability::classifier::{classify, valid_years_count};
use crate::algorithm::availability::partition::Partition;
use crate::criteria::RequiredYears;
use crate::models::ResultRow;

/// Build the result row for one partition.
///
/// The row carries a slot for every configured dimension: the partition's
/// value for active dimensions and `NotDisaggregated` for the rest.
#[must_use]
pub fn assemble_row(partition: Partition<'_>, required_years: RequiredYears) -> ResultRow {
    let valid_years = valid_years_count(&partition.records);

    ResultRow {
        indicator: partition.indicator.to_string(),
        required_years,
        valid_years_count: valid_years,
        availability: classify(valid_years, required_years),
        dimensions: partition.key.into_slots(),
    }
}
