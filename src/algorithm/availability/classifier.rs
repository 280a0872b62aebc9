//! Counting valid years and classifying partitions.

use crate::criteria::RequiredYears;
use crate::models::{Availability, Record};

/// Number of records with a non-null value.
///
/// Validity is null-ness only; a textual value still counts.
#[must_use]
pub fn valid_years_count(records: &[&Record]) -> u64 {
    records.iter().filter(|r| r.has_value()).count() as u64
}

/// Classify a valid-year count against its threshold
#[must_use]
pub const fn classify(valid_years: u64, required: RequiredYears) -> Availability {
    if required.is_satisfied_by(valid_years) {
        Availability::Available
    } else {
        Availability::NotAvailable
    }
}
