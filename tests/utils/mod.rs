//! Shared builders for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use data_availability::{
    CriteriaEntry, DimensionSet, EngineConfig, ObservationValue, Record,
};

/// Default configuration (Age, group, Area, Sex, Nationality)
#[must_use]
pub fn config() -> EngineConfig {
    EngineConfig::default()
}

/// Dimension set of the default configuration
#[must_use]
pub fn dims() -> DimensionSet {
    config().dimension_set().expect("default config is valid")
}

/// A record with a numeric value and the given named dimensions
#[must_use]
pub fn record(indicator: &str, value: Option<f64>, named: &[(&str, &str)]) -> Record {
    Record::with_named_dimensions(
        indicator,
        value.map(ObservationValue::Number),
        &dims(),
        named.iter().map(|(name, v)| (*name, Some(*v))),
    )
    .expect("test dimensions exist")
}

/// Criteria rows from `(indicator, years)` pairs
#[must_use]
pub fn criteria(entries: &[(&str, u64)]) -> Vec<CriteriaEntry> {
    entries
        .iter()
        .map(|(indicator, years)| CriteriaEntry::new(*indicator, *years))
        .collect()
}

/// Build a batch from named columns
#[must_use]
pub fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, array)| array).collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).expect("valid test batch")
}

/// Nullable string column
#[must_use]
pub fn strings(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

/// Nullable float column
#[must_use]
pub fn floats(values: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

/// Nullable integer column
#[must_use]
pub fn ints(values: &[Option<i64>]) -> ArrayRef {
    Arc::new(Int64Array::from(values.to_vec()))
}

/// A small observation table with Sex and Area columns only
#[must_use]
pub fn observation_batch() -> RecordBatch {
    batch(vec![
        (
            "Indicator",
            strings(&[Some("Pop"), Some("Pop"), Some("Pop"), Some("Births")]),
        ),
        ("Value", floats(&[Some(1.0), Some(2.0), None, Some(4.0)])),
        (
            "Sex",
            strings(&[Some("Male"), Some("Female"), Some("Male"), None]),
        ),
        (
            "Area",
            strings(&[
                Some("Not applicable"),
                Some("Not applicable"),
                Some("Not applicable"),
                None,
            ]),
        ),
    ])
}

/// Criteria table for [`observation_batch`]
#[must_use]
pub fn criteria_batch() -> RecordBatch {
    batch(vec![
        ("Indicator", strings(&[Some("Pop"), Some("Births")])),
        ("number of years", ints(&[Some(1), Some(1)])),
    ])
}

/// Column type check helper
#[must_use]
pub fn column_type(batch: &RecordBatch, name: &str) -> DataType {
    batch
        .schema()
        .field_with_name(name)
        .expect("column exists")
        .data_type()
        .clone()
}
