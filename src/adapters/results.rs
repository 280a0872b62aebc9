//! Result table export
//!
//! Every exported table has the same leading columns followed by one text
//! column per configured dimension, whatever dimensions each indicator used.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringBuilder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::columns;
use crate::error::Result;
use crate::models::{AvailabilityTable, DimensionSet};

/// Arrow schema of an exported result table.
///
/// `Number of Years Required` is null for indicators without criteria.
#[must_use]
pub fn result_schema(dimensions: &DimensionSet) -> SchemaRef {
    let mut fields = vec![
        Field::new(columns::INDICATOR, DataType::Utf8, false),
        Field::new(columns::REQUIRED_YEARS, DataType::UInt64, true),
        Field::new(columns::AVAILABLE_YEARS, DataType::UInt64, false),
        Field::new(columns::AVAILABILITY, DataType::Utf8, false),
    ];
    fields.extend(
        dimensions
            .iter()
            .map(|(_, name)| Field::new(name, DataType::Utf8, true)),
    );
    Arc::new(Schema::new(fields))
}

/// Export a result table as a single record batch.
///
/// Not-disaggregated slots are written as the table's label, null slots of
/// active dimensions as null.
pub fn results_to_batch(table: &AvailabilityTable) -> Result<RecordBatch> {
    let rows = table.rows();
    let label = table.not_disaggregated_label();

    let mut indicators = StringBuilder::new();
    let mut required = UInt64Builder::with_capacity(rows.len());
    let mut available = UInt64Builder::with_capacity(rows.len());
    let mut availability = StringBuilder::new();
    let mut dimension_builders: Vec<StringBuilder> =
        (0..table.dimensions().len()).map(|_| StringBuilder::new()).collect();

    for row in rows {
        indicators.append_value(&row.indicator);
        required.append_option(row.required_years.as_years());
        available.append_value(row.valid_years_count);
        availability.append_value(row.availability.label());
        for (idx, builder) in dimension_builders.iter_mut().enumerate() {
            builder.append_option(row.slot(idx).and_then(|slot| slot.display(label)));
        }
    }

    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(indicators.finish()),
        Arc::new(required.finish()),
        Arc::new(available.finish()),
        Arc::new(availability.finish()),
    ];
    arrays.extend(
        dimension_builders
            .iter_mut()
            .map(|builder| Arc::new(builder.finish()) as ArrayRef),
    );

    Ok(RecordBatch::try_new(result_schema(table.dimensions()), arrays)?)
}
