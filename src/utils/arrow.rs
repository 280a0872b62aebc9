//! Utilities for working with Arrow arrays.
//!
//! These helpers extract columns from record batches by name and bring them
//! to the types the adapters read, with errors naming the table and column.

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::kernels::cast::{can_cast_types, cast};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{AvailabilityError, Result};

/// Get a column from a record batch by name, `None` if absent
#[must_use]
pub fn get_column(batch: &RecordBatch, column_name: &str) -> Option<ArrayRef> {
    batch
        .schema()
        .index_of(column_name)
        .ok()
        .map(|idx| batch.column(idx).clone())
}

/// Get a column that must be present
///
/// # Errors
/// Returns [`AvailabilityError::MissingColumn`] if the column is absent
pub fn require_column(
    batch: &RecordBatch,
    table: &'static str,
    column_name: &str,
) -> Result<ArrayRef> {
    get_column(batch, column_name).ok_or_else(|| AvailabilityError::MissingColumn {
        table,
        column: column_name.to_string(),
    })
}

/// Cast a column to `target`, reporting an unsupported cast as a type error
pub fn cast_column(
    column: &ArrayRef,
    table: &'static str,
    column_name: &str,
    target: &DataType,
) -> Result<ArrayRef> {
    if column.data_type() == target {
        return Ok(column.clone());
    }

    let type_error = || AvailabilityError::InvalidColumnType {
        table,
        column: column_name.to_string(),
        expected: target.to_string(),
        actual: column.data_type().to_string(),
    };

    if !can_cast_types(column.data_type(), target) {
        return Err(type_error());
    }
    cast(column, target).map_err(|_| type_error())
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    table: &'static str,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| AvailabilityError::InvalidColumnType {
            table,
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
            actual: array.data_type().to_string(),
        })
}

/// Per-row nullness, honouring logically null arrays such as `NullArray`
#[must_use]
pub fn null_mask(array: &dyn Array) -> Vec<bool> {
    match array.logical_nulls() {
        Some(nulls) => (0..array.len()).map(|i| nulls.is_null(i)).collect(),
        None => vec![false; array.len()],
    }
}

/// Per-row missingness: null cells, plus NaN cells of floating-point columns
pub fn missing_mask(column: &ArrayRef) -> Result<Vec<bool>> {
    let mut missing = null_mask(column.as_ref());
    if !column.data_type().is_floating() {
        return Ok(missing);
    }

    let as_float = cast(column, &DataType::Float64)?;
    if let Some(floats) = as_float.as_any().downcast_ref::<Float64Array>() {
        for (idx, flag) in missing.iter_mut().enumerate() {
            *flag = *flag || floats.value(idx).is_nan();
        }
    }
    Ok(missing)
}

/// A column rendered as text, one entry per row, `None` where missing.
///
/// NaN cells of a floating-point column are missing rather than `"NaN"`.
pub fn text_values(
    column: &ArrayRef,
    table: &'static str,
    column_name: &str,
) -> Result<Vec<Option<String>>> {
    let nulls = missing_mask(column)?;
    let as_text = cast_column(column, table, column_name, &DataType::Utf8)?;
    let strings = downcast_array::<StringArray>(&as_text, table, column_name, "Utf8")?;

    Ok((0..strings.len())
        .map(|i| (!nulls[i]).then(|| strings.value(i).to_string()))
        .collect())
}

/// A numeric column as `f64`, one entry per row, `None` where null or NaN
pub fn float_values(
    column: &ArrayRef,
    table: &'static str,
    column_name: &str,
) -> Result<Vec<Option<f64>>> {
    let nulls = missing_mask(column)?;
    let as_float = cast_column(column, table, column_name, &DataType::Float64)?;
    let floats = downcast_array::<Float64Array>(&as_float, table, column_name, "Float64")?;

    Ok((0..floats.len())
        .map(|i| Some(floats.value(i)).filter(|v| !nulls[i] && !v.is_nan()))
        .collect())
}
