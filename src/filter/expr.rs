//! Expression-based filtering for exported result tables
//!
//! This module evaluates filter expressions against Arrow record batches,
//! so the same selections that [`super::query`] applies to result rows can
//! be applied to a result table after it has been exported.

use std::collections::HashSet;

use arrow::array::{Array, BooleanArray, StringArray};
use arrow::compute::{and, filter_record_batch};
use arrow::record_batch::RecordBatch;

use crate::columns;
use crate::error::{AvailabilityError, Result};
use crate::filter::result::FilterSpec;

/// Represents a filter expression over string columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Column value is one of the given strings; nulls never match
    In(String, Vec<String>),

    /// Logical AND of expressions
    And(Vec<Expr>),

    /// Always evaluates to true
    AlwaysTrue,
}

impl Expr {
    /// Returns a set of all column names required by this expression
    #[must_use]
    pub fn required_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        self.collect_required_columns(&mut columns);
        columns
    }

    fn collect_required_columns(&self, columns: &mut HashSet<String>) {
        match self {
            Self::In(col, _) => {
                columns.insert(col.clone());
            }
            Self::And(exprs) => {
                for expr in exprs {
                    expr.collect_required_columns(columns);
                }
            }
            Self::AlwaysTrue => {}
        }
    }
}

impl FilterSpec {
    /// Expression selecting the same rows of an exported result table
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        let mut exprs = Vec::new();

        if !self.indicators.is_empty() {
            let mut values: Vec<String> = self.indicators.iter().cloned().collect();
            values.sort();
            exprs.push(Expr::In(columns::INDICATOR.to_string(), values));
        }
        if !self.availability.is_empty() {
            let mut values: Vec<String> = self
                .availability
                .iter()
                .map(|a| a.label().to_string())
                .collect();
            values.sort();
            exprs.push(Expr::In(columns::AVAILABILITY.to_string(), values));
        }
        for (name, allowed) in &self.dimensions {
            if allowed.is_empty() {
                continue;
            }
            let mut values: Vec<String> = allowed.iter().cloned().collect();
            values.sort();
            exprs.push(Expr::In(name.clone(), values));
        }

        match exprs.len() {
            0 => Expr::AlwaysTrue,
            1 => exprs.remove(0),
            _ => Expr::And(exprs),
        }
    }
}

/// Evaluates a filter expression against a record batch
///
/// # Returns
/// A boolean array indicating which rows match the expression
///
/// # Errors
/// Returns an error if a referenced column is missing or not a string column
pub fn evaluate_expr(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    match expr {
        Expr::AlwaysTrue => Ok(BooleanArray::from(vec![true; batch.num_rows()])),
        Expr::And(exprs) => evaluate_and_expression(batch, exprs),
        Expr::In(col_name, values) => evaluate_in_expression(batch, col_name, values),
    }
}

fn evaluate_and_expression(batch: &RecordBatch, exprs: &[Expr]) -> Result<BooleanArray> {
    let mut result = BooleanArray::from(vec![true; batch.num_rows()]);
    for expr in exprs {
        let mask = evaluate_expr(batch, expr)?;
        result = and(&result, &mask)?;
    }
    Ok(result)
}

fn evaluate_in_expression(
    batch: &RecordBatch,
    col_name: &str,
    values: &[String],
) -> Result<BooleanArray> {
    let col_idx =
        batch
            .schema()
            .index_of(col_name)
            .map_err(|_| AvailabilityError::MissingColumn {
                table: columns::RESULT_TABLE,
                column: col_name.to_string(),
            })?;
    let column = batch.column(col_idx);

    let strings = column
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| AvailabilityError::InvalidColumnType {
            table: columns::RESULT_TABLE,
            column: col_name.to_string(),
            expected: "Utf8".to_string(),
            actual: column.data_type().to_string(),
        })?;

    let wanted: HashSet<&str> = values.iter().map(String::as_str).collect();
    let mask: BooleanArray = (0..strings.len())
        .map(|i| Some(strings.is_valid(i) && wanted.contains(strings.value(i))))
        .collect();

    Ok(mask)
}

/// Filters an exported result table according to `spec`
///
/// # Errors
/// Returns an error if a selected column is missing or mistyped
pub fn filter_result_batch(batch: &RecordBatch, spec: &FilterSpec) -> Result<RecordBatch> {
    let expr = spec.to_expr();
    let mask = evaluate_expr(batch, &expr)?;
    let filtered = filter_record_batch(batch, &mask)?;

    log::debug!(
        "Filtered result table from {} to {} rows on columns {:?}",
        batch.num_rows(),
        filtered.num_rows(),
        expr.required_columns()
    );

    Ok(filtered)
}
