//! Table-to-model adapters
//!
//! This module converts the Arrow tables supplied by a loader into domain
//! records, and result tables back into Arrow for consumers.

use std::fmt::Debug;

use arrow::record_batch::RecordBatch;

use crate::error::Result;

pub mod criteria;
pub mod observations;
pub mod results;

pub use criteria::CriteriaAdapter;
pub use observations::ObservationAdapter;
pub use results::{result_schema, results_to_batch};

/// Converts record batches into domain values under a fixed configuration
pub trait TableAdapter<T>: Debug + Send + Sync {
    /// Convert one record batch
    ///
    /// Row numbers in errors are relative to `batch`.
    fn convert_batch(&self, batch: &RecordBatch) -> Result<Vec<T>>;

    /// Convert several batches of the same table, preserving row order
    fn convert_batches(&self, batches: &[RecordBatch]) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
        for batch in batches {
            out.extend(self.convert_batch(batch)?);
        }
        Ok(out)
    }
}
