//! Parquet table loading and result writing

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::adapters::{CriteriaAdapter, ObservationAdapter, TableAdapter, results_to_batch};
use crate::columns::{CRITERIA_TABLE, OBSERVATIONS_TABLE};
use crate::config::EngineConfig;
use crate::criteria::CriteriaEntry;
use crate::error::{AvailabilityError, Result};
use crate::models::{AvailabilityTable, Record};
use crate::utils::logging::{log_file_operation_complete, log_file_operation_start};

/// Both input tables, converted and ready for the engine
#[derive(Debug, Clone)]
pub struct InputTables {
    /// Observation rows
    pub records: Vec<Record>,
    /// Criteria rows
    pub criteria: Vec<CriteriaEntry>,
}

/// Open a file that must exist, reporting absence as a missing input
fn open_input(path: &Path, table: &'static str) -> Result<File> {
    if !path.is_file() {
        return Err(AvailabilityError::MissingInput {
            table,
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|_| AvailabilityError::MissingInput {
        table,
        path: path.to_path_buf(),
    })
}

/// Read a parquet file into Arrow record batches
///
/// # Errors
/// Returns [`AvailabilityError::MissingInput`] if the file does not exist,
/// or a Parquet/Arrow error if it cannot be decoded
pub fn read_parquet(path: &Path, table: &'static str) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_file_operation_start(&format!("Reading {table} table from"), path);

    let file = open_input(path, table)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    log_file_operation_complete(
        "read",
        path,
        batches.iter().map(RecordBatch::num_rows).sum(),
        Some(start.elapsed()),
    );
    Ok(batches)
}

/// Write a record batch to a parquet file, replacing any existing file
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let start = Instant::now();
    log_file_operation_start("Writing result table to", path);

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(BufWriter::new(file), batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;

    log_file_operation_complete("wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}

/// Load the observation and criteria tables.
///
/// Both paths are checked before either file is read, so a missing table
/// is reported before any work is done.
pub fn load_tables(
    observations_path: &Path,
    criteria_path: &Path,
    config: &EngineConfig,
) -> Result<InputTables> {
    for (path, table) in [
        (observations_path, OBSERVATIONS_TABLE),
        (criteria_path, CRITERIA_TABLE),
    ] {
        if !path.is_file() {
            return Err(AvailabilityError::MissingInput {
                table,
                path: path.to_path_buf(),
            });
        }
    }

    let observation_batches = read_parquet(observations_path, OBSERVATIONS_TABLE)?;
    let criteria_batches = read_parquet(criteria_path, CRITERIA_TABLE)?;

    let records = ObservationAdapter::new(config)?.convert_batches(&observation_batches)?;
    let criteria = CriteriaAdapter::new(config).convert_batches(&criteria_batches)?;

    Ok(InputTables { records, criteria })
}

/// Export a result table to parquet
pub fn write_results(path: &Path, table: &AvailabilityTable) -> Result<()> {
    let batch = results_to_batch(table)?;
    write_parquet(path, &batch)
}
