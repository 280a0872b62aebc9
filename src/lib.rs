//! Data availability analysis for disaggregated statistical indicators.
//!
//! For every indicator the engine works out which disaggregation dimensions
//! carry real categories, groups the indicator's observations on those
//! dimensions, counts valid (non-null) observations per group, and compares
//! the count with the indicator's required number of years.

pub mod adapters;
pub mod algorithm;
pub mod columns;
pub mod config;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod utils;

// Core types
pub use config::{DuplicateCriteriaPolicy, EngineConfig};
pub use criteria::{CriteriaEntry, CriteriaIndex, RequiredYears};
pub use error::{AvailabilityError, Result};
pub use models::{
    Availability, AvailabilityTable, DimensionSet, DimensionSlot, ObservationValue, Record,
    ResultRow,
};

// Computation
pub use algorithm::availability::{
    AvailabilityEngine, AvailabilityStatistics, AvailabilitySummary, IndicatorSummary, compute,
};

// Querying results
pub use filter::{FilterSpec, filter_result_batch, query};

// Table boundary
pub use adapters::{CriteriaAdapter, ObservationAdapter, TableAdapter, results_to_batch};
pub use loader::{InputTables, load_tables, read_parquet, write_parquet, write_results};

// Arrow types
pub use arrow::record_batch::RecordBatch;
