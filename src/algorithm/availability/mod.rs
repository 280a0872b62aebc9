//! Availability computation for disaggregated indicators
//!
//! Records flow through the stages in this order:
//! grouping by indicator, [`validity`] detection of active dimensions,
//! [`partition`]ing on those dimensions, [`classifier`] counting and
//! thresholding, and [`assembler`] output rows.

pub mod assembler;
pub mod classifier;
pub mod engine;
pub mod partition;
pub mod statistics;
pub mod validity;

pub use assembler::assemble_row;
pub use classifier::{classify, valid_years_count};
pub use engine::{AvailabilityEngine, compute};
pub use partition::{Partition, PartitionKey, partition_records};
pub use statistics::{AvailabilityStatistics, AvailabilitySummary, IndicatorSummary};
pub use validity::{ActiveDimensions, detect_active_dimensions};
