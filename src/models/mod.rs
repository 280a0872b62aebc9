//! Domain types for observations and availability results.

pub mod dimension;
pub mod record;
pub mod result;

pub use dimension::DimensionSet;
pub use record::{ObservationValue, Record};
pub use result::{Availability, AvailabilityTable, DimensionSlot, ResultRow};
