//! Algorithm implementations for availability analysis
//!
//! This module contains the availability computation: deciding which
//! disaggregations apply to each indicator, partitioning its observations,
//! and classifying every partition against its threshold.

pub mod availability;
