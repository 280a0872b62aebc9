//! Shared helpers for Arrow columns and logging

pub mod arrow;
pub mod logging;
