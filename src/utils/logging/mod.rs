//! Logging utilities
//!
//! This module provides one log format for loading tables and computing results.

pub mod log;

pub use self::log::{
    log_file_operation_complete, log_file_operation_start, log_operation_complete,
    log_operation_start, log_warning,
};
