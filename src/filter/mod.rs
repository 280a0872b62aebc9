//! Filtering capabilities for availability results
//!
//! Results can be filtered as rows with [`query`] or, once exported, as an
//! Arrow table with [`filter_result_batch`]. Both apply the same
//! [`FilterSpec`].

pub mod expr;
pub mod generic;
pub mod result;

pub use expr::{Expr, evaluate_expr, filter_result_batch};
pub use generic::{AndFilter, BoxedFilter, Filter, FilterBuilder, IncludeAllFilter};
pub use result::{AvailabilityFilter, DimensionFilter, FilterSpec, IndicatorFilter, query};
