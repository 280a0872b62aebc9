//! Criteria table adapter

use arrow::record_batch::RecordBatch;

use crate::adapters::TableAdapter;
use crate::columns::CRITERIA_TABLE;
use crate::config::EngineConfig;
use crate::criteria::CriteriaEntry;
use crate::error::{AvailabilityError, Result};
use crate::utils::arrow::{float_values, require_column, text_values};

/// Reads `(indicator, required years)` rows into [`CriteriaEntry`]s.
///
/// Required years may be stored as any numeric type, or as text holding a
/// number, but must be a non-negative whole number.
#[derive(Debug, Clone)]
pub struct CriteriaAdapter {
    indicator_column: String,
    required_years_column: String,
}

impl CriteriaAdapter {
    /// Create an adapter for the columns named in `config`
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            indicator_column: config.indicator_column.clone(),
            required_years_column: config.required_years_column.clone(),
        }
    }
}

/// Convert a numeric threshold to whole years
fn whole_years(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then(|| value as u64)
}

impl TableAdapter<CriteriaEntry> for CriteriaAdapter {
    fn convert_batch(&self, batch: &RecordBatch) -> Result<Vec<CriteriaEntry>> {
        let indicator_column = require_column(batch, CRITERIA_TABLE, &self.indicator_column)?;
        let years_column = require_column(batch, CRITERIA_TABLE, &self.required_years_column)?;

        let indicators = text_values(&indicator_column, CRITERIA_TABLE, &self.indicator_column)?;
        let years = float_values(&years_column, CRITERIA_TABLE, &self.required_years_column)?;
        let years_text = text_values(&years_column, CRITERIA_TABLE, &self.required_years_column)?;

        indicators
            .into_iter()
            .zip(years)
            .zip(years_text)
            .enumerate()
            .map(|(row, ((indicator, years), text))| {
                let indicator = indicator.ok_or(AvailabilityError::NullIndicator {
                    table: CRITERIA_TABLE,
                    row,
                })?;
                let required_years = years.and_then(whole_years).ok_or_else(|| {
                    AvailabilityError::InvalidRequiredYears {
                        indicator: indicator.clone(),
                        value: text.unwrap_or_else(|| "null".to_string()),
                    }
                })?;
                Ok(CriteriaEntry::new(indicator, required_years))
            })
            .collect()
    }
}
