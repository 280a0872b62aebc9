//! Observation table adapter

use arrow::record_batch::RecordBatch;

use crate::adapters::TableAdapter;
use crate::columns::OBSERVATIONS_TABLE;
use crate::config::EngineConfig;
use crate::error::{AvailabilityError, Result};
use crate::models::{DimensionSet, ObservationValue, Record};
use crate::utils::arrow::{float_values, get_column, require_column, text_values};
use crate::utils::logging::log_warning;

/// Reads observation rows into [`Record`]s.
///
/// The indicator column is required and may not contain nulls. The value
/// column is required but may hold any type: numeric values are read as
/// numbers, anything else as text. Null and NaN cells are missing. Dimension columns are read as text; a
/// configured dimension the batch lacks is null on every record.
#[derive(Debug, Clone)]
pub struct ObservationAdapter {
    indicator_column: String,
    value_column: String,
    not_disaggregated_label: String,
    dimensions: DimensionSet,
}

impl ObservationAdapter {
    /// Create an adapter for the columns named in `config`
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            indicator_column: config.indicator_column.clone(),
            value_column: config.value_column.clone(),
            not_disaggregated_label: config.not_disaggregated_label.clone(),
            dimensions: config.dimension_set()?,
        })
    }

    fn read_values(&self, batch: &RecordBatch) -> Result<Vec<Option<ObservationValue>>> {
        let column = require_column(batch, OBSERVATIONS_TABLE, &self.value_column)?;

        if column.data_type().is_numeric() {
            let values = float_values(&column, OBSERVATIONS_TABLE, &self.value_column)?;
            Ok(values
                .into_iter()
                .map(|v| v.map(ObservationValue::Number))
                .collect())
        } else {
            let values = text_values(&column, OBSERVATIONS_TABLE, &self.value_column)?;
            Ok(values
                .into_iter()
                .map(|v| v.map(ObservationValue::Text))
                .collect())
        }
    }

    fn read_dimensions(&self, batch: &RecordBatch) -> Result<Vec<Vec<Option<String>>>> {
        let mut columns = Vec::with_capacity(self.dimensions.len());
        for (_, name) in self.dimensions.iter() {
            match get_column(batch, name) {
                Some(column) => {
                    let values = text_values(&column, OBSERVATIONS_TABLE, name)?;
                    if values
                        .iter()
                        .flatten()
                        .any(|v| *v == self.not_disaggregated_label)
                    {
                        log_warning(
                            &format!(
                                "Dimension column '{name}' contains the not-disaggregated label \
                                 '{}'; exported results cannot tell it from the sentinel",
                                self.not_disaggregated_label
                            ),
                            None,
                        );
                    }
                    columns.push(values);
                }
                None => {
                    log_warning(
                        &format!("Dimension column '{name}' not found; treating it as empty"),
                        None,
                    );
                    columns.push(vec![None; batch.num_rows()]);
                }
            }
        }
        Ok(columns)
    }
}

impl TableAdapter<Record> for ObservationAdapter {
    fn convert_batch(&self, batch: &RecordBatch) -> Result<Vec<Record>> {
        let indicator_column = require_column(batch, OBSERVATIONS_TABLE, &self.indicator_column)?;
        let indicators = text_values(&indicator_column, OBSERVATIONS_TABLE, &self.indicator_column)?;
        let values = self.read_values(batch)?;
        let mut dimension_columns = self.read_dimensions(batch)?;

        let mut records = Vec::with_capacity(batch.num_rows());
        for (row, (indicator, value)) in indicators.into_iter().zip(values).enumerate() {
            let indicator = indicator.ok_or(AvailabilityError::NullIndicator {
                table: OBSERVATIONS_TABLE,
                row,
            })?;
            let dimensions = dimension_columns
                .iter_mut()
                .map(|column| column[row].take())
                .collect();
            records.push(Record::new(indicator, value, dimensions));
        }

        Ok(records)
    }
}
