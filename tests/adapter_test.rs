//! Tests for reading input tables and exporting results

mod utils;

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, NullArray, StringArray, UInt64Array};
use arrow::datatypes::DataType;
use data_availability::{
    Availability, AvailabilityError, CriteriaAdapter, CriteriaEntry, DimensionSlot,
    ObservationAdapter, ObservationValue, TableAdapter, compute, load_tables, read_parquet,
    results_to_batch, write_parquet, write_results,
};
use tempfile::TempDir;
use utils::{
    batch, column_type, config, criteria, criteria_batch, dims, floats, ints, observation_batch,
    strings,
};

fn string_column<'a>(batch: &'a arrow::record_batch::RecordBatch, name: &str) -> &'a StringArray {
    batch
        .column_by_name(name)
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap()
}

#[test]
fn test_observation_adapter_reads_rows() {
    let adapter = ObservationAdapter::new(&config()).unwrap();
    let records = adapter.convert_batch(&observation_batch()).unwrap();

    assert_eq!(records.len(), 4);
    let sex = dims().index_of("Sex").unwrap();
    let age = dims().index_of("Age").unwrap();

    assert_eq!(records[0].indicator, "Pop");
    assert_eq!(records[0].value, Some(ObservationValue::Number(1.0)));
    assert_eq!(records[0].dimension(sex), Some("Male"));
    assert_eq!(records[0].dimension(age), None);
    assert!(!records[2].has_value());
    assert_eq!(records[3].dimension(sex), None);
    assert!(records.iter().all(|r| r.dimensions.len() == 5));
}

#[test]
fn test_numeric_dimension_is_read_as_text() {
    let input = batch(vec![
        ("Indicator", strings(&[Some("Pop"), Some("Pop")])),
        ("Value", floats(&[Some(1.0), Some(2.0)])),
        ("Age", ints(&[Some(5), None])),
    ]);
    let records = ObservationAdapter::new(&config())
        .unwrap()
        .convert_batch(&input)
        .unwrap();

    let age = dims().index_of("Age").unwrap();
    assert_eq!(records[0].dimension(age), Some("5"));
    assert_eq!(records[1].dimension(age), None);
}

#[test]
fn test_text_and_null_typed_value_columns() {
    let text_values = batch(vec![
        ("Indicator", strings(&[Some("Pop"), Some("Pop")])),
        ("Value", strings(&[Some("n/a"), None])),
    ]);
    let records = ObservationAdapter::new(&config())
        .unwrap()
        .convert_batch(&text_values)
        .unwrap();
    assert_eq!(records[0].value, Some(ObservationValue::Text("n/a".into())));
    assert_eq!(records[1].value, None);

    let all_null = batch(vec![
        ("Indicator", strings(&[Some("Pop"), Some("Pop")])),
        ("Value", Arc::new(NullArray::new(2)) as ArrayRef),
    ]);
    let records = ObservationAdapter::new(&config())
        .unwrap()
        .convert_batch(&all_null)
        .unwrap();
    assert!(records.iter().all(|r| !r.has_value()));
}

#[test]
fn test_nan_values_are_not_valid_years() {
    let input = batch(vec![
        ("Indicator", strings(&[Some("Pop"), Some("Pop")])),
        ("Value", floats(&[Some(1.0), Some(f64::NAN)])),
    ]);
    let records = ObservationAdapter::new(&config())
        .unwrap()
        .convert_batch(&input)
        .unwrap();
    assert!(records[0].has_value());
    assert!(!records[1].has_value());

    let table = compute(&records, &criteria(&[("Pop", 2)]), &config()).unwrap();
    assert_eq!(table.rows()[0].valid_years_count, 1);
    assert_eq!(table.rows()[0].availability, Availability::NotAvailable);
}

#[test]
fn test_nan_dimension_cells_are_null() {
    let input = batch(vec![
        ("Indicator", strings(&[Some("Pop"), Some("Pop")])),
        ("Value", floats(&[Some(1.0), Some(2.0)])),
        ("Age", floats(&[Some(f64::NAN), Some(f64::NAN)])),
    ]);
    let records = ObservationAdapter::new(&config())
        .unwrap()
        .convert_batch(&input)
        .unwrap();

    let age = dims().index_of("Age").unwrap();
    assert!(records.iter().all(|r| r.dimension(age).is_none()));

    let table = compute(&records, &criteria(&[("Pop", 2)]), &config()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].dimensions[age], DimensionSlot::NotDisaggregated);
    assert_eq!(table.rows()[0].availability, Availability::Available);
}

#[test]
fn test_observation_adapter_errors() {
    let adapter = ObservationAdapter::new(&config()).unwrap();

    let null_indicator = batch(vec![
        ("Indicator", strings(&[Some("Pop"), None])),
        ("Value", floats(&[Some(1.0), Some(2.0)])),
    ]);
    assert!(matches!(
        adapter.convert_batch(&null_indicator).unwrap_err(),
        AvailabilityError::NullIndicator { row: 1, .. }
    ));

    let no_value = batch(vec![("Indicator", strings(&[Some("Pop")]))]);
    match adapter.convert_batch(&no_value).unwrap_err() {
        AvailabilityError::MissingColumn { column, .. } => assert_eq!(column, "Value"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_criteria_adapter_accepts_numeric_and_text_years() {
    let adapter = CriteriaAdapter::new(&config());

    let entries = adapter.convert_batch(&criteria_batch()).unwrap();
    assert_eq!(
        entries,
        vec![CriteriaEntry::new("Pop", 1), CriteriaEntry::new("Births", 1)]
    );

    let float_years = batch(vec![
        ("Indicator", strings(&[Some("Pop")])),
        ("number of years", floats(&[Some(3.0)])),
    ]);
    assert_eq!(
        adapter.convert_batch(&float_years).unwrap(),
        vec![CriteriaEntry::new("Pop", 3)]
    );

    let text_years = batch(vec![
        ("Indicator", strings(&[Some("Pop")])),
        ("number of years", strings(&[Some("4")])),
    ]);
    assert_eq!(
        adapter.convert_batch(&text_years).unwrap(),
        vec![CriteriaEntry::new("Pop", 4)]
    );
}

#[test]
fn test_criteria_adapter_rejects_invalid_years() {
    let adapter = CriteriaAdapter::new(&config());

    for years in [floats(&[Some(2.5)]), ints(&[Some(-1)]), ints(&[None])] {
        let input = batch(vec![("Indicator", strings(&[Some("Pop")])), ("number of years", years)]);
        let err = adapter.convert_batch(&input).unwrap_err();
        assert!(
            matches!(err, AvailabilityError::InvalidRequiredYears { ref indicator, .. } if indicator == "Pop"),
            "unexpected error: {err}"
        );
    }

    let missing = batch(vec![("Indicator", strings(&[Some("Pop")]))]);
    assert!(matches!(
        adapter.convert_batch(&missing).unwrap_err(),
        AvailabilityError::MissingColumn { .. }
    ));
}

#[test]
fn test_results_to_batch_layout() {
    let records = vec![
        utils::record("Pop", Some(1.0), &[("Sex", "Male")]),
        utils::record("Pop", Some(1.0), &[]),
        utils::record("Other", Some(1.0), &[]),
    ];
    let table = compute(&records, &criteria(&[("Pop", 1)]), &config()).unwrap();
    let out = results_to_batch(&table).unwrap();

    let names: Vec<String> = out
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    assert_eq!(
        names,
        vec![
            "Indicator",
            "Number of Years Required",
            "Number of Years Available",
            "Availability",
            "Age",
            "group",
            "Area",
            "Sex",
            "Nationality",
        ]
    );
    assert_eq!(column_type(&out, "Number of Years Required"), DataType::UInt64);

    let required = out
        .column_by_name("Number of Years Required")
        .unwrap()
        .as_any()
        .downcast_ref::<UInt64Array>()
        .unwrap();
    assert_eq!(required.value(0), 1);
    assert!(required.is_null(2));

    let sex = string_column(&out, "Sex");
    assert_eq!(sex.value(0), "Male");
    assert!(sex.is_null(1));
    assert_eq!(sex.value(2), "N/A (Not Disaggregated)");

    let availability = string_column(&out, "Availability");
    assert_eq!(availability.value(0), "Available");
    assert_eq!(availability.value(2), "Not Available");
}

#[test]
fn test_parquet_round_trip() {
    let dir = TempDir::new().unwrap();
    let observations = dir.path().join("observations.parquet");
    let criteria_path = dir.path().join("criteria.parquet");
    let output = dir.path().join("results.parquet");

    write_parquet(&observations, &observation_batch()).unwrap();
    write_parquet(&criteria_path, &criteria_batch()).unwrap();

    let tables = load_tables(&observations, &criteria_path, &config()).unwrap();
    assert_eq!(tables.records.len(), 4);
    assert_eq!(tables.criteria.len(), 2);

    let table = compute(&tables.records, &tables.criteria, &config()).unwrap();
    let sex = dims().index_of("Sex").unwrap();
    let area = dims().index_of("Area").unwrap();

    let pop: Vec<_> = table.rows_for("Pop").collect();
    assert_eq!(pop.len(), 2);
    assert_eq!(pop[0].dimensions[sex], DimensionSlot::Value("Male".into()));
    assert_eq!(pop[0].dimensions[area], DimensionSlot::NotDisaggregated);
    assert_eq!(pop[0].valid_years_count, 1);
    assert_eq!(pop[1].availability, Availability::Available);

    write_results(&output, &table).unwrap();
    let written = read_parquet(&output, "result").unwrap();
    let rows: usize = written.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, table.len());
    assert_eq!(
        written[0].schema().fields(),
        results_to_batch(&table).unwrap().schema().fields()
    );
}

#[test]
fn test_load_tables_reports_missing_input() {
    let dir = TempDir::new().unwrap();
    let criteria_path = dir.path().join("criteria.parquet");
    write_parquet(&criteria_path, &criteria_batch()).unwrap();

    let err = load_tables(&dir.path().join("absent.parquet"), &criteria_path, &config())
        .unwrap_err();
    match err {
        AvailabilityError::MissingInput { table, .. } => assert_eq!(table, "observations"),
        other => panic!("unexpected error: {other}"),
    }
}
