//! Tests for querying and summarising availability results

mod utils;

use arrow::array::{Array, StringArray};
use data_availability::{
    Availability, AvailabilityError, AvailabilityStatistics, AvailabilitySummary,
    AvailabilityTable, DimensionSlot, FilterSpec, compute, filter_result_batch, query,
    results_to_batch,
};
use utils::{config, criteria, record};

/// Pop by Sex (Male available, Female not), Births not disaggregated
fn sample_table() -> AvailabilityTable {
    let records = vec![
        record("Pop", Some(1.0), &[("Sex", "Male")]),
        record("Pop", Some(2.0), &[("Sex", "Male")]),
        record("Pop", Some(3.0), &[("Sex", "Female")]),
        record("Births", Some(4.0), &[]),
        record("Births", Some(5.0), &[]),
        record("Pop", Some(6.0), &[]),
    ];
    compute(&records, &criteria(&[("Pop", 2), ("Births", 2)]), &config()).unwrap()
}

fn indicators(table: &AvailabilityTable) -> Vec<&str> {
    table.rows().iter().map(|r| r.indicator.as_str()).collect()
}

#[test]
fn test_unrestricted_query_returns_everything() {
    let table = sample_table();
    let spec = FilterSpec::new();
    assert!(spec.is_unrestricted());

    let result = query(&table, &spec).unwrap();
    assert_eq!(result, table);
}

#[test]
fn test_query_by_indicator() {
    let table = sample_table();
    let result = query(&table, &FilterSpec::new().with_indicators(["Births"])).unwrap();
    assert_eq!(indicators(&result), vec!["Births"]);
}

#[test]
fn test_query_by_availability_preserves_order() {
    let table = sample_table();
    let result = query(
        &table,
        &FilterSpec::new().with_availability([Availability::NotAvailable]),
    )
    .unwrap();

    // Female and the null-Sex partition of Pop
    assert_eq!(indicators(&result), vec!["Pop", "Pop"]);
    assert!(
        result
            .rows()
            .iter()
            .all(|r| r.availability == Availability::NotAvailable)
    );
}

#[test]
fn test_query_by_dimension_value_and_sentinel() {
    let table = sample_table();

    let male = query(&table, &FilterSpec::new().with_dimension("Sex", ["Male"])).unwrap();
    assert_eq!(male.len(), 1);
    assert_eq!(male.rows()[0].valid_years_count, 2);

    let not_disaggregated = query(
        &table,
        &FilterSpec::new().with_dimension("Sex", ["N/A (Not Disaggregated)"]),
    )
    .unwrap();
    assert_eq!(indicators(&not_disaggregated), vec!["Births"]);
}

#[test]
fn test_query_combines_selections() {
    let table = sample_table();
    let spec = FilterSpec::new()
        .with_indicators(["Pop", "Births"])
        .with_availability([Availability::Available])
        .with_dimension("Area", ["N/A (Not Disaggregated)"]);

    let result = query(&table, &spec).unwrap();
    assert_eq!(indicators(&result), vec!["Pop", "Births"]);
}

#[test]
fn test_category_equal_to_label_only_collides_after_export() {
    let records = vec![
        record("Pop", Some(1.0), &[("Sex", "N/A (Not Disaggregated)")]),
        record("Pop", Some(1.0), &[("Sex", "Male")]),
        record("Births", Some(1.0), &[]),
    ];
    let table = compute(&records, &criteria(&[("Pop", 1), ("Births", 1)]), &config()).unwrap();

    // In memory the genuine category stays a concrete value
    assert_eq!(
        table.rows()[0].dimensions[utils::dims().index_of("Sex").unwrap()],
        DimensionSlot::Value("N/A (Not Disaggregated)".into())
    );
    assert!(table.rows()[0].active_dimensions().count() == 1);

    // Text filters see the label, so both rows match
    let spec = FilterSpec::new().with_dimension("Sex", ["N/A (Not Disaggregated)"]);
    assert_eq!(indicators(&query(&table, &spec).unwrap()), vec!["Pop", "Births"]);
}

#[test]
fn test_query_rejects_unknown_dimension() {
    let table = sample_table();
    let err = query(&table, &FilterSpec::new().with_dimension("Region", ["North"])).unwrap_err();
    assert!(matches!(err, AvailabilityError::InvalidConfig(_)));
}

#[test]
fn test_batch_filter_matches_row_query() {
    let table = sample_table();
    let spec = FilterSpec::new()
        .with_availability([Availability::Available])
        .with_dimension("Sex", ["Male", "N/A (Not Disaggregated)"]);

    let expected = results_to_batch(&query(&table, &spec).unwrap()).unwrap();
    let filtered = filter_result_batch(&results_to_batch(&table).unwrap(), &spec).unwrap();

    assert_eq!(filtered, expected);
}

#[test]
fn test_batch_filter_skips_null_dimension_values() {
    let table = sample_table();
    let batch = results_to_batch(&table).unwrap();
    let filtered = filter_result_batch(
        &batch,
        &FilterSpec::new().with_indicators(["Pop"]).with_dimension("Sex", ["Male", "Female"]),
    )
    .unwrap();

    let sex = filtered
        .column_by_name("Sex")
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(sex.len(), 2);
    assert_eq!(sex.null_count(), 0);
}

#[test]
fn test_batch_filter_reports_missing_column() {
    let batch = results_to_batch(&sample_table()).unwrap();
    let err = filter_result_batch(&batch, &FilterSpec::new().with_dimension("Region", ["x"]))
        .unwrap_err();
    assert!(matches!(err, AvailabilityError::MissingColumn { .. }));
}

#[test]
fn test_summary_counts() {
    let summary = AvailabilitySummary::from_table(&sample_table());

    assert_eq!(summary.total(), 4);
    assert_eq!(summary.available, 2);
    assert_eq!(summary.not_available, 2);
    assert!((summary.available_percentage() - 50.0).abs() < f64::EPSILON);

    let pop = &summary.by_indicator[0];
    assert_eq!(pop.indicator, "Pop");
    assert_eq!((pop.available, pop.not_available), (1, 2));
    assert_eq!(summary.by_indicator[1].indicator, "Births");

    assert!(format!("{:?}", AvailabilityStatistics).contains("AvailabilityStatistics"));

    let report = summary.render();
    assert!(report.contains("Total Partitions: 4"));
    assert!(report.contains("Pop: 1 available, 2 not available"));
    assert!(report.contains("Available: 2 (50.0%)"));
    assert!(report.ends_with("Births: 1 available, 0 not available\n"));
}

#[test]
fn test_empty_summary() {
    let summary = AvailabilitySummary::from_rows(&[]);
    assert_eq!(summary.total(), 0);
    assert!(summary.available_percentage().abs() < f64::EPSILON);
}

#[test]
fn test_distinct_option_lists() {
    let table = sample_table();

    assert_eq!(
        AvailabilityStatistics::distinct_indicators(&table),
        vec!["Pop", "Births"]
    );
    assert_eq!(
        AvailabilityStatistics::distinct_dimension_values(&table, "Sex").unwrap(),
        vec!["Male", "Female", "N/A (Not Disaggregated)"]
    );
    assert!(AvailabilityStatistics::distinct_dimension_values(&table, "Region").is_none());
}
