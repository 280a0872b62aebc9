//! Column names and fixed labels shared by the loaders, the engine and the
//! exported result table. Defaults here must stay in sync with
//! [`crate::config::EngineConfig::default`].

pub const INDICATOR: &str = "Indicator";
pub const VALUE: &str = "Value";
pub const NUMBER_OF_YEARS: &str = "number of years";

pub const AGE: &str = "Age";
pub const GROUP: &str = "group";
pub const AREA: &str = "Area";
pub const SEX: &str = "Sex";
pub const NATIONALITY: &str = "Nationality";

/// Disaggregation columns in their canonical order
pub const DEFAULT_DIMENSIONS: [&str; 5] = [AGE, GROUP, AREA, SEX, NATIONALITY];

pub const REQUIRED_YEARS: &str = "Number of Years Required";
pub const AVAILABLE_YEARS: &str = "Number of Years Available";
pub const AVAILABILITY: &str = "Availability";

/// Result columns that precede the dimension columns in the exported table
pub const RESULT_COLUMNS: [&str; 4] = [INDICATOR, REQUIRED_YEARS, AVAILABLE_YEARS, AVAILABILITY];

pub const NOT_APPLICABLE: &str = "Not applicable";
pub const NOT_DISAGGREGATED: &str = "N/A (Not Disaggregated)";

pub const AVAILABLE: &str = "Available";
pub const NOT_AVAILABLE: &str = "Not Available";

pub const OBSERVATIONS_TABLE: &str = "observations";
pub const CRITERIA_TABLE: &str = "criteria";
pub const RESULT_TABLE: &str = "result";
