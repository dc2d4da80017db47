//! Configuration types for the salary advisor.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::columns;

/// The default value inserted when a recognized column is absent.
///
/// In YAML this is written as a single-key map, e.g. `{ text: Unknown }`,
/// `{ number: 3 }` or `{ copy_of: Previous Salary }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDefault {
    /// A literal string; marks the column as categorical.
    Text(String),
    /// A literal number; marks the column as numeric.
    Number(Decimal),
    /// Copy the value of another numeric column in the same row.
    CopyOf(String),
}

/// How a column's values are interpreted after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// The row identifier; unparsable rows are dropped.
    Identifier,
    /// A number; missing cells become 0.
    Numeric,
    /// An open categorical domain that always contains "Unknown".
    Categorical,
}

/// A single recognized column and its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// The column header as it appears in the uploaded table.
    pub name: String,
    /// The value inserted when the column is absent.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub default: ColumnDefault,
}

impl ColumnSpec {
    fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            default: ColumnDefault::Text(value.to_string()),
        }
    }

    fn number(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            default: ColumnDefault::Number(Decimal::from(value)),
        }
    }

    /// Returns how values of this column are interpreted.
    pub fn kind(&self) -> ColumnKind {
        if self.name == columns::ID {
            return ColumnKind::Identifier;
        }
        match self.default {
            ColumnDefault::Text(_) => ColumnKind::Categorical,
            ColumnDefault::Number(_) | ColumnDefault::CopyOf(_) => ColumnKind::Numeric,
        }
    }
}

/// The explicit schema of recognized columns handed to the normalizer.
///
/// # Example
///
/// ```
/// use salary_advisor::config::{ColumnKind, ColumnSchema};
///
/// let schema = ColumnSchema::standard();
/// assert_eq!(schema.columns.len(), 19);
/// assert_eq!(schema.kind_of("Job Role"), Some(ColumnKind::Categorical));
/// assert_eq!(schema.kind_of("Team Size"), Some(ColumnKind::Numeric));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// The recognized columns in schema order.
    pub columns: Vec<ColumnSpec>,
}

impl ColumnSchema {
    /// Returns the built-in schema of 19 recognized columns.
    pub fn standard() -> Self {
        let unknown = columns::UNKNOWN;
        Self {
            columns: vec![
                ColumnSpec::text(columns::NAME, "Employee"),
                ColumnSpec::number(columns::ID, 0),
                ColumnSpec::number(columns::EXPERIENCE, 0),
                ColumnSpec::text(columns::EDUCATION, unknown),
                ColumnSpec::text(columns::JOB_ROLE, unknown),
                ColumnSpec::text(columns::DEPARTMENT, unknown),
                ColumnSpec::text(columns::LOCATION, unknown),
                ColumnSpec::text(columns::SKILLS, unknown),
                ColumnSpec::text(columns::CERTIFICATIONS, unknown),
                ColumnSpec::number(columns::PREVIOUS_SALARY, 0),
                ColumnSpec::number(columns::DEPARTMENT_BUDGET, 0),
                ColumnSpec {
                    name: columns::CURRENT_CTC.to_string(),
                    default: ColumnDefault::CopyOf(columns::PREVIOUS_SALARY.to_string()),
                },
                ColumnSpec::number(columns::PERFORMANCE_RATING, 3),
                ColumnSpec::text(columns::INTERNAL_EXTERNAL, unknown),
                ColumnSpec::number(columns::MARKET_CTC, 0),
                ColumnSpec::text(columns::COMPANY_SIZE, unknown),
                ColumnSpec::text(columns::BUSINESS_UNIT, unknown),
                ColumnSpec::number(columns::TEAM_SIZE, 1),
                ColumnSpec::number(columns::AGE, 0),
            ],
        }
    }

    /// Looks up a column by name.
    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the kind of a recognized column, or `None` if unrecognized.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.get(name).map(ColumnSpec::kind)
    }

    /// Checks that the schema covers every recognized column with a default
    /// of the right kind.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        for name in columns::RECOGNIZED {
            let Some(spec) = self.get(name) else {
                return Err(format!("recognized column '{}' is missing", name));
            };
            let numeric = columns::NUMERIC.contains(&name) || name == columns::ID;
            match (&spec.default, numeric) {
                (ColumnDefault::Text(_), true) => {
                    return Err(format!("column '{}' needs a numeric default", name));
                }
                (ColumnDefault::Number(_) | ColumnDefault::CopyOf(_), false) => {
                    return Err(format!("column '{}' needs a text default", name));
                }
                _ => {}
            }
            if let ColumnDefault::CopyOf(source) = &spec.default {
                match self.get(source).map(|s| &s.default) {
                    Some(ColumnDefault::Number(_)) => {}
                    _ => {
                        return Err(format!(
                            "column '{}' copies '{}', which is not a numeric column with a literal default",
                            name, source
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::standard()
    }
}

/// Settings for the forest regressor and its training features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Numeric columns used as model features.
    pub feature_columns: Vec<String>,
    /// Number of trees in the forest.
    pub trees: usize,
    /// Maximum tree depth; `None` grows until leaves are pure.
    pub max_depth: Option<usize>,
    /// Minimum number of samples required to split a node.
    pub min_samples_split: usize,
    /// Seed for bootstrap sampling.
    pub seed: u64,
    /// Where to write the trained model after each run, if anywhere.
    pub save_path: Option<PathBuf>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            feature_columns: vec![
                columns::EXPERIENCE.to_string(),
                columns::PREVIOUS_SALARY.to_string(),
            ],
            trees: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
            save_path: None,
        }
    }
}

/// Settings for rendered reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Number of employee lines per page of the summary document.
    pub rows_per_page: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { rows_per_page: 35 }
    }
}

/// The contents of `settings.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Model settings.
    pub model: ModelSettings,
    /// Report settings.
    pub reports: ReportSettings,
}

/// A market compensation figure for a role in a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketBenchmark {
    /// Job role, matched case-insensitively.
    pub job_role: String,
    /// Location, matched case-insensitively; `*` matches any location.
    pub location: String,
    /// The benchmark cost to company.
    pub market_ctc: Decimal,
}

/// The contents of `benchmarks.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarksConfig {
    /// All known benchmarks.
    #[serde(default)]
    pub benchmarks: Vec<MarketBenchmark>,
}

/// The complete advisor configuration.
///
/// This struct aggregates the column schema, model and report settings,
/// and the market benchmark table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisorConfig {
    schema: ColumnSchema,
    settings: Settings,
    benchmarks: Vec<MarketBenchmark>,
}

impl AdvisorConfig {
    /// Creates a new AdvisorConfig from its component parts.
    pub fn new(schema: ColumnSchema, settings: Settings, benchmarks: Vec<MarketBenchmark>) -> Self {
        Self {
            schema,
            settings,
            benchmarks,
        }
    }

    /// Returns the column schema.
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the market benchmark table.
    pub fn benchmarks(&self) -> &[MarketBenchmark] {
        &self.benchmarks
    }

    /// Returns a copy of this configuration with different settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}
