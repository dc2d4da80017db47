//! Employee table normalization.
//!
//! Resolves every recognized column to a typed value once, so downstream
//! components never deal with missing data.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use crate::config::{ColumnDefault, ColumnKind, ColumnSchema, ColumnSpec, columns};
use crate::error::{EngineError, EngineResult};
use crate::models::{Attribute, EmployeeRecord};

use super::table::RawTable;

/// The output of normalizing one employee table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedBatch {
    /// Surviving rows in their original relative order.
    pub records: Vec<EmployeeRecord>,
    /// 0-based indices of rows dropped for a missing or unparsable ID.
    pub dropped_rows: Vec<usize>,
    /// Observed domain of each categorical column; always contains "Unknown".
    pub categories: BTreeMap<String, BTreeSet<String>>,
}

/// How an unrecognized column is carried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtraKind {
    Numeric,
    FreeText,
}

/// Turns raw tables into fully resolved employee records.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    schema: ColumnSchema,
}

impl Normalizer {
    /// Creates a normalizer for the given column schema.
    pub fn new(schema: ColumnSchema) -> Self {
        Self { schema }
    }

    /// Returns the schema in use.
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Normalizes a raw table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidField`] when a recognized numeric cell or
    /// the `Promotion` flag is present but cannot be parsed. Rows with a
    /// missing or unparsable ID are dropped, not rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_advisor::ingest::{Normalizer, RawTable};
    ///
    /// let table = RawTable::from_csv_str("ID,Name,Previous Salary\n7.0,Asha,750000\n,Ravi,1\n").unwrap();
    /// let batch = Normalizer::default().normalize(&table).unwrap();
    ///
    /// assert_eq!(batch.records.len(), 1);
    /// assert_eq!(batch.records[0].id, 7);
    /// assert_eq!(batch.records[0].current_ctc, batch.records[0].previous_salary);
    /// assert_eq!(batch.dropped_rows, vec![1]);
    /// ```
    pub fn normalize(&self, raw: &RawTable) -> EngineResult<NormalizedBatch> {
        let extras = self.classify_extra_columns(raw);
        let categorical: Vec<&ColumnSpec> = self
            .schema
            .columns
            .iter()
            .filter(|spec| spec.kind() == ColumnKind::Categorical)
            .collect();

        let mut categories: BTreeMap<String, BTreeSet<String>> = categorical
            .iter()
            .map(|spec| {
                (
                    spec.name.clone(),
                    BTreeSet::from([columns::UNKNOWN.to_string()]),
                )
            })
            .collect();

        let mut records = Vec::with_capacity(raw.len());
        let mut dropped_rows = Vec::new();
        let mut seen_ids = HashSet::new();

        for row in 0..raw.len() {
            let Some(id) = self.resolve_id(raw, row) else {
                warn!(row, "Dropping row with missing or unparsable ID");
                dropped_rows.push(row);
                continue;
            };
            if !seen_ids.insert(id) {
                warn!(id, row, "Duplicate employee ID");
            }

            let mut attributes = Vec::new();
            let mut name = String::new();
            for spec in &categorical {
                let value = self.resolve_text(raw, row, spec);
                if let Some(domain) = categories.get_mut(&spec.name) {
                    domain.insert(value.clone());
                }
                if spec.name == columns::NAME {
                    name = value;
                } else {
                    attributes.push(Attribute {
                        column: spec.name.clone(),
                        value,
                    });
                }
            }
            for (column, kind) in &extras {
                let value = match (raw.cell(row, column), kind) {
                    (Some(cell), _) => cell.to_string(),
                    (None, ExtraKind::Numeric) => "0".to_string(),
                    (None, ExtraKind::FreeText) => columns::UNKNOWN.to_string(),
                };
                attributes.push(Attribute {
                    column: column.clone(),
                    value,
                });
            }

            let performance_rating = self.resolve_number(raw, row, columns::PERFORMANCE_RATING)?;
            let team_size = self.resolve_number(raw, row, columns::TEAM_SIZE)?;

            records.push(EmployeeRecord {
                id,
                name,
                experience: self.resolve_number(raw, row, columns::EXPERIENCE)?,
                previous_salary: self.resolve_number(raw, row, columns::PREVIOUS_SALARY)?,
                current_ctc: self.resolve_number(raw, row, columns::CURRENT_CTC)?,
                department_budget: self.resolve_number(raw, row, columns::DEPARTMENT_BUDGET)?,
                market_ctc: self.resolve_number(raw, row, columns::MARKET_CTC)?,
                performance_rating: to_rating(performance_rating, row)?,
                team_size: to_team_size(team_size, row)?,
                promotion: parse_promotion(raw, row)?,
                age: self.resolve_number(raw, row, columns::AGE)?,
                attributes,
            });
        }

        debug!(
            rows = raw.len(),
            kept = records.len(),
            dropped = dropped_rows.len(),
            "Normalized employee table"
        );

        Ok(NormalizedBatch {
            records,
            dropped_rows,
            categories,
        })
    }

    /// Unrecognized columns in table order, numeric when every present cell
    /// parses as a number.
    fn classify_extra_columns(&self, raw: &RawTable) -> Vec<(String, ExtraKind)> {
        raw.headers()
            .iter()
            .enumerate()
            .filter(|(_, header)| {
                self.schema.get(header).is_none() && header.as_str() != columns::PROMOTION
            })
            .map(|(index, header)| {
                let numeric = raw
                    .rows()
                    .iter()
                    .filter_map(|row| row[index].as_deref())
                    .all(|cell| parse_decimal(cell).is_some());
                let kind = if numeric {
                    ExtraKind::Numeric
                } else {
                    ExtraKind::FreeText
                };
                (header.clone(), kind)
            })
            .collect()
    }

    fn resolve_id(&self, raw: &RawTable, row: usize) -> Option<i64> {
        if raw.has_column(columns::ID) {
            return raw.cell(row, columns::ID).and_then(parse_identifier);
        }
        match self.schema.get(columns::ID).map(|spec| &spec.default) {
            Some(ColumnDefault::Number(value)) => value.trunc().to_i64(),
            _ => None,
        }
    }

    fn resolve_text(&self, raw: &RawTable, row: usize, spec: &ColumnSpec) -> String {
        if raw.has_column(&spec.name) {
            return raw
                .cell(row, &spec.name)
                .unwrap_or(columns::UNKNOWN)
                .to_string();
        }
        match &spec.default {
            ColumnDefault::Text(value) => value.clone(),
            _ => columns::UNKNOWN.to_string(),
        }
    }

    fn resolve_number(&self, raw: &RawTable, row: usize, column: &str) -> EngineResult<Decimal> {
        if raw.has_column(column) {
            return match raw.cell(row, column) {
                None => Ok(Decimal::ZERO),
                Some(cell) => parse_decimal(cell).ok_or_else(|| EngineError::InvalidField {
                    row,
                    column: column.to_string(),
                    message: format!("'{}' is not a number", cell),
                }),
            };
        }
        match self.schema.get(column).map(|spec| &spec.default) {
            Some(ColumnDefault::Number(value)) => Ok(*value),
            Some(ColumnDefault::CopyOf(source)) if source != column => {
                self.resolve_number(raw, row, source)
            }
            _ => Ok(Decimal::ZERO),
        }
    }
}

/// Parses a numeric cell, accepting plain and scientific notation.
fn parse_decimal(cell: &str) -> Option<Decimal> {
    let cell = cell.trim();
    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .ok()
}

/// Parses an ID cell; fractional values truncate toward zero.
fn parse_identifier(cell: &str) -> Option<i64> {
    parse_decimal(cell)?.trunc().to_i64()
}

fn to_rating(value: Decimal, row: usize) -> EngineResult<i32> {
    if !value.fract().is_zero() {
        return Err(EngineError::InvalidField {
            row,
            column: columns::PERFORMANCE_RATING.to_string(),
            message: format!("rating {} is not a whole number", value.normalize()),
        });
    }
    value.to_i32().ok_or_else(|| EngineError::InvalidField {
        row,
        column: columns::PERFORMANCE_RATING.to_string(),
        message: format!("rating {} is out of range", value.normalize()),
    })
}

fn to_team_size(value: Decimal, row: usize) -> EngineResult<u32> {
    if !value.fract().is_zero() || value < Decimal::ZERO {
        return Err(EngineError::InvalidField {
            row,
            column: columns::TEAM_SIZE.to_string(),
            message: format!(
                "team size {} is not a non-negative whole number",
                value.normalize()
            ),
        });
    }
    value.to_u32().ok_or_else(|| EngineError::InvalidField {
        row,
        column: columns::TEAM_SIZE.to_string(),
        message: format!("team size {} is out of range", value.normalize()),
    })
}

fn parse_promotion(raw: &RawTable, row: usize) -> EngineResult<bool> {
    let Some(cell) = raw.cell(row, columns::PROMOTION) else {
        return Ok(false);
    };
    match cell.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(EngineError::InvalidField {
            row,
            column: columns::PROMOTION.to_string(),
            message: format!("'{}' is not a yes/no flag", cell),
        }),
    }
}
