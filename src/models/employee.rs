//! Employee record model.
//!
//! This module defines the [`EmployeeRecord`] struct: one fully resolved row
//! of the employee table, as produced by the normalizer.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::columns;

use super::recommendation::AdjustmentInput;

/// A descriptive column value carried through for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The column header.
    pub column: String,
    /// The cell value after normalization.
    pub value: String,
}

/// Represents an employee with every numeric field resolved.
///
/// Defaults for absent columns and missing cells have already been
/// substituted, so downstream components never need to re-implement
/// fallback logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Numeric identifier, unique within a batch.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Years of experience.
    pub experience: Decimal,
    /// Salary earned before the current role.
    pub previous_salary: Decimal,
    /// Current cost to company.
    pub current_ctc: Decimal,
    /// Budget the department allots for the position.
    pub department_budget: Decimal,
    /// Market benchmark cost to company.
    pub market_ctc: Decimal,
    /// Performance rating, nominally 1 to 5 with 3 neutral.
    pub performance_rating: i32,
    /// Number of direct reports.
    pub team_size: u32,
    /// Whether the employee is being promoted.
    pub promotion: bool,
    /// Employee age.
    pub age: Decimal,
    /// Descriptive columns (job role, location, department, ...) and any
    /// unrecognized upload columns, in table order.
    pub attributes: Vec<Attribute>,
}

impl EmployeeRecord {
    /// Returns the value of a descriptive column, if present.
    pub fn attribute(&self, column: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.column == column)
            .map(|a| a.value.as_str())
    }

    /// Returns the job role, or "Unknown" when not recorded.
    pub fn job_role(&self) -> &str {
        self.attribute(columns::JOB_ROLE).unwrap_or(columns::UNKNOWN)
    }

    /// Returns the location, or "Unknown" when not recorded.
    pub fn location(&self) -> &str {
        self.attribute(columns::LOCATION).unwrap_or(columns::UNKNOWN)
    }

    /// Returns the value of a recognized numeric column as a model feature.
    ///
    /// Returns `None` for columns that are not numeric employee fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_advisor::models::EmployeeRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let record = EmployeeRecord {
    ///     id: 1,
    ///     name: "Asha".to_string(),
    ///     experience: Decimal::new(45, 1),
    ///     previous_salary: Decimal::from(750_000),
    ///     current_ctc: Decimal::from(780_000),
    ///     department_budget: Decimal::from(600_000),
    ///     market_ctc: Decimal::from(900_000),
    ///     performance_rating: 3,
    ///     team_size: 2,
    ///     promotion: false,
    ///     age: Decimal::from(31),
    ///     attributes: vec![],
    /// };
    /// assert_eq!(record.numeric_feature("Experience"), Some(4.5));
    /// assert_eq!(record.numeric_feature("Job Role"), None);
    /// ```
    pub fn numeric_feature(&self, column: &str) -> Option<f64> {
        let value = match column {
            columns::EXPERIENCE => self.experience,
            columns::PREVIOUS_SALARY => self.previous_salary,
            columns::CURRENT_CTC => self.current_ctc,
            columns::DEPARTMENT_BUDGET => self.department_budget,
            columns::MARKET_CTC => self.market_ctc,
            columns::PERFORMANCE_RATING => Decimal::from(self.performance_rating),
            columns::TEAM_SIZE => Decimal::from(self.team_size),
            columns::AGE => self.age,
            _ => return None,
        };
        value.to_f64()
    }

    /// Returns the business attributes the adjustment engine consumes.
    pub fn adjustment_input(&self) -> AdjustmentInput {
        AdjustmentInput {
            dept_budget: self.department_budget,
            market_ctc: self.market_ctc,
            previous_salary: self.previous_salary,
            experience: self.experience,
            promotion: self.promotion,
            current_ctc: self.current_ctc,
            perf_rating: self.performance_rating,
            team_size: self.team_size,
        }
    }
}
