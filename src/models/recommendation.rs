//! Recommendation models for the salary advisor.
//!
//! This module contains the [`AdjustmentResult`] and [`ParityResult`] types
//! computed once per employee per run, and the [`BatchReport`] that gathers
//! them for a whole upload.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditTrace, EmployeeRecord};

/// The business attributes the adjustment engine consumes for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentInput {
    /// Department budget; the floor of the recommendation.
    pub dept_budget: Decimal,
    /// Market benchmark; the ceiling of the recommendation.
    pub market_ctc: Decimal,
    /// Salary earned before the current role.
    pub previous_salary: Decimal,
    /// Years of experience.
    pub experience: Decimal,
    /// Whether the employee is being promoted.
    pub promotion: bool,
    /// Current cost to company.
    pub current_ctc: Decimal,
    /// Performance rating, 3 is neutral.
    pub perf_rating: i32,
    /// Number of direct reports.
    pub team_size: u32,
}

/// The experience tier that selects how the base salary is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryTier {
    /// One year of experience or less; the model output is ignored.
    Fresher,
    /// More than one year of experience.
    Experienced,
}

/// The bounded recommendation for one employee.
///
/// `low <= optimal <= high` is not guaranteed: when the department budget
/// exceeds the market benchmark the bounds cross and an `INVERTED_BOUNDS`
/// warning is recorded in the audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentResult {
    /// Lower end of the recommended range.
    pub low: Decimal,
    /// The recommended salary.
    pub optimal: Decimal,
    /// Upper end of the recommended range.
    pub high: Decimal,
    /// The unmodified model output.
    pub raw: Decimal,
    /// The base salary after all multipliers, before bounding.
    pub base_salary: Decimal,
    /// The tier used to derive the base salary.
    pub tier: SalaryTier,
    /// Department budget used.
    pub dept_budget: Decimal,
    /// Market benchmark used.
    pub market_ctc: Decimal,
    /// Previous salary used.
    pub previous_salary: Decimal,
    /// Experience used.
    pub experience: Decimal,
    /// Promotion flag used.
    pub promotion: bool,
    /// Current CTC used.
    pub current_ctc: Decimal,
    /// Performance rating used.
    pub perf_rating: i32,
    /// Team size used.
    pub team_size: u32,
    /// Every rule applied, in order.
    pub audit_trace: AuditTrace,
}

impl AdjustmentResult {
    /// Returns true when the low bound exceeds the high bound.
    pub fn has_inverted_bounds(&self) -> bool {
        self.low > self.high
    }
}

/// How a parity score was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityMethod {
    /// Mean relative deviation from market and budget.
    SymmetricDeviation,
    /// Market or budget was zero; the neutral score was used.
    InsufficientData,
}

/// The fairness signal for one recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityResult {
    /// Score rounded to two places; 1 is perfect parity and it may go negative.
    pub score: Decimal,
    /// True when the score is below the bias threshold.
    pub bias_detected: bool,
    /// How the score was obtained.
    pub method: ParityMethod,
}

/// One employee's complete outcome for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecommendation {
    /// The normalized record, with the resolved market benchmark.
    pub employee: EmployeeRecord,
    /// The bounded recommendation.
    pub adjustment: AdjustmentResult,
    /// The parity analysis of the recommendation.
    pub parity: ParityResult,
}

/// The result of processing one uploaded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// One entry per surviving row, in upload order.
    pub recommendations: Vec<EmployeeRecommendation>,
    /// 0-based upload row indices dropped for an unparsable identifier.
    pub dropped_rows: Vec<usize>,
    /// User-facing notices for successful market lookups.
    pub market_notices: Vec<String>,
    /// The total run duration in microseconds.
    pub duration_us: u64,
}

impl BatchReport {
    /// Finds the recommendation for an employee identifier.
    pub fn find(&self, id: i64) -> Option<&EmployeeRecommendation> {
        self.recommendations.iter().find(|r| r.employee.id == id)
    }

    /// Counts recommendations flagged for bias.
    pub fn bias_count(&self) -> usize {
        self.recommendations
            .iter()
            .filter(|r| r.parity.bias_detected)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_adjustment(low: &str, high: &str) -> AdjustmentResult {
        AdjustmentResult {
            low: dec(low),
            optimal: dec("800000"),
            high: dec(high),
            raw: dec("800000"),
            base_salary: dec("800000"),
            tier: SalaryTier::Experienced,
            dept_budget: dec("600000"),
            market_ctc: dec("900000"),
            previous_salary: dec("750000"),
            experience: dec("5"),
            promotion: false,
            current_ctc: dec("780000"),
            perf_rating: 3,
            team_size: 2,
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        }
    }

    #[test]
    fn test_inverted_bounds_detection() {
        assert!(!create_adjustment("760000", "880000").has_inverted_bounds());
        assert!(create_adjustment("900000", "400000").has_inverted_bounds());
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(
            serde_json::to_string(&SalaryTier::Fresher).unwrap(),
            "\"fresher\""
        );
        assert_eq!(
            serde_json::to_string(&SalaryTier::Experienced).unwrap(),
            "\"experienced\""
        );
    }

    #[test]
    fn test_parity_method_serialization() {
        assert_eq!(
            serde_json::to_string(&ParityMethod::InsufficientData).unwrap(),
            "\"insufficient_data\""
        );
    }

    #[test]
    fn test_decimal_amounts_serialize_as_strings() {
        let adjustment = create_adjustment("760000", "880000");
        let json = serde_json::to_value(&adjustment).unwrap();
        assert_eq!(json["low"], "760000");
        assert_eq!(json["tier"], "experienced");
    }

    #[test]
    fn test_adjustment_result_round_trip() {
        let adjustment = create_adjustment("760000", "880000");
        let json = serde_json::to_string(&adjustment).unwrap();
        let deserialized: AdjustmentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(adjustment, deserialized);
    }
}
