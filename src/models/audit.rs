//! Audit trail models.
//!
//! Every rule the adjustment engine applies records an [`AuditStep`] so a
//! recommendation can be explained line by line.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for one recommendation.
///
/// # Example
///
/// ```
/// use salary_advisor::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.step("promotion_uplift").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns the first step recorded for a rule.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }

    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_step(step_number: u32, rule_id: &str) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: "Test Rule".to_string(),
            input: json!({ "base_salary": "800000" }),
            output: json!({ "base_salary": "920000" }),
            reasoning: "$800000 x 1.15 = $920000".to_string(),
        }
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = create_step(2, "promotion_uplift");
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["step_number"], 2);
        assert_eq!(json["rule_id"], "promotion_uplift");
        assert_eq!(json["input"]["base_salary"], "800000");
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "INVERTED_BOUNDS".to_string(),
            message: "low exceeds high".to_string(),
            severity: "medium".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"INVERTED_BOUNDS\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }

    #[test]
    fn test_step_lookup_and_warning_check() {
        let trace = AuditTrace {
            steps: vec![create_step(1, "tier_selection"), create_step(2, "promotion_uplift")],
            warnings: vec![AuditWarning {
                code: "INVERTED_BOUNDS".to_string(),
                message: "low exceeds high".to_string(),
                severity: "medium".to_string(),
            }],
            duration_us: 5,
        };

        assert_eq!(trace.step("promotion_uplift").unwrap().step_number, 2);
        assert!(trace.step("team_size_bump").is_none());
        assert!(trace.has_warning("INVERTED_BOUNDS"));
        assert!(!trace.has_warning("OTHER"));
    }

    #[test]
    fn test_audit_trace_round_trip() {
        let trace = AuditTrace {
            steps: vec![create_step(1, "tier_selection")],
            warnings: vec![],
            duration_us: 42,
        };
        let json = serde_json::to_string(&trace).unwrap();
        let deserialized: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, deserialized);
    }
}
