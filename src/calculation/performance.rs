//! Performance rating adjustment.
//!
//! The base salary moves 2.5% per rating point away from the neutral
//! rating of 3. Ratings outside 1..=5 are not rejected; they extrapolate.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::AuditStep;

use super::arithmetic;

/// The rating that leaves the base salary unchanged.
pub const NEUTRAL_RATING: i32 = 3;

/// Returns the adjustment per rating point, 0.025 (2.5%).
pub fn performance_step() -> Decimal {
    Decimal::new(25, 3)
}

/// Returns the multiplier for a rating: `1 + (rating - 3) * 0.025`.
///
/// # Examples
///
/// ```
/// use salary_advisor::calculation::performance_multiplier;
/// use rust_decimal::Decimal;
///
/// assert_eq!(performance_multiplier(5), Decimal::new(105, 2));
/// assert_eq!(performance_multiplier(1), Decimal::new(95, 2));
/// ```
pub fn performance_multiplier(rating: i32) -> Decimal {
    Decimal::ONE + Decimal::from(i64::from(rating) - i64::from(NEUTRAL_RATING)) * performance_step()
}

/// The result of applying the performance adjustment.
#[derive(Debug, Clone)]
pub struct PerformanceResult {
    /// The base salary after the adjustment.
    pub base_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the performance multiplier to a base salary.
///
/// The multiplier is always applied, including the neutral `x 1` case, so
/// the audit trail shows every rating that was considered.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] if the adjusted salary is
/// out of `Decimal` range.
pub fn apply_performance_adjustment(
    base_salary: Decimal,
    rating: i32,
    step_number: u32,
) -> EngineResult<PerformanceResult> {
    let multiplier = performance_multiplier(rating);
    let adjusted = arithmetic::mul(base_salary, multiplier, "performance_adjustment")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "performance_adjustment".to_string(),
        rule_name: "Performance Adjustment".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "perf_rating": rating
        }),
        output: serde_json::json!({
            "base_salary": adjusted.normalize().to_string(),
            "multiplier": multiplier.normalize().to_string()
        }),
        reasoning: format!(
            "Rating {}: ${} x {} = ${}",
            rating,
            base_salary.normalize(),
            multiplier.normalize(),
            adjusted.normalize()
        ),
    };

    Ok(PerformanceResult {
        base_salary: adjusted,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_multiplier_table() {
        assert_eq!(performance_multiplier(1), dec("0.95"));
        assert_eq!(performance_multiplier(2), dec("0.975"));
        assert_eq!(performance_multiplier(3), dec("1"));
        assert_eq!(performance_multiplier(4), dec("1.025"));
        assert_eq!(performance_multiplier(5), dec("1.05"));
    }

    #[test]
    fn test_out_of_range_ratings_extrapolate() {
        assert_eq!(performance_multiplier(0), dec("0.925"));
        assert_eq!(performance_multiplier(7), dec("1.1"));
    }

    #[test]
    fn test_neutral_rating_leaves_base_unchanged() {
        let result = apply_performance_adjustment(dec("800000"), 3, 3).unwrap();
        assert_eq!(result.base_salary, dec("800000"));
        assert_eq!(result.audit_step.output["multiplier"], "1");
    }

    #[test]
    fn test_top_rating_adds_5_percent() {
        let result = apply_performance_adjustment(dec("800000"), 5, 3).unwrap();
        assert_eq!(result.base_salary, dec("840000"));
    }

    #[test]
    fn test_bottom_rating_removes_5_percent() {
        let result = apply_performance_adjustment(dec("800000"), 1, 3).unwrap();
        assert_eq!(result.base_salary, dec("760000"));
    }

    #[test]
    fn test_audit_step_records_rating() {
        let result = apply_performance_adjustment(dec("800000"), 4, 3).unwrap();

        assert_eq!(result.audit_step.rule_id, "performance_adjustment");
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.input["perf_rating"], 4);
        assert_eq!(
            result.audit_step.reasoning,
            "Rating 4: $800000 x 1.025 = $820000"
        );
    }
}
