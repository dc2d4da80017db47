//! Recommendation bounding.
//!
//! Turns the adjusted base salary into a low / optimal / high triple bounded
//! by the department budget and the market benchmark.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning};

use super::arithmetic;

/// Warning code raised when the low bound exceeds the high bound.
pub const INVERTED_BOUNDS_WARNING: &str = "INVERTED_BOUNDS";

/// Returns the low-end factor, 0.95.
pub fn low_factor() -> Decimal {
    Decimal::new(95, 2)
}

/// Returns the high-end factor, 1.10.
pub fn high_factor() -> Decimal {
    Decimal::new(110, 2)
}

/// The result of bounding a base salary.
#[derive(Debug, Clone)]
pub struct BoundingResult {
    /// `max(dept_budget, base * 0.95)`.
    pub low: Decimal,
    /// `base` clamped into `[dept_budget, market_ctc]`, budget first.
    pub optimal: Decimal,
    /// `min(market_ctc, base * 1.10)`.
    pub high: Decimal,
    /// Raised when `low > high`.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Bounds an adjusted base salary.
///
/// The low bound has a floor but no ceiling and the high bound has a ceiling
/// but no floor, so a department budget above the market benchmark (or above
/// `base * 1.10`) yields `low > high`. Those values are returned as computed,
/// never reordered, and an [`INVERTED_BOUNDS_WARNING`] is attached.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] if `base * 0.95` or
/// `base * 1.10` is out of `Decimal` range.
///
/// # Examples
///
/// ```
/// use salary_advisor::calculation::bound_recommendation;
/// use rust_decimal::Decimal;
///
/// let result = bound_recommendation(
///     Decimal::from(800_000),
///     Decimal::from(600_000),
///     Decimal::from(900_000),
///     5,
/// ).unwrap();
/// assert_eq!(result.low, Decimal::from(760_000));
/// assert_eq!(result.optimal, Decimal::from(800_000));
/// assert_eq!(result.high, Decimal::from(880_000));
/// assert!(result.warning.is_none());
/// ```
pub fn bound_recommendation(
    base_salary: Decimal,
    dept_budget: Decimal,
    market_ctc: Decimal,
    step_number: u32,
) -> EngineResult<BoundingResult> {
    let low = dept_budget.max(arithmetic::mul(base_salary, low_factor(), "bounding")?);
    let high = market_ctc.min(arithmetic::mul(base_salary, high_factor(), "bounding")?);
    let optimal = base_salary.max(dept_budget).min(market_ctc);

    let warning = if low > high {
        warn!(
            low = %low.normalize(),
            high = %high.normalize(),
            dept_budget = %dept_budget.normalize(),
            market_ctc = %market_ctc.normalize(),
            "Recommendation bounds are inverted"
        );
        Some(AuditWarning {
            code: INVERTED_BOUNDS_WARNING.to_string(),
            message: format!(
                "Low range ${} exceeds high range ${} (department budget ${}, market ${})",
                low.normalize(),
                high.normalize(),
                dept_budget.normalize(),
                market_ctc.normalize()
            ),
            severity: "medium".to_string(),
        })
    } else {
        None
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "bounding".to_string(),
        rule_name: "Budget and Market Bounding".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "dept_budget": dept_budget.normalize().to_string(),
            "market_ctc": market_ctc.normalize().to_string()
        }),
        output: serde_json::json!({
            "low": low.normalize().to_string(),
            "optimal": optimal.normalize().to_string(),
            "high": high.normalize().to_string(),
            "inverted": warning.is_some()
        }),
        reasoning: format!(
            "low = max(${}, ${} x {}) = ${}; high = min(${}, ${} x {}) = ${}; optimal = clamp(${}, ${}, ${}) = ${}",
            dept_budget.normalize(),
            base_salary.normalize(),
            low_factor().normalize(),
            low.normalize(),
            market_ctc.normalize(),
            base_salary.normalize(),
            high_factor().normalize(),
            high.normalize(),
            base_salary.normalize(),
            dept_budget.normalize(),
            market_ctc.normalize(),
            optimal.normalize()
        ),
    };

    Ok(BoundingResult {
        low,
        optimal,
        high,
        warning,
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
    fn test_base_inside_interval() {
        let result = bound_recommendation(dec("800000"), dec("600000"), dec("900000"), 5).unwrap();

        assert_eq!(result.low, dec("760000"));
        assert_eq!(result.optimal, dec("800000"));
        assert_eq!(result.high, dec("880000"));
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_base_above_market_caps_optimal_and_high() {
        let result = bound_recommendation(dec("920000"), dec("600000"), dec("900000"), 5).unwrap();

        assert_eq!(result.low, dec("874000"));
        assert_eq!(result.optimal, dec("900000"));
        assert_eq!(result.high, dec("900000"));
    }

    #[test]
    fn test_base_below_budget_floors_optimal_and_low() {
        let result = bound_recommendation(dec("500000"), dec("600000"), dec("900000"), 5).unwrap();

        assert_eq!(result.low, dec("600000"));
        assert_eq!(result.optimal, dec("600000"));
        assert_eq!(result.high, dec("550000"));
        assert!(result.warning.is_some());
    }

    #[test]
    fn test_inverted_interval_is_reproduced_literally() {
        let base = dec("1000000");
        let result = bound_recommendation(base, dec("900000"), dec("400000"), 5).unwrap();

        assert_eq!(result.low, dec("950000"));
        assert_eq!(result.high, dec("400000"));
        assert_eq!(result.optimal, dec("400000"));
        assert!(result.low > result.high);

        let warning = result.warning.expect("inverted bounds are flagged");
        assert_eq!(warning.code, INVERTED_BOUNDS_WARNING);
        assert!(warning.message.contains("$950000"));
        assert_eq!(result.audit_step.output["inverted"], true);
    }

    #[test]
    fn test_zero_market_forces_zero_optimal() {
        let result = bound_recommendation(dec("800000"), dec("0"), dec("0"), 5).unwrap();
        assert_eq!(result.optimal, dec("0"));
        assert_eq!(result.high, dec("0"));
        assert_eq!(result.low, dec("760000"));
        assert!(result.warning.is_some());
    }

    #[test]
    fn test_audit_step_records_all_three_values() {
        let result = bound_recommendation(dec("800000"), dec("600000"), dec("900000"), 5).unwrap();

        assert_eq!(result.audit_step.rule_id, "bounding");
        assert_eq!(result.audit_step.output["low"], "760000");
        assert_eq!(result.audit_step.output["optimal"], "800000");
        assert_eq!(result.audit_step.output["high"], "880000");
        assert_eq!(result.audit_step.output["inverted"], false);
    }
}
