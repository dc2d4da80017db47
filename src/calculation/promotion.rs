//! Promotion uplift.
//!
//! A promoted employee receives a flat 15% uplift on the base salary,
//! regardless of tier.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::AuditStep;

use super::arithmetic;

/// Returns the promotion multiplier, 1.15 (15% uplift).
pub fn promotion_multiplier() -> Decimal {
    Decimal::new(115, 2)
}

/// The result of applying the promotion uplift.
#[derive(Debug, Clone)]
pub struct PromotionResult {
    /// The base salary after the uplift (unchanged if not promoted).
    pub base_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the promotion uplift to a base salary.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] if the uplifted salary is
/// out of `Decimal` range.
///
/// # Examples
///
/// ```
/// use salary_advisor::calculation::apply_promotion_uplift;
/// use rust_decimal::Decimal;
///
/// let result = apply_promotion_uplift(Decimal::from(800_000), true, 2).unwrap();
/// assert_eq!(result.base_salary, Decimal::from(920_000));
/// ```
pub fn apply_promotion_uplift(
    base_salary: Decimal,
    promoted: bool,
    step_number: u32,
) -> EngineResult<PromotionResult> {
    if promoted {
        let multiplier = promotion_multiplier();
        let uplifted = arithmetic::mul(base_salary, multiplier, "promotion_uplift")?;

        let audit_step = AuditStep {
            step_number,
            rule_id: "promotion_uplift".to_string(),
            rule_name: "Promotion Uplift".to_string(),
            input: serde_json::json!({
                "base_salary": base_salary.normalize().to_string(),
                "promotion": true
            }),
            output: serde_json::json!({
                "base_salary": uplifted.normalize().to_string(),
                "uplift_applied": true,
                "multiplier": multiplier.normalize().to_string()
            }),
            reasoning: format!(
                "${} x {} = ${}",
                base_salary.normalize(),
                multiplier.normalize(),
                uplifted.normalize()
            ),
        };

        Ok(PromotionResult {
            base_salary: uplifted,
            audit_step,
        })
    } else {
        let audit_step = AuditStep {
            step_number,
            rule_id: "promotion_uplift".to_string(),
            rule_name: "Promotion Uplift".to_string(),
            input: serde_json::json!({
                "base_salary": base_salary.normalize().to_string(),
                "promotion": false
            }),
            output: serde_json::json!({
                "base_salary": base_salary.normalize().to_string(),
                "uplift_applied": false
            }),
            reasoning: "No promotion uplift applied - employee is not being promoted".to_string(),
        };

        Ok(PromotionResult {
            base_salary,
            audit_step,
        })
    }
}
