//! Base salary tier selection.
//!
//! Freshers are anchored to the lower of department budget and market
//! benchmark; experienced employees never drop below what they earn or
//! previously earned.

use rust_decimal::Decimal;

use crate::models::{AdjustmentInput, AuditStep, SalaryTier};

/// Employees with at most this many years of experience are freshers.
pub fn fresher_experience_limit() -> Decimal {
    Decimal::ONE
}

/// The result of tier selection, including the base salary and audit step.
#[derive(Debug, Clone)]
pub struct TierSelectionResult {
    /// The tier the employee falls into.
    pub tier: SalaryTier,
    /// The base salary before any multiplier.
    pub base_salary: Decimal,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Selects the base salary from the model output and the employee's tier.
///
/// - Fresher (`experience <= 1`): `min(dept_budget, market_ctc)`; `raw` is ignored.
/// - Experienced: `max(raw, previous_salary, current_ctc)`.
///
/// # Examples
///
/// ```
/// use salary_advisor::calculation::select_base_salary;
/// use salary_advisor::models::{AdjustmentInput, SalaryTier};
/// use rust_decimal::Decimal;
///
/// let input = AdjustmentInput {
///     dept_budget: Decimal::from(500_000),
///     market_ctc: Decimal::from(600_000),
///     previous_salary: Decimal::ZERO,
///     experience: Decimal::ONE,
///     promotion: false,
///     current_ctc: Decimal::ZERO,
///     perf_rating: 3,
///     team_size: 1,
/// };
///
/// let result = select_base_salary(Decimal::from(700_000), &input, 1);
/// assert_eq!(result.tier, SalaryTier::Fresher);
/// assert_eq!(result.base_salary, Decimal::from(500_000));
/// ```
pub fn select_base_salary(
    raw: Decimal,
    input: &AdjustmentInput,
    step_number: u32,
) -> TierSelectionResult {
    if input.experience <= fresher_experience_limit() {
        let base_salary = input.dept_budget.min(input.market_ctc);
        let audit_step = AuditStep {
            step_number,
            rule_id: "tier_selection".to_string(),
            rule_name: "Tier Selection".to_string(),
            input: serde_json::json!({
                "raw": raw.normalize().to_string(),
                "experience": input.experience.normalize().to_string(),
                "dept_budget": input.dept_budget.normalize().to_string(),
                "market_ctc": input.market_ctc.normalize().to_string()
            }),
            output: serde_json::json!({
                "tier": "fresher",
                "base_salary": base_salary.normalize().to_string()
            }),
            reasoning: format!(
                "Fresher ({} years <= {}): min(budget ${}, market ${}) = ${}; model output ignored",
                input.experience.normalize(),
                fresher_experience_limit(),
                input.dept_budget.normalize(),
                input.market_ctc.normalize(),
                base_salary.normalize()
            ),
        };

        return TierSelectionResult {
            tier: SalaryTier::Fresher,
            base_salary,
            audit_step,
        };
    }

    let base_salary = raw.max(input.previous_salary).max(input.current_ctc);
    let audit_step = AuditStep {
        step_number,
        rule_id: "tier_selection".to_string(),
        rule_name: "Tier Selection".to_string(),
        input: serde_json::json!({
            "raw": raw.normalize().to_string(),
            "experience": input.experience.normalize().to_string(),
            "previous_salary": input.previous_salary.normalize().to_string(),
            "current_ctc": input.current_ctc.normalize().to_string()
        }),
        output: serde_json::json!({
            "tier": "experienced",
            "base_salary": base_salary.normalize().to_string()
        }),
        reasoning: format!(
            "Experienced ({} years): max(model ${}, previous ${}, current ${}) = ${}",
            input.experience.normalize(),
            raw.normalize(),
            input.previous_salary.normalize(),
            input.current_ctc.normalize(),
            base_salary.normalize()
        ),
    };

    TierSelectionResult {
        tier: SalaryTier::Experienced,
        base_salary,
        audit_step,
    }
}
