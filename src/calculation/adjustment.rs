//! The salary adjustment engine.
//!
//! Runs tier selection, the promotion, performance and team size multipliers
//! and the final bounding in a fixed order, collecting an audit trail.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AdjustmentInput, AdjustmentResult, AuditStep, AuditTrace, AuditWarning};

use super::bounding::bound_recommendation;
use super::performance::apply_performance_adjustment;
use super::promotion::apply_promotion_uplift;
use super::team_size::apply_team_size_bump;
use super::tier_selection::select_base_salary;

/// Produces the bounded recommendation for one employee.
///
/// Steps, each recorded in the audit trace:
/// 1. tier selection (fresher vs experienced base salary)
/// 2. promotion uplift (x 1.15)
/// 3. performance adjustment (x `1 + (rating - 3) * 0.025`)
/// 4. team size bump (x 1.05 for teams above 5)
/// 5. bounding by department budget and market benchmark
///
/// The multipliers compound in that order. Inputs are not validated: negative
/// or zero amounts flow through the arithmetic unchanged.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when a multiplier or bound
/// pushes an amount out of `Decimal` range.
///
/// # Examples
///
/// ```
/// use salary_advisor::calculation::adjust_salary;
/// use salary_advisor::models::AdjustmentInput;
/// use rust_decimal::Decimal;
///
/// let input = AdjustmentInput {
///     dept_budget: Decimal::from(600_000),
///     market_ctc: Decimal::from(900_000),
///     previous_salary: Decimal::from(750_000),
///     experience: Decimal::from(5),
///     promotion: false,
///     current_ctc: Decimal::from(780_000),
///     perf_rating: 3,
///     team_size: 2,
/// };
///
/// let result = adjust_salary(Decimal::from(800_000), &input).unwrap();
/// assert_eq!(result.optimal, Decimal::from(800_000));
/// assert_eq!(result.low, Decimal::from(760_000));
/// assert_eq!(result.high, Decimal::from(880_000));
/// ```
pub fn adjust_salary(raw: Decimal, input: &AdjustmentInput) -> EngineResult<AdjustmentResult> {
    let start_time = Instant::now();
    let mut steps: Vec<AuditStep> = Vec::with_capacity(5);
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let tier = select_base_salary(raw, input, step_number);
    steps.push(tier.audit_step);
    step_number += 1;

    let promotion = apply_promotion_uplift(tier.base_salary, input.promotion, step_number)?;
    steps.push(promotion.audit_step);
    step_number += 1;

    let performance =
        apply_performance_adjustment(promotion.base_salary, input.perf_rating, step_number)?;
    steps.push(performance.audit_step);
    step_number += 1;

    let team = apply_team_size_bump(performance.base_salary, input.team_size, step_number)?;
    steps.push(team.audit_step);
    step_number += 1;

    let base_salary = team.base_salary;
    let bounds =
        bound_recommendation(base_salary, input.dept_budget, input.market_ctc, step_number)?;
    steps.push(bounds.audit_step);
    warnings.extend(bounds.warning);

    debug!(
        tier = ?tier.tier,
        raw = %raw.normalize(),
        base_salary = %base_salary.normalize(),
        optimal = %bounds.optimal.normalize(),
        "Salary adjusted"
    );

    Ok(AdjustmentResult {
        low: bounds.low,
        optimal: bounds.optimal,
        high: bounds.high,
        raw,
        base_salary,
        tier: tier.tier,
        dept_budget: input.dept_budget,
        market_ctc: input.market_ctc,
        previous_salary: input.previous_salary,
        experience: input.experience,
        promotion: input.promotion,
        current_ctc: input.current_ctc,
        perf_rating: input.perf_rating,
        team_size: input.team_size,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}
