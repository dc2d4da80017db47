//! Salary parity analysis.
//!
//! Scores how far a recommendation sits from both the market benchmark and
//! the department budget. Over- and under-payment are penalized equally.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{ParityMethod, ParityResult};

use super::arithmetic;

/// Scores below this value are flagged as biased.
pub fn bias_threshold() -> Decimal {
    Decimal::new(9, 1)
}

/// The score used when the market benchmark or the budget is zero.
pub fn neutral_score() -> Decimal {
    Decimal::new(5, 1)
}

/// Computes the parity score and bias flag for a recommendation.
///
/// With both `market_ctc` and `dept_budget` non-zero:
/// `score = 1 - (|p - market| / market + |p - budget| / budget) / 2`,
/// rounded to two decimal places. Otherwise the neutral score 0.5 is used.
/// The score is not clamped; large deviations drive it below zero. The bias
/// flag compares the rounded score, so `0.895` rounds to `0.9` and is not
/// flagged.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] if a deviation is out of
/// `Decimal` range, e.g. a budget of `1e-25` against a six-figure salary.
///
/// # Examples
///
/// ```
/// use salary_advisor::calculation::analyze_parity;
/// use rust_decimal::Decimal;
///
/// let parity = analyze_parity(
///     Decimal::from(800_000),
///     Decimal::from(900_000),
///     Decimal::from(600_000),
/// ).unwrap();
/// assert_eq!(parity.score, Decimal::new(78, 2));
/// assert!(parity.bias_detected);
/// ```
pub fn analyze_parity(
    recommended: Decimal,
    market_ctc: Decimal,
    dept_budget: Decimal,
) -> EngineResult<ParityResult> {
    let (score, method) = if market_ctc.is_zero() || dept_budget.is_zero() {
        (neutral_score(), ParityMethod::InsufficientData)
    } else {
        let market_gap = arithmetic::div(
            arithmetic::sub(recommended, market_ctc, "parity")?.abs(),
            market_ctc,
            "parity",
        )?;
        let budget_gap = arithmetic::div(
            arithmetic::sub(recommended, dept_budget, "parity")?.abs(),
            dept_budget,
            "parity",
        )?;
        let mean_gap = arithmetic::add(market_gap, budget_gap, "parity")? / Decimal::TWO;
        let score = arithmetic::sub(Decimal::ONE, mean_gap, "parity")?;
        (score.round_dp(2), ParityMethod::SymmetricDeviation)
    };

    Ok(ParityResult {
        score,
        bias_detected: score < bias_threshold(),
        method,
    })
}
