//! Team size bump.
//!
//! Employees managing more than five people receive a flat 5% bump. The bump
//! does not scale with team size.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::AuditStep;

use super::arithmetic;

/// Teams larger than this receive the bump.
pub const LARGE_TEAM_THRESHOLD: u32 = 5;

/// Returns the team size multiplier, 1.05 (5% bump).
pub fn team_size_multiplier() -> Decimal {
    Decimal::new(105, 2)
}

/// The result of applying the team size bump.
#[derive(Debug, Clone)]
pub struct TeamSizeResult {
    /// The base salary after the bump (unchanged for small teams).
    pub base_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the large-team bump to a base salary.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] if the bumped salary is
/// out of `Decimal` range.
///
/// # Examples
///
/// ```
/// use salary_advisor::calculation::apply_team_size_bump;
/// use rust_decimal::Decimal;
///
/// let result = apply_team_size_bump(Decimal::from(800_000), 6, 4).unwrap();
/// assert_eq!(result.base_salary, Decimal::from(840_000));
/// ```
pub fn apply_team_size_bump(
    base_salary: Decimal,
    team_size: u32,
    step_number: u32,
) -> EngineResult<TeamSizeResult> {
    if team_size > LARGE_TEAM_THRESHOLD {
        let multiplier = team_size_multiplier();
        let bumped = arithmetic::mul(base_salary, multiplier, "team_size_bump")?;

        let audit_step = AuditStep {
            step_number,
            rule_id: "team_size_bump".to_string(),
            rule_name: "Team Size Bump".to_string(),
            input: serde_json::json!({
                "base_salary": base_salary.normalize().to_string(),
                "team_size": team_size
            }),
            output: serde_json::json!({
                "base_salary": bumped.normalize().to_string(),
                "bump_applied": true,
                "multiplier": multiplier.normalize().to_string()
            }),
            reasoning: format!(
                "Team of {} (> {}): ${} x {} = ${}",
                team_size,
                LARGE_TEAM_THRESHOLD,
                base_salary.normalize(),
                multiplier.normalize(),
                bumped.normalize()
            ),
        };

        return Ok(TeamSizeResult {
            base_salary: bumped,
            audit_step,
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "team_size_bump".to_string(),
        rule_name: "Team Size Bump".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "team_size": team_size
        }),
        output: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "bump_applied": false
        }),
        reasoning: format!(
            "No team size bump - team of {} is not larger than {}",
            team_size, LARGE_TEAM_THRESHOLD
        ),
    };

    Ok(TeamSizeResult {
        base_salary,
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
    fn test_team_of_five_gets_no_bump() {
        let result = apply_team_size_bump(dec("800000"), 5, 4).unwrap();
        assert_eq!(result.base_salary, dec("800000"));
        assert_eq!(result.audit_step.output["bump_applied"], false);
    }

    #[test]
    fn test_team_of_six_gets_5_percent() {
        let result = apply_team_size_bump(dec("800000"), 6, 4).unwrap();
        assert_eq!(result.base_salary, dec("840000"));
        assert_eq!(result.audit_step.output["bump_applied"], true);
    }

    #[test]
    fn test_bump_does_not_scale_with_size() {
        let six = apply_team_size_bump(dec("800000"), 6, 4).unwrap();
        let fifty = apply_team_size_bump(dec("800000"), 50, 4).unwrap();
        assert_eq!(six.base_salary, fifty.base_salary);
    }

    #[test]
    fn test_zero_team_gets_no_bump() {
        let result = apply_team_size_bump(dec("800000"), 0, 4).unwrap();
        assert_eq!(result.base_salary, dec("800000"));
    }

    #[test]
    fn test_audit_reasoning_explains_bump() {
        let result = apply_team_size_bump(dec("800000"), 8, 4).unwrap();
        assert_eq!(
            result.audit_step.reasoning,
            "Team of 8 (> 5): $800000 x 1.05 = $840000"
        );
        assert_eq!(result.audit_step.input["team_size"], 8);
    }
}
