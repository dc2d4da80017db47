//! Overflow-checked decimal arithmetic.
//!
//! `Decimal` operators panic once a result leaves roughly ±7.9e28. Uploaded
//! amounts are not range-checked, so the rules go through these helpers and
//! report [`EngineError::Overflow`] naming the rule instead.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

pub(crate) fn mul(a: Decimal, b: Decimal, rule_id: &str) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(rule_id, a, "x", b))
}

pub(crate) fn div(a: Decimal, b: Decimal, rule_id: &str) -> EngineResult<Decimal> {
    a.checked_div(b).ok_or_else(|| overflow(rule_id, a, "/", b))
}

pub(crate) fn add(a: Decimal, b: Decimal, rule_id: &str) -> EngineResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(rule_id, a, "+", b))
}

pub(crate) fn sub(a: Decimal, b: Decimal, rule_id: &str) -> EngineResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(rule_id, a, "-", b))
}

fn overflow(rule_id: &str, a: Decimal, op: &str, b: Decimal) -> EngineError {
    EngineError::Overflow {
        message: format!(
            "{}: {} {} {} is out of range",
            rule_id,
            a.normalize(),
            op,
            b.normalize()
        ),
    }
}
