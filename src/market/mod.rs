//! Market compensation lookup.
//!
//! A [`MarketEstimator`] is injected into the pipeline so the lookup source
//! can be swapped without touching the adjustment logic. Lookups never fail
//! from the caller's point of view: any error degrades to "not found" and the
//! employee's own Market CTC is used instead.

mod benchmark;
mod offline;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::EngineResult;
use crate::models::EmployeeRecord;

pub use benchmark::BenchmarkTable;
pub use offline::OfflineMarketEstimator;

/// A source of market compensation benchmarks.
pub trait MarketEstimator: Send + Sync {
    /// Looks up the market cost to company for a role in a location.
    ///
    /// Returns `Ok(None)` when the source has no figure.
    fn try_lookup(&self, job_role: &str, location: &str) -> EngineResult<Option<Decimal>>;

    /// Looks up a benchmark, logging and swallowing any error.
    fn lookup(&self, job_role: &str, location: &str) -> Option<Decimal> {
        match self.try_lookup(job_role, location) {
            Ok(value) => value,
            Err(e) => {
                error!(job_role, location, error = %e, "Market lookup failed");
                None
            }
        }
    }
}

/// Where a resolved market figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSource {
    /// The estimator returned a figure.
    Estimator,
    /// The employee's own Market CTC column.
    Record,
}

/// The market figure used for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketLookup {
    /// The market cost to company to use.
    pub market_ctc: Decimal,
    /// Where it came from.
    pub source: MarketSource,
    /// User-facing notice, present only for successful lookups.
    pub notice: Option<String>,
}

/// Resolves the market figure for an employee, falling back silently to the
/// record's own Market CTC.
///
/// # Examples
///
/// ```
/// use salary_advisor::market::{OfflineMarketEstimator, MarketSource, resolve_market_ctc};
/// use salary_advisor::models::EmployeeRecord;
/// use rust_decimal::Decimal;
///
/// let record = EmployeeRecord {
///     id: 1,
///     name: "Asha".to_string(),
///     experience: Decimal::from(4),
///     previous_salary: Decimal::from(750_000),
///     current_ctc: Decimal::from(780_000),
///     department_budget: Decimal::from(600_000),
///     market_ctc: Decimal::from(900_000),
///     performance_rating: 3,
///     team_size: 2,
///     promotion: false,
///     age: Decimal::from(31),
///     attributes: vec![],
/// };
///
/// let lookup = resolve_market_ctc(&OfflineMarketEstimator::default(), &record);
/// assert_eq!(lookup.market_ctc, Decimal::from(900_000));
/// assert_eq!(lookup.source, MarketSource::Record);
/// assert!(lookup.notice.is_none());
/// ```
pub fn resolve_market_ctc(estimator: &dyn MarketEstimator, record: &EmployeeRecord) -> MarketLookup {
    match estimator.lookup(record.job_role(), record.location()) {
        Some(market_ctc) => MarketLookup {
            market_ctc,
            source: MarketSource::Estimator,
            notice: Some(format!(
                "{}: Market data fetched successfully ({})",
                record.name,
                market_ctc.normalize()
            )),
        },
        None => MarketLookup {
            market_ctc: record.market_ctc,
            source: MarketSource::Record,
            notice: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::Attribute;

    struct FailingEstimator;

    impl MarketEstimator for FailingEstimator {
        fn try_lookup(&self, job_role: &str, location: &str) -> EngineResult<Option<Decimal>> {
            Err(EngineError::MarketLookupFailed {
                role: job_role.to_string(),
                location: location.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    struct FixedEstimator(Decimal);

    impl MarketEstimator for FixedEstimator {
        fn try_lookup(&self, _job_role: &str, _location: &str) -> EngineResult<Option<Decimal>> {
            Ok(Some(self.0))
        }
    }

    fn create_test_record() -> EmployeeRecord {
        EmployeeRecord {
            id: 4,
            name: "Meera".to_string(),
            experience: Decimal::from(6),
            previous_salary: Decimal::from(900_000),
            current_ctc: Decimal::from(950_000),
            department_budget: Decimal::from(800_000),
            market_ctc: Decimal::from(1_000_000),
            performance_rating: 4,
            team_size: 3,
            promotion: false,
            age: Decimal::from(34),
            attributes: vec![Attribute {
                column: "Job Role".to_string(),
                value: "Data Scientist".to_string(),
            }],
        }
    }

    #[test]
    fn test_errors_degrade_to_not_found() {
        assert_eq!(FailingEstimator.lookup("Data Scientist", "Pune"), None);
    }

    #[test]
    fn test_failed_lookup_falls_back_without_notice() {
        let lookup = resolve_market_ctc(&FailingEstimator, &create_test_record());

        assert_eq!(lookup.market_ctc, Decimal::from(1_000_000));
        assert_eq!(lookup.source, MarketSource::Record);
        assert_eq!(lookup.notice, None);
    }

    #[test]
    fn test_successful_lookup_produces_notice() {
        let estimator = FixedEstimator(Decimal::from(1_500_000));
        let lookup = resolve_market_ctc(&estimator, &create_test_record());

        assert_eq!(lookup.market_ctc, Decimal::from(1_500_000));
        assert_eq!(lookup.source, MarketSource::Estimator);
        assert_eq!(
            lookup.notice.as_deref(),
            Some("Meera: Market data fetched successfully (1500000)")
        );
    }
}
