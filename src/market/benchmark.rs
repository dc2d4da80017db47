//! Market benchmarks loaded from configuration.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::MarketBenchmark;
use crate::error::EngineResult;

use super::MarketEstimator;

const ANY_LOCATION: &str = "*";

/// A static table of market benchmarks by role and location.
///
/// Matching is case-insensitive and ignores surrounding whitespace. An exact
/// location match wins over a `*` entry for the same role.
///
/// # Examples
///
/// ```
/// use salary_advisor::config::MarketBenchmark;
/// use salary_advisor::market::{BenchmarkTable, MarketEstimator};
/// use rust_decimal::Decimal;
///
/// let table = BenchmarkTable::new(vec![MarketBenchmark {
///     job_role: "Data Scientist".to_string(),
///     location: "*".to_string(),
///     market_ctc: Decimal::from(1_500_000),
/// }]);
/// assert_eq!(table.lookup("data scientist", "Pune"), Some(Decimal::from(1_500_000)));
/// assert_eq!(table.lookup("Chef", "Pune"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BenchmarkTable {
    entries: Vec<MarketBenchmark>,
}

impl BenchmarkTable {
    /// Creates a table from benchmark entries.
    pub fn new(entries: Vec<MarketBenchmark>) -> Self {
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, job_role: &str, location: &str) -> Option<&MarketBenchmark> {
        let role_matches = |entry: &&MarketBenchmark| same(&entry.job_role, job_role);
        self.entries
            .iter()
            .filter(role_matches)
            .find(|entry| same(&entry.location, location))
            .or_else(|| {
                self.entries
                    .iter()
                    .filter(role_matches)
                    .find(|entry| entry.location.trim() == ANY_LOCATION)
            })
    }
}

impl MarketEstimator for BenchmarkTable {
    fn try_lookup(&self, job_role: &str, location: &str) -> EngineResult<Option<Decimal>> {
        let found = self.find(job_role, location).map(|entry| entry.market_ctc);
        debug!(job_role, location, found = found.is_some(), "Benchmark lookup");
        Ok(found)
    }
}

fn same(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    fn entry(role: &str, location: &str, amount: i64) -> MarketBenchmark {
        MarketBenchmark {
            job_role: role.to_string(),
            location: location.to_string(),
            market_ctc: Decimal::from(amount),
        }
    }

    fn create_test_table() -> BenchmarkTable {
        BenchmarkTable::new(vec![
            entry("Data Scientist", "*", 1_500_000),
            entry("Data Scientist", "Bengaluru", 1_800_000),
            entry("Software Engineer", "Pune", 1_200_000),
        ])
    }

    #[test]
    fn test_exact_location_wins_over_wildcard() {
        let table = create_test_table();
        assert_eq!(
            table.lookup("Data Scientist", "Bengaluru"),
            Some(Decimal::from(1_800_000))
        );
        assert_eq!(
            table.lookup("Data Scientist", "Chennai"),
            Some(Decimal::from(1_500_000))
        );
    }

    #[test]
    fn test_matching_ignores_case_and_padding() {
        let table = create_test_table();
        assert_eq!(
            table.lookup(" software engineer ", "PUNE"),
            Some(Decimal::from(1_200_000))
        );
    }

    #[test]
    fn test_unknown_role_or_location_is_not_found() {
        let table = create_test_table();
        assert_eq!(table.lookup("Software Engineer", "Delhi"), None);
        assert_eq!(table.lookup("Unknown", "Unknown"), None);
    }

    #[test]
    fn test_empty_table_finds_nothing() {
        let table = BenchmarkTable::default();
        assert!(table.is_empty());
        assert_eq!(table.try_lookup("Data Scientist", "Pune").unwrap(), None);
    }

    #[test]
    fn test_default_configuration_benchmarks() {
        let loader = ConfigLoader::load("./config/default").expect("Failed to load config");
        let table = BenchmarkTable::new(loader.config().benchmarks().to_vec());

        assert_eq!(table.len(), 5);
        assert_eq!(
            table.lookup("HR Executive", "Mumbai"),
            Some(Decimal::from(600_000))
        );
    }
}
