//! Offline stand-in for a live salary-benchmark scraper.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::EngineResult;

use super::MarketEstimator;

const DEFAULT_URL_TEMPLATE: &str =
    "https://www.glassdoor.co.in/Salaries/{location}-{role}-salary-SRCH_IL.0,9_IM114_KO10,21.htm";

/// Logs the benchmark page it would query and reports "not found".
///
/// No network access is performed.
#[derive(Debug, Clone)]
pub struct OfflineMarketEstimator {
    url_template: String,
}

impl OfflineMarketEstimator {
    /// Creates an estimator with a custom URL template containing `{role}`
    /// and `{location}` placeholders.
    pub fn with_url_template(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
        }
    }

    /// Returns the benchmark page URL for a role in a location.
    pub fn benchmark_url(&self, job_role: &str, location: &str) -> String {
        self.url_template
            .replace("{role}", job_role)
            .replace("{location}", location)
    }
}

impl Default for OfflineMarketEstimator {
    fn default() -> Self {
        Self::with_url_template(DEFAULT_URL_TEMPLATE)
    }
}

impl MarketEstimator for OfflineMarketEstimator {
    fn try_lookup(&self, job_role: &str, location: &str) -> EngineResult<Option<Decimal>> {
        let url = self.benchmark_url(job_role, location);
        info!(job_role, location, url = %url, "Fetching market salary");
        Ok(None)
    }
}
