//! Application state for the Salary Advisor API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::AdvisorConfig;
use crate::market::MarketEstimator;
use crate::pipeline::SalaryAdvisor;

/// Shared application state.
///
/// Holds the advisor, whose configuration and market source are immutable
/// and shared across requests. Each request runs its own pipeline.
#[derive(Clone)]
pub struct AppState {
    advisor: SalaryAdvisor,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: AdvisorConfig, estimator: Arc<dyn MarketEstimator>) -> Self {
        Self {
            advisor: SalaryAdvisor::new(Arc::new(config), estimator),
        }
    }

    /// Returns the advisor.
    pub fn advisor(&self) -> &SalaryAdvisor {
        &self.advisor
    }
}
