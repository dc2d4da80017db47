//! Configuration loading and management for the salary advisor.
//!
//! This module provides the explicit column schema handed to the normalizer,
//! model and report settings, and the market benchmark table, all loadable
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salary_advisor::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Benchmarks: {}", config.benchmarks().len());
//! ```

pub mod columns;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AdvisorConfig, BenchmarksConfig, ColumnDefault, ColumnKind, ColumnSchema, ColumnSpec,
    MarketBenchmark, ModelSettings, ReportSettings, Settings,
};
