//! Salary Advisor
//!
//! This crate turns an uploaded employee table into bounded salary
//! recommendations: it normalizes the table, resolves market benchmarks,
//! trains a regression forest, applies the adjustment rules and scores each
//! recommendation for parity against market and budget.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod market;
pub mod models;
pub mod pipeline;
pub mod prediction;
pub mod report;
