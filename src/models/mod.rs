//! Core data models for the salary advisor.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod employee;
mod recommendation;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::{Attribute, EmployeeRecord};
pub use recommendation::{
    AdjustmentInput, AdjustmentResult, BatchReport, EmployeeRecommendation, ParityMethod,
    ParityResult, SalaryTier,
};
