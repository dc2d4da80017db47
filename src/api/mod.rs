//! HTTP API module for the Salary Advisor.
//!
//! This module provides the REST endpoint that turns an uploaded employee
//! table into salary recommendations.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
