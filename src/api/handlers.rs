//! HTTP request handlers for the Salary Advisor API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::ingest::RawTable;

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/recommendations", post(recommendations_handler))
        .with_state(state)
}

/// Handler for POST /recommendations.
///
/// Accepts an employee table as CSV text and returns the batch report.
async fn recommendations_handler(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing recommendation request"
    );

    let advisor = state.advisor().clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let table = RawTable::from_csv_str(&body)?;
        advisor.run(&table)
    })
    .await;

    match outcome {
        Ok(Ok(report)) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %report.run_id,
                employees = report.recommendations.len(),
                dropped = report.dropped_rows.len(),
                duration_us = report.duration_us,
                "Recommendations completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Recommendation run failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
        Err(join_error) => {
            error!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Recommendation worker did not complete"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::internal(join_error.to_string())),
            )
                .into_response()
        }
    }
}
