//! Store loading and the combined view

use super::QueryParams;
use crate::{ApiError, AppState};
use axum::extract::State;
use axum::Json;
use salesboard_core::{parse_month, CombinedResponse, InitializeResponse, INITIALIZED_MESSAGE};

/// Fetch the remote dataset and replace the store
pub async fn initialize_database(
    State(state): State<AppState>,
) -> Result<Json<InitializeResponse>, ApiError> {
    let count = state
        .dataset
        .initialize()
        .await
        .map_err(|e| {
            ApiError::core("initialize", e)
                .with_data("source", serde_json::json!(state.config.source.url))
        })?;
    log::debug!("initialize-database stored {} transactions", count);

    Ok(Json(InitializeResponse {
        message: INITIALIZED_MESSAGE.to_string(),
    }))
}

/// Reload, then answer every month query in one body
pub async fn combined_response(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<CombinedResponse>, ApiError> {
    let month = parse_month(query.get("month").map(String::as_str));
    log::debug!("combined-response month={:?}", month);

    let combined = state
        .dataset
        .combined_view(month)
        .await
        .map_err(|e| ApiError::core("combined_view", e).with_data("month", serde_json::json!(month)))?;
    Ok(Json(combined))
}
