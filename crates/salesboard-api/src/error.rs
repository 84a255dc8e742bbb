//! Error types for salesboard-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use salesboard_core::{CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger};
use thiserror::Error;

/// Body returned for every failed request
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{} failed: {}", .context.operation, .source)]
    Core {
        context: ErrorContext,
        #[source]
        source: CoreError,
    },
}

impl ApiError {
    pub fn core(operation: &str, source: CoreError) -> Self {
        Self::Core {
            context: ErrorContext::new(operation),
            source,
        }
    }

    /// Attach a request detail to the server-side log line
    pub fn with_data(self, key: &str, value: serde_json::Value) -> Self {
        match self {
            ApiError::Core { context, source } => ApiError::Core {
                context: context.with_data(key, value),
                source,
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Core { context, source } => {
                DefaultErrorLogger.log_error(source, context);
            }
        }

        let body = serde_json::json!({ "error": INTERNAL_ERROR_BODY });
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_maps_to_500() {
        let error = ApiError::core(
            "combined_view",
            CoreError::UpstreamCallError {
                operation: "initialize".to_string(),
                message: "offline".to_string(),
            },
        );
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().starts_with("combined_view failed"));

        let error = error.with_data("month", serde_json::json!(4));
        match &error {
            ApiError::Core { context, .. } => {
                assert_eq!(context.operation, "combined_view");
                assert_eq!(context.data["month"], 4);
            }
        }

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
