//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Body could not be decoded
    BadRequest(String),
    Dashboard(DashboardError),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Dashboard(err) => {
                let status = if err.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                let code = match &err {
                    DashboardError::InvalidRequest { .. } => "INVALID_REQUEST",
                    DashboardError::Parse { .. } => "PARSE_ERROR",
                    DashboardError::Source { .. } => "SOURCE_ERROR",
                    DashboardError::Configuration { .. } => "CONFIGURATION_ERROR",
                };
                let body = match &err {
                    DashboardError::Parse { message, context }
                    | DashboardError::Source { message, context }
                    | DashboardError::Configuration { message, context }
                    | DashboardError::InvalidRequest { message, context } => {
                        let body = ApiError::new(code, message.clone());
                        match context.details.as_ref().or(context.target.as_ref()) {
                            Some(details) => body.with_details(details.clone()),
                            None => body,
                        }
                    }
                };
                (status, body)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(code = %error.code, "{}", error.message);
        }
        (status, Json(error)).into_response()
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        AppError::Dashboard(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorContext;

    #[test]
    fn test_invalid_request_is_bad_request() {
        let err = AppError::from(DashboardError::invalid_request("Unknown filter `foo`"));
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_REQUEST");
        assert_eq!(body.message, "Unknown filter `foo`");
    }

    #[test]
    fn test_source_error_is_internal() {
        let err = AppError::from(DashboardError::source_with_context(
            "Failed to read events file",
            ErrorContext::new("fetch_events").with_target("/data/events.json"),
        ));
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "SOURCE_ERROR");
        assert_eq!(body.details.as_deref(), Some("/data/events.json"));
    }
}
