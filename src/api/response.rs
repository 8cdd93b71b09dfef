//! Response types for the Payroll Formula Engine API.
//!
//! This module defines the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes. Every error kind gets its own code
//! so clients can show a specific message.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Successful evaluation of a formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    /// The formula in canonical form.
    pub formula: String,
    /// The evaluated result.
    pub result: f64,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::Validation { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("Correct the '{}' field and resubmit", field),
                ),
            ),
            EngineError::Syntax { position, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "FORMULA_SYNTAX_ERROR",
                    message,
                    format!(
                        "Formulas may only use numbers, base_salary, + - * / and parentheses (error at position {})",
                        position
                    ),
                ),
            ),
            EngineError::DivisionByZero => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "DIVISION_BY_ZERO",
                    message,
                    "The formula divides by zero for this base salary",
                ),
            ),
            EngineError::NotFound { entity, key } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "NOT_FOUND",
                    message,
                    format!("No {} exists with key '{}'", entity, key),
                ),
            ),
            EngineError::Persistence { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::with_details(
                    "PERSISTENCE_ERROR",
                    "The document store could not complete the request",
                    message,
                ),
            ),
            EngineError::Timeout { .. } => (
                StatusCode::GATEWAY_TIMEOUT,
                ApiError::with_details(
                    "STORE_TIMEOUT",
                    "The document store did not respond in time",
                    message,
                ),
            ),
            EngineError::CalculationError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(error: EngineError) -> (StatusCode, String) {
        let response: ApiErrorResponse = error.into();
        (response.status, response.error.code)
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_engine_errors_map_to_distinct_codes() {
        assert_eq!(
            mapped(EngineError::validation("percentage", "bad")),
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR".to_string())
        );
        assert_eq!(
            mapped(EngineError::Syntax {
                position: 3,
                message: "bad".to_string()
            }),
            (StatusCode::BAD_REQUEST, "FORMULA_SYNTAX_ERROR".to_string())
        );
        assert_eq!(
            mapped(EngineError::DivisionByZero),
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DIVISION_BY_ZERO".to_string()
            )
        );
        assert_eq!(
            mapped(EngineError::not_found("employee", "E1")),
            (StatusCode::NOT_FOUND, "NOT_FOUND".to_string())
        );
        assert_eq!(
            mapped(EngineError::Persistence {
                message: "down".to_string()
            }),
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "PERSISTENCE_ERROR".to_string()
            )
        );
        assert_eq!(
            mapped(EngineError::Timeout {
                operation: "get".to_string(),
                collection: "payrolls".to_string(),
                timeout_ms: 5
            }),
            (StatusCode::GATEWAY_TIMEOUT, "STORE_TIMEOUT".to_string())
        );
    }

    #[test]
    fn test_not_found_message_names_the_key() {
        let response: ApiErrorResponse = EngineError::not_found("employee", "E404").into();
        assert_eq!(response.error.message, "employee not found: E404");
    }
}
