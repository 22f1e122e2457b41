//! Response types for the payroll assistant API.
//!
//! This module defines the success payloads, the error response
//! structures, and the error mapping for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AssistError;
use crate::models::{ExecutionPlan, IntentValidation, ParsedIntent, PayrollMapping};

/// Response body for the `/automap` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoMapResponse {
    /// The financial year the created mappings belong to.
    pub financial_year: String,
    /// Number of mappings created in this run.
    pub created: u32,
    /// Number of items left unmapped (no confident match, or persistence
    /// failure).
    pub skipped: u32,
    /// The mappings created during this run, in creation order.
    pub mappings: Vec<PayrollMapping>,
}

/// Response body for the `/interpret` endpoint.
///
/// An unintelligible command is not an HTTP error: the response carries
/// `validation.valid == false` with the reasons, and no plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretResponse {
    /// The structured intent extracted from the command text.
    pub intent: ParsedIntent,
    /// Whether the intent is complete enough to act on, and why not.
    pub validation: IntentValidation,
    /// The prepared plan, present only when validation passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<ExecutionPlan>,
}

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

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<AssistError> for ApiErrorResponse {
    fn from(error: AssistError) -> Self {
        match error {
            AssistError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            AssistError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            AssistError::AmbiguousCommand { reasons } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("AMBIGUOUS_COMMAND", reasons.join("; ")),
            },
            AssistError::MappingPersistence {
                payroll_item_id,
                message,
            } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "MAPPING_PERSISTENCE",
                    format!("Failed to persist mapping for payroll item {}", payroll_item_id),
                    message,
                ),
            },
            AssistError::SessionBusy => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("SESSION_BUSY", "A plan is already executing"),
            },
            AssistError::NoActivePlan => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("NO_ACTIVE_PLAN", "No execution plan has been prepared"),
            },
            AssistError::ExecutionFailed { step_id, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "EXECUTION_FAILED",
                    format!("Execution failed at step '{}'", step_id),
                    message,
                ),
            },
        }
    }
}
