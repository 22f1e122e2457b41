//! HTTP request handlers for the payroll assistant API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::matching::{AutoMapper, InMemoryMappingStore};

use super::request::{AutoMapRequest, InterpretRequest};
use super::response::{ApiError, AutoMapResponse, InterpretResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/automap", post(automap_handler))
        .route("/interpret", post(interpret_handler))
        .with_state(state)
}

/// Handler for the POST /automap endpoint.
///
/// Accepts the payroll item and ledger pools for one financial year and
/// returns the mappings the matcher created.
async fn automap_handler(
    State(_state): State<AppState>,
    payload: Result<Json<AutoMapRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing automap request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if request.financial_year.trim().is_empty() {
        warn!(correlation_id = %correlation_id, "Empty financial year");
        return error_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error("financial_year must not be empty"),
        );
    }

    let mut store = InMemoryMappingStore::new();
    let outcome = AutoMapper::new(&request.financial_year).auto_map(
        &request.items,
        &request.ledgers,
        &request.existing_mappings,
        &mut store,
    );

    info!(
        correlation_id = %correlation_id,
        items = request.items.len(),
        created = outcome.created,
        skipped = outcome.skipped,
        "Automap completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(AutoMapResponse {
            financial_year: request.financial_year,
            created: outcome.created,
            skipped: outcome.skipped,
            mappings: outcome.mappings,
        }),
    )
        .into_response()
}

/// Handler for the POST /interpret endpoint.
///
/// Parses a free-text command into an intent and, when the intent is
/// complete enough to act on, a prepared execution plan. An unintelligible
/// command is a 200 with `validation.valid == false`, not an HTTP error:
/// the caller shows the reasons and asks the user to rephrase.
async fn interpret_handler(
    State(state): State<AppState>,
    payload: Result<Json<InterpretRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing interpret request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let intent = state.parser().parse(&request.text);
    let validation = state.parser().validate(&intent);

    let plan = if validation.valid {
        Some(state.planner().create_plan(&intent))
    } else {
        warn!(
            correlation_id = %correlation_id,
            reasons = ?validation.reasons,
            "Command not actionable"
        );
        None
    };

    info!(
        correlation_id = %correlation_id,
        module = intent.module.as_deref().unwrap_or("-"),
        action = intent.action.as_deref().unwrap_or("-"),
        confidence = intent.confidence,
        planned = plan.is_some(),
        "Interpret completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(InterpretResponse {
            intent,
            validation,
            plan,
        }),
    )
        .into_response()
}

/// Maps a JSON extraction rejection to a 400 error response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> axum::response::Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(StatusCode::BAD_REQUEST, error)
}

fn error_response(status: StatusCode, error: ApiError) -> axum::response::Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
