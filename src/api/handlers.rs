//! HTTP request handlers for the Payroll Formula Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::formula::{build_formula, parse};

use super::request::{
    BuildFormulaRequest, ComputeSalaryRequest, CreateCategoryRequest, DeleteParams,
    EvaluateRequest, RecordPayrollRequest,
};
use super::response::{ApiError, ApiErrorResponse, EvaluateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/formulas/build", post(build_formula_handler))
        .route("/formulas/evaluate", post(evaluate_handler))
        .route(
            "/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route("/categories/:id", delete(delete_category_handler))
        .route("/payrolls/compute", post(compute_salary_handler))
        .route(
            "/payrolls",
            get(list_payrolls_handler).post(record_payroll_handler),
        )
        .route("/payrolls/:id", delete(delete_payroll_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    ApiErrorResponse::from(error).into_response()
}

/// Unwraps a JSON body or turns the rejection into a 400 response.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

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
                ApiError::validation_error(body_text)
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
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Unwraps query parameters or turns the rejection into a 400 response.
fn parse_query<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, Response> {
    match query {
        Ok(Query(params)) => Ok(params),
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Query string error"
            );
            Err(json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(body_text),
            ))
        }
    }
}

/// Handler for POST /formulas/build.
async fn build_formula_handler(
    payload: Result<Json<BuildFormulaRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match build_formula(
        &request.base_salary.to_text(),
        &request.percentage.to_text(),
        &request.deductions.to_text(),
    ) {
        Ok(built) => json_response(StatusCode::OK, built),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /formulas/evaluate.
async fn evaluate_handler(payload: Result<Json<EvaluateRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let evaluated = parse(&request.formula).and_then(|formula| {
        let result = formula.evaluate(request.base_salary)?;
        Ok(EvaluateResponse {
            formula: formula.to_string(),
            result,
        })
    });
    match evaluated {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /categories.
async fn list_categories_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.formulas().list().await {
        Ok(categories) => json_response(StatusCode::OK, categories),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /categories.
async fn create_category_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state
        .formulas()
        .save(&request.category_name, &request.formula)
        .await
    {
        Ok(category) => {
            info!(
                correlation_id = %correlation_id,
                category_id = %category.id,
                "Category created"
            );
            json_response(StatusCode::CREATED, category)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /categories/:id.
async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DeleteParams>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let params = match parse_query(correlation_id, query) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let formulas = state.formulas();
    let result = if params.strict {
        formulas.remove_strict(&id).await
    } else {
        formulas.remove(&id).await
    };
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payrolls/compute.
async fn compute_salary_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComputeSalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state
        .payroll()
        .compute_salary(&request.emp_no, &request.category_id)
        .await
    {
        Ok(calculation) => {
            info!(
                correlation_id = %correlation_id,
                emp_no = %calculation.emp_no,
                calculated_salary = calculation.calculated_salary,
                duration_us = calculation.duration_us,
                "Salary calculation completed successfully"
            );
            json_response(StatusCode::OK, calculation)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /payrolls.
async fn list_payrolls_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.payroll().list_payroll_summaries().await {
        Ok(summaries) => json_response(StatusCode::OK, summaries),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payrolls.
async fn record_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordPayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state
        .payroll()
        .record_payroll(&request.emp_no, &request.category_id, request.payroll_date)
        .await
    {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                payroll_id = %record.id,
                "Payroll record created"
            );
            json_response(StatusCode::CREATED, record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /payrolls/:id.
async fn delete_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DeleteParams>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let params = match parse_query(correlation_id, query) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let payroll = state.payroll();
    let result = if params.strict {
        payroll.delete_payroll_strict(&id).await
    } else {
        payroll.delete_payroll(&id).await
    };
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}
