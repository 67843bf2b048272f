//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::OrderError;
use order_store::StoreError;
use queries::QueryError;
use workflow::WorkflowError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Workflow execution error.
    Workflow(WorkflowError),
    /// Query execution error.
    Query(QueryError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Workflow(err) => workflow_error_to_response(err),
            ApiError::Query(err) => query_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn workflow_error_to_response(err: WorkflowError) -> (StatusCode, String) {
    match &err {
        WorkflowError::OrderNotFound(_)
        | WorkflowError::OrderNumberNotFound(_)
        | WorkflowError::UserNotFound(_)
        | WorkflowError::MenuItemNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        WorkflowError::Domain(order_err) => match order_err {
            OrderError::InvalidStateTransition { .. } => (StatusCode::CONFLICT, err.to_string()),
            OrderError::InvalidQuantity { .. }
            | OrderError::NoItems
            | OrderError::MissingField { .. }
            | OrderError::UnknownStatus { .. }
            | OrderError::UnknownOrderType { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
            OrderError::InvalidPrice { .. } => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        },
        WorkflowError::Store(StoreError::OrderNumberTaken(_))
        | WorkflowError::Store(StoreError::StatusConflict { .. }) => {
            (StatusCode::CONFLICT, err.to_string())
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

fn query_error_to_response(err: QueryError) -> (StatusCode, String) {
    match &err {
        QueryError::OrderNotFound(_) | QueryError::OrderNumberNotFound(_) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        QueryError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        ApiError::Workflow(err)
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Query(err)
    }
}
