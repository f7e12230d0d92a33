// HTTP request handlers
pub mod assets;
pub mod user_selected_goals;

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::ApiError;
use crate::server::response;

/// Health check endpoint
pub async fn health_check() -> Response {
    response::health()
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    ApiError::not_found("Route not found").into_response()
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    response::failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Unwraps a query string, turning extractor rejections into 400 responses.
pub(crate) fn query_params(
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<HashMap<String, String>, ApiError> {
    query.map(|Query(params)| params).map_err(|rejection| {
        ApiError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
    })
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })
}
