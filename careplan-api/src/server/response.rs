//! Response envelope shared by every endpoint.
//!
//! ```json
//! {"status": "success", "message": "...", "http_code": 200, "data": {"Biometrics": {...}}}
//! ```
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::error;

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: &'static str,
    pub message: String,
    pub http_code: u16,
    pub data: Value,
}

/// Builds a success response with `payload` wrapped under `key`.
pub fn success(
    status: StatusCode,
    message: impl Into<String>,
    key: &str,
    payload: impl Serialize,
) -> Response {
    let payload = match serde_json::to_value(payload) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Failed to serialize response payload");
            return failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let mut data = Map::new();
    data.insert(key.to_string(), payload);

    envelope(status, "success", message.into(), Value::Object(data))
}

/// Builds a failure response. `data` is always `null`.
pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    envelope(status, "failure", message.into(), Value::Null)
}

fn envelope(status: StatusCode, label: &'static str, message: String, data: Value) -> Response {
    let body = Envelope {
        status: label,
        message,
        http_code: status.as_u16(),
        data,
    };
    (status, Json(body)).into_response()
}

/// Body of `GET /health`.
pub fn health() -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Careplan API is running",
            "http_code": StatusCode::OK.as_u16(),
            "data": null
        })),
    )
        .into_response()
}
