//! JSON response helpers shared by the handlers.
//!
//! Successful responses carry the payload as-is; failures are always a
//! `{"error": "<message>"}` object.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// 200 response with `data` serialized as JSON.
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Error response with the given status and a client-safe message.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}
