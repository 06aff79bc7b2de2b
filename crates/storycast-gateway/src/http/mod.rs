pub mod accounts;
pub mod health;
pub mod logs;
pub mod panel;
pub mod scheduler;
pub mod stop;

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use storycast_core::StorycastError;

/// Uniform JSON error shape for every panel endpoint.
pub(crate) fn error_response(
    status: StatusCode,
    err: &StorycastError,
) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "error": err.to_string(), "code": err.code() })),
    )
}
