//! Response construction.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// The response sent when the evaluator blocks a request.
pub fn blocked_response() -> Response {
    (StatusCode::FORBIDDEN, "Blocked").into_response()
}
