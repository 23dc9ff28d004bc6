//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Propagate the incoming ID when a trusted front already set one
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// UUID v4 request ids for tower-http's request-id layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}
