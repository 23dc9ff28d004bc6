//! Firewall middleware.
//! Resolves the client address and enforces the evaluator's verdict.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use crate::evaluator::args::{unix_millis_now, EvaluationArgs};
use crate::http::response::blocked_response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::trust::resolver::{ip_decimal_string, resolve_client_addr};

/// Forwarding-chain header; each occurrence is one hop entry.
const X_FORWARDED_FOR: &str = "x-forwarded-for";

pub async fn firewall_middleware(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Passthrough mode when the firewall is disabled.
    if !state.firewall_enabled {
        return next.run(req).await;
    }

    // 2. Resolve the originating client address.
    let chain: Vec<String> = req
        .headers()
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_owned)
        .collect();
    let client_addr = resolve_client_addr(&chain, &peer.to_string(), &state.classifier);

    // 3. Build the evaluation arguments from request metadata.
    let user_agent = header_string(&req, header::USER_AGENT.as_str());
    let host = match req.headers().get(header::HOST) {
        Some(value) => value.to_str().unwrap_or_default().to_string(),
        None => req.uri().host().unwrap_or_default().to_string(),
    };
    let args = EvaluationArgs {
        client_addr_decimal: ip_decimal_string(&client_addr),
        unix_millis: unix_millis_now(),
        user_agent,
        path: req.uri().path().to_string(),
        query: req.uri().query().unwrap_or_default().to_string(),
        host,
        method: req.method().to_string(),
        client_addr,
    };

    // 4. Dispatch under the deadline; everything but Blocked proceeds.
    let verdict = state.dispatcher.dispatch(args).await;
    if verdict.allows_request() {
        next.run(req).await
    } else {
        metrics::record_blocked();
        blocked_response()
    }
}

fn header_string(req: &Request<Body>, name: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
