//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the firewall middleware in front
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Forward surviving requests to the configured upstream

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::uri::{Authority, PathAndQuery, Scheme},
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::schema::GatewallConfig;
use crate::evaluator::client::{Evaluator, HttpEvaluator};
use crate::evaluator::dispatch::EvaluationDispatcher;
use crate::http::middleware::firewall_middleware;
use crate::http::request::MakeRequestUuid;
use crate::trust::classifier::TrustClassifier;
use crate::trust::registry::SharedTrustRegistry;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<EvaluationDispatcher>,
    pub classifier: TrustClassifier,
    pub firewall_enabled: bool,
    pub client: Client<HttpConnector, Body>,
    pub upstream: String,
}

/// HTTP server for the firewall gateway.
pub struct HttpServer {
    router: Router,
    config: GatewallConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and the
    /// published trust registry handle.
    pub fn new(config: GatewallConfig, registry: SharedTrustRegistry) -> Self {
        let evaluator: Arc<dyn Evaluator> =
            Arc::new(HttpEvaluator::new(config.firewall.evaluator_url.clone()));
        Self::with_evaluator(config, registry, evaluator)
    }

    /// Same as `new`, with the evaluator seam open for callers that
    /// bring their own transport.
    pub fn with_evaluator(
        config: GatewallConfig,
        registry: SharedTrustRegistry,
        evaluator: Arc<dyn Evaluator>,
    ) -> Self {
        let dispatcher = Arc::new(EvaluationDispatcher::new(
            evaluator,
            Duration::from_millis(config.firewall.timeout_ms),
        ));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            dispatcher,
            classifier: TrustClassifier::new(registry),
            firewall_enabled: config.firewall.enabled,
            client,
            upstream: config.upstream.address.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewallConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state.clone())
            .layer(axum::middleware::from_fn_with_state(
                state,
                firewall_middleware,
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.upstream.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            firewall_enabled = self.config.firewall.enabled,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewallConfig {
        &self.config
    }
}

/// Forward a surviving request to the upstream.
async fn forward_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> impl IntoResponse {
    let (parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    match Authority::from_str(&state.upstream) {
        Ok(authority) => uri_parts.authority = Some(authority),
        Err(e) => {
            tracing::error!(upstream = %state.upstream, error = %e, "Invalid upstream authority");
            return (StatusCode::BAD_GATEWAY, "Invalid upstream address").into_response();
        }
    }
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    let uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(_) => parts.uri.clone(),
    };

    let mut builder = Request::builder()
        .method(parts.method.clone())
        .uri(uri)
        .version(parts.version);
    if let Some(headers) = builder.headers_mut() {
        for (k, v) in parts.headers.iter() {
            headers.insert(k.clone(), v.clone());
        }
    }
    let req = match builder.body(body) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build upstream request");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Request rebuild failed").into_response();
        }
    };

    match state.client.request(req).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Upstream request failed");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
