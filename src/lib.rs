//! Gatewall — a web application firewall gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                 FIREWALL GATEWAY                  │
//!                    │                                                   │
//!   Client Request   │  ┌─────────┐   ┌────────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│   trust    │──▶│  evaluator  │──┼──▶ Evaluator
//!                    │  │ server  │   │ resolver   │   │  dispatch   │  │    Service
//!                    │  └─────────┘   └────────────┘   └──────┬──────┘  │
//!                    │                                        │         │
//!                    │                              blocked? ─┤         │
//!                    │                                        ▼         │
//!   403 Blocked      │                                 ┌───────────┐    │
//!   ◀────────────────┼─────────────────────────────────│ response  │    │
//!                    │                                 └───────────┘    │
//!   Client Response  │                                 ┌───────────┐    │
//!   ◀────────────────┼─────────────────────────────────│  forward  │◀───┼──── Upstream
//!                    │                                 └───────────┘    │
//!                    │                                                   │
//!                    │  ┌─────────────────────────────────────────────┐ │
//!                    │  │            Cross-Cutting Concerns            │ │
//!                    │  │   config · trust registry · observability    │ │
//!                    │  └─────────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! The request path never waits on the evaluator past the configured
//! budget, and every internal failure degrades to allowing the request.

pub mod config;
pub mod evaluator;
pub mod http;
pub mod observability;
pub mod trust;

pub use config::schema::GatewallConfig;
pub use evaluator::{EvaluationDispatcher, Verdict};
pub use http::middleware::firewall_middleware;
pub use http::HttpServer;
pub use trust::{TrustClassifier, TrustRegistry};
