//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (verdict counters, evaluation latency)
//!
//! Consumers:
//!     → Log aggregation (stdout, env-filtered)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; the request ID flows through spans
//! - Metric updates are cheap (atomic increments) and never block the
//!   request path

pub mod logging;
pub mod metrics;
