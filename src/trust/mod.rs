//! Trusted proxy classification subsystem.
//!
//! # Data Flow
//! ```text
//! config (comma-separated patterns, TRUSTED_PROXY_RANGES override)
//!     → registry.rs (compile patterns, publish immutable registry)
//!     → classifier.rs (patterns + builtin ranges + hostname markers)
//!     → resolver.rs (walk x-forwarded-for, pick the real client)
//! ```
//!
//! # Design Decisions
//! - The registry is immutable once built; a reload builds a fresh registry
//!   and publishes it atomically (arc-swap), never mutates in place
//! - "Trust" is inferred from topology and patterns, not authenticated;
//!   it is a heuristic, not a security boundary
//! - Candidates that are not IP addresses are still checked against the
//!   hostname and unix-socket markers, never rejected with an error

pub mod classifier;
pub mod ranges;
pub mod registry;
pub mod resolver;

pub use classifier::TrustClassifier;
pub use registry::{SharedTrustRegistry, TrustRegistry};
pub use resolver::{ip_decimal_string, resolve_client_addr};
