//! External rule evaluation subsystem.
//!
//! # Data Flow
//! ```text
//! resolved client address + request metadata
//!     → args.rs (ordered 8-field tuple, JSON array wire form)
//!     → dispatch.rs (spawn evaluator call, race against the deadline)
//!     → client.rs (transport to the evaluator, cancellation threaded in)
//!     → verdict.rs (Blocked / Passed / Indeterminate, decoded at the
//!       call boundary)
//! ```
//!
//! # Design Decisions
//! - Fail-open: timeout, transport failure, and unexpected payloads all
//!   allow the request; Blocked is the only enforcing outcome
//! - The deadline race is biased toward the deadline, so a result that
//!   ties with the budget still passes the request through
//! - On timeout the in-flight call is cancelled through its token, not
//!   abandoned, so the transport resources are reclaimed

pub mod args;
pub mod client;
pub mod dispatch;
pub mod verdict;

pub use args::EvaluationArgs;
pub use client::{Evaluator, EvaluatorError, HttpEvaluator};
pub use dispatch::EvaluationDispatcher;
pub use verdict::{IndeterminateReason, Verdict};
