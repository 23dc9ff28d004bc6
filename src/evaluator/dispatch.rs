//! Bounded-wait evaluation dispatch.
//!
//! # Responsibilities
//! - Start the evaluator call as its own task
//! - Race the call against the configured deadline
//! - Cancel the call on deadline and fail open immediately
//! - Decode the raw payload into a `Verdict` at this boundary
//!
//! # Design Decisions
//! - The select is biased toward the deadline: a result that arrives in
//!   the same poll as the deadline signal counts as late, so the request
//!   path never blocks past budget
//! - A zero deadline disables the race and waits for the evaluator
//! - No retries at this layer

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::evaluator::args::EvaluationArgs;
use crate::evaluator::client::Evaluator;
use crate::evaluator::verdict::{IndeterminateReason, Verdict};
use crate::observability::metrics;

/// Payload value that denotes a blocking rule match.
const BLOCKED_RESULT: &str = "Blocked";

/// Dispatches evaluation requests under a latency budget.
pub struct EvaluationDispatcher {
    evaluator: Arc<dyn Evaluator>,
    deadline: Duration,
}

impl EvaluationDispatcher {
    pub fn new(evaluator: Arc<dyn Evaluator>, deadline: Duration) -> Self {
        Self {
            evaluator,
            deadline,
        }
    }

    /// Evaluate one request and decode the outcome.
    ///
    /// Never returns an error: every internal failure degrades to a
    /// verdict that allows the request.
    pub async fn dispatch(&self, args: EvaluationArgs) -> Verdict {
        let started = Instant::now();
        let verdict = self.race_evaluator(args).await;
        metrics::record_evaluation(verdict.label(), started);
        verdict
    }

    async fn race_evaluator(&self, args: EvaluationArgs) -> Verdict {
        let args = Arc::new(args);
        let cancel = CancellationToken::new();

        let evaluator = Arc::clone(&self.evaluator);
        let task_args = Arc::clone(&args);
        let task_cancel = cancel.clone();
        let mut call = tokio::spawn(async move {
            evaluator.evaluate(&task_args, task_cancel).await
        });

        let joined = if self.deadline.is_zero() {
            (&mut call).await
        } else {
            let deadline = tokio::time::sleep(self.deadline);
            tokio::pin!(deadline);

            tokio::select! {
                biased;
                _ = &mut deadline => {
                    cancel.cancel();
                    tracing::info!(
                        client_addr = %args.client_addr,
                        deadline_ms = self.deadline.as_millis() as u64,
                        "Evaluation timed out, request passed without rules check"
                    );
                    return Verdict::Indeterminate(IndeterminateReason::Timeout);
                }
                joined = &mut call => joined,
            }
        };

        match joined {
            Ok(Ok(Value::String(result))) if result == BLOCKED_RESULT => {
                tracing::info!(
                    client_addr = %args.client_addr,
                    method = %args.method,
                    host = %args.host,
                    path = %args.path,
                    "Request blocked"
                );
                Verdict::Blocked
            }
            Ok(Ok(Value::String(_))) => Verdict::Passed,
            Ok(Ok(payload)) => {
                tracing::warn!(
                    payload = %payload,
                    "Evaluator returned a non-string result, request passed without rules check"
                );
                Verdict::Indeterminate(IndeterminateReason::UnexpectedShape)
            }
            Ok(Err(error)) => {
                tracing::warn!(
                    %error,
                    "Evaluator call failed, request passed without rules check"
                );
                Verdict::Indeterminate(IndeterminateReason::Transport)
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    "Evaluation task aborted, request passed without rules check"
                );
                Verdict::Indeterminate(IndeterminateReason::Transport)
            }
        }
    }
}
