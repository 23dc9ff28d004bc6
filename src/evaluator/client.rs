//! Evaluator transport.
//!
//! # Responsibilities
//! - Define the evaluator call seam used by the dispatcher
//! - Ship the argument tuple to the remote evaluator over HTTP
//! - Honor cancellation inside the call, not just around it
//!
//! # Design Decisions
//! - The rule script behind the evaluator endpoint is an opaque black
//!   box; this layer only moves the tuple out and the payload back
//! - No retries here; retry policy belongs to the evaluator's own client
//!   stack if anywhere

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::evaluator::args::EvaluationArgs;

/// Errors surfaced by an evaluator call. All of them fail open.
#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error("evaluation cancelled before completion")]
    Cancelled,
    #[error("evaluator transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("evaluator protocol error: {0}")]
    Protocol(String),
}

/// The call seam between the dispatcher and the external evaluator.
///
/// Implementations must observe `cancel`: when it fires, the in-flight
/// work is dropped and `EvaluatorError::Cancelled` returned, so a timed
/// out request never leaks a hanging connection.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(
        &self,
        args: &EvaluationArgs,
        cancel: CancellationToken,
    ) -> Result<Value, EvaluatorError>;
}

/// HTTP evaluator: POSTs the argument array as JSON and decodes the
/// response body as a JSON value.
pub struct HttpEvaluator {
    client: reqwest::Client,
    url: String,
}

impl HttpEvaluator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    async fn evaluate(
        &self,
        args: &EvaluationArgs,
        cancel: CancellationToken,
    ) -> Result<Value, EvaluatorError> {
        let call = async {
            let response = self
                .client
                .post(&self.url)
                .json(&args.to_wire())
                .send()
                .await?
                .error_for_status()?;
            let payload = response.json::<Value>().await?;
            Ok(payload)
        };

        // Dropping the reqwest future aborts the request, which is the
        // actual resource reclamation on cancel.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(EvaluatorError::Cancelled),
            result = call => result,
        }
    }
}
