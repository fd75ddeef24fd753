//! Agent Call Client
//!
//! One structured-output request to a backend, wrapped in a bounded retry
//! loop. Each attempt is timed out, sanitized, parsed and validated, and
//! yields a typed [`AttemptOutcome`]. When the budget runs out the caller
//! can take a schema-valid fallback instead of an error.

use crate::config::CallPolicy;
use crate::ports::agent_backend::{AgentBackend, AgentRequest, BackendError};
use imposter_domain::{ParseError, ResponseSchema, parse_response};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why an agent call did not produce an accepted response
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentCallError {
    #[error("Backend error: {0}")]
    Backend(BackendError),

    #[error("Attempt timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {error}")]
    InvalidResponse { raw: String, error: ParseError },

    #[error("Gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<AgentCallError>,
    },
}

impl AgentCallError {
    /// Short machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            AgentCallError::Backend(BackendError::UnknownModel(_)) => "unknown_model",
            AgentCallError::Backend(BackendError::Unauthorized(_)) => "unauthorized",
            AgentCallError::Backend(_) => "backend_error",
            AgentCallError::Timeout(_) => "timeout",
            AgentCallError::InvalidResponse { .. } => "invalid_response",
            AgentCallError::Exhausted { .. } => "retries_exhausted",
        }
    }
}

/// Result of a single attempt
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    Success(T),
    /// Worth another attempt if budget remains
    Retryable(AgentCallError),
    /// Stop immediately
    Fatal(AgentCallError),
}

/// A raw answer that failed to parse or validate
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidOutput {
    pub attempt: u32,
    pub raw: String,
    pub error: ParseError,
}

/// What a call produced
#[derive(Debug, Clone)]
pub struct AgentCallOutcome<T> {
    pub value: T,
    /// Attempts made, including the successful one
    pub attempts: u32,
    /// Outputs rejected along the way
    pub invalid_outputs: Vec<InvalidOutput>,
    /// `Some` when `value` is a fallback
    pub degraded: Option<AgentCallError>,
}

impl<T> AgentCallOutcome<T> {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Failure of a call made without fallback
#[derive(Error, Debug, Clone)]
#[error("{error}")]
pub struct AgentCallFailure {
    pub error: AgentCallError,
    pub attempts: u32,
    pub invalid_outputs: Vec<InvalidOutput>,
}

/// Use case for calling an agent with retry and fallback
pub struct CallAgentUseCase<B: AgentBackend + ?Sized> {
    backend: Arc<B>,
    policy: CallPolicy,
}

impl<B: AgentBackend + ?Sized> CallAgentUseCase<B> {
    pub fn new(backend: Arc<B>, policy: CallPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> &CallPolicy {
        &self.policy
    }

    /// Call until a response validates, a fatal error occurs, or attempts run out
    pub async fn execute<T: ResponseSchema>(
        &self,
        request: &AgentRequest,
    ) -> Result<AgentCallOutcome<T>, AgentCallFailure> {
        let max_attempts = self.policy.max_attempts();
        let mut invalid_outputs = Vec::new();
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                "Calling {} for {} (attempt {}/{})",
                request.model_id,
                T::NAME,
                attempt,
                max_attempts
            );

            let error = match self.attempt::<T>(request).await {
                AttemptOutcome::Success(value) => {
                    if attempt > 1 {
                        info!(
                            "{} answered {} on attempt {}",
                            request.model_id,
                            T::NAME,
                            attempt
                        );
                    }
                    return Ok(AgentCallOutcome {
                        value,
                        attempts: attempt,
                        invalid_outputs,
                        degraded: None,
                    });
                }
                AttemptOutcome::Fatal(error) => {
                    warn!(
                        "{} failed permanently on attempt {}: {}",
                        request.model_id, attempt, error
                    );
                    return Err(AgentCallFailure {
                        error,
                        attempts: attempt,
                        invalid_outputs,
                    });
                }
                AttemptOutcome::Retryable(error) => error,
            };

            warn!(
                "{} attempt {}/{} failed: {}",
                request.model_id, attempt, max_attempts, error
            );
            if let AgentCallError::InvalidResponse { raw, error } = &error {
                invalid_outputs.push(InvalidOutput {
                    attempt,
                    raw: raw.clone(),
                    error: error.clone(),
                });
            }

            if attempt >= max_attempts {
                return Err(AgentCallFailure {
                    error: AgentCallError::Exhausted {
                        attempts: attempt,
                        last: Box::new(error),
                    },
                    attempts: attempt,
                    invalid_outputs,
                });
            }

            let delay = self.policy.backoff(attempt);
            if !delay.is_zero() {
                debug!("Retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Like [`execute`](Self::execute), but substitutes `T::fallback` on failure
    pub async fn execute_or_fallback<T: ResponseSchema>(
        &self,
        request: &AgentRequest,
    ) -> AgentCallOutcome<T> {
        match self.execute::<T>(request).await {
            Ok(outcome) => outcome,
            Err(failure) => {
                warn!(
                    "Using fallback {} for {}: {}",
                    T::NAME,
                    request.model_id,
                    failure.error
                );
                AgentCallOutcome {
                    value: T::fallback(failure.error.reason()),
                    attempts: failure.attempts,
                    invalid_outputs: failure.invalid_outputs,
                    degraded: Some(failure.error),
                }
            }
        }
    }

    async fn attempt<T: ResponseSchema>(&self, request: &AgentRequest) -> AttemptOutcome<T> {
        let timeout = self.policy.attempt_timeout;
        let raw = match tokio::time::timeout(timeout, self.backend.invoke(request)).await {
            Err(_) => return AttemptOutcome::Retryable(AgentCallError::Timeout(timeout)),
            Ok(Err(e)) if e.is_retryable() => {
                return AttemptOutcome::Retryable(AgentCallError::Backend(e));
            }
            Ok(Err(e)) => return AttemptOutcome::Fatal(AgentCallError::Backend(e)),
            Ok(Ok(raw)) => raw,
        };

        match parse_response::<T>(&raw) {
            Ok(value) => AttemptOutcome::Success(value),
            Err(error) => AttemptOutcome::Retryable(AgentCallError::InvalidResponse { raw, error }),
        }
    }
}
