// src/api/retry.rs
//! Retry with exponential backoff for API operations.
//!
//! Every remote call goes through [`RetryExecutor::execute`]. Failures are
//! classified by [`AppError::is_retryable`]: transient ones are retried after
//! `min(base × 2^attempt, max)`, everything else is returned untouched on the
//! spot.

use crate::constants::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_RETRIES};
use crate::error::AppError;
use crate::types::ValidationError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Builds a policy from millisecond values, rejecting a base above the cap.
    pub fn from_millis(
        max_retries: u32,
        base_delay_ms: u64,
        max_delay_ms: u64,
    ) -> Result<Self, ValidationError> {
        if base_delay_ms > max_delay_ms {
            return Err(ValidationError::InvalidRetryPolicy(format!(
                "base delay {}ms exceeds max delay {}ms",
                base_delay_ms, max_delay_ms
            )));
        }

        Ok(Self {
            max_retries,
            base_delay: Duration::from_millis(base_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
        })
    }

    /// Total attempts a call may consume, the first one included.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Backoff before retrying after the zero-indexed `attempt` failed.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let delay = Duration::from_millis(base_ms.saturating_mul(factor));
        delay.min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

/// Suspends the current task between attempts.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Waits on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Runs one remote call under a [`RetryPolicy`].
#[derive(Clone)]
pub struct RetryExecutor {
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("policy", &self.policy)
            .finish()
    }
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { policy, sleeper }
    }

    /// Runs `operation` until it succeeds, fails fatally, or attempts run out.
    ///
    /// `label` names the call in diagnostics and in the error returned once
    /// every attempt has failed.
    pub async fn execute<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0u32;

        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !error.is_retryable() {
                log::debug!("{} failed with a non-retryable error: {}", label, error);
                return Err(error);
            }

            let attempts_made = attempt + 1;
            if attempts_made >= max_attempts {
                log::error!("{} failed after {} attempt(s): {}", label, attempts_made, error);
                return Err(AppError::RetriesExhausted {
                    label: label.to_string(),
                    attempts: attempts_made,
                    source: Box::new(error),
                });
            }

            let delay = self.policy.delay_for_attempt(attempt);
            log::warn!(
                "{} retry {}/{} in {}ms ({})",
                label,
                attempts_made,
                self.policy.max_retries,
                delay.as_millis(),
                error
            );
            self.sleeper.sleep(delay).await;
            attempt = attempts_made;
        }
    }
}
