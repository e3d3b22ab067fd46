use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::{
    error::{CoreError, ErrorInfo},
    task::FetchTask,
};

/// Attempt budget and backoff for a single task.
///
/// Retry `n` (counted from 1) waits `backoff_base_ms * n`: with the defaults that is 1s, then 2s.
/// Growth is linear, not exponential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    /// Total invocations allowed, including the first one. Must be at least 1.
    pub max_attempts: u32,
    /// Backoff unit in milliseconds.
    pub backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base_ms: 1_000,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base_ms: u64) -> Result<Self, CoreError> {
        let policy = Self {
            max_attempts,
            backoff_base_ms,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Single attempt, no backoff.
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            backoff_base_ms: 0,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_attempts == 0 {
            return Err(CoreError::InvalidPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Delay in milliseconds before retry number `retry` (1 for the first retry).
    pub fn delay_ms_for(&self, retry: u32) -> u64 {
        self.backoff_base_ms.saturating_mul(u64::from(retry))
    }

    pub fn delay_for(&self, retry: u32) -> Duration {
        Duration::from_millis(self.delay_ms_for(retry))
    }
}

/// Run `task` until it succeeds or `policy.max_attempts` invocations have failed.
///
/// Returns the first success immediately, or the error of the last attempt.
/// There is no delay after the final attempt. A policy with `max_attempts == 0` is treated as a single attempt.
pub async fn retry<T>(task: &FetchTask<T>, policy: &RetryPolicy) -> Result<T, ErrorInfo>
where
    T: Send + 'static,
{
    run(task, policy, None).await
}

/// Like [`retry`], but gives up as soon as `cancel` fires.
///
/// Cancellation interrupts both an in-flight attempt and a backoff sleep and yields [`ErrorInfo::cancelled`].
pub async fn retry_with_cancel<T>(
    task: &FetchTask<T>,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<T, ErrorInfo>
where
    T: Send + 'static,
{
    run(task, policy, Some(cancel)).await
}

async fn run<T>(
    task: &FetchTask<T>,
    policy: &RetryPolicy,
    cancel: Option<&CancellationToken>,
) -> Result<T, ErrorInfo>
where
    T: Send + 'static,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        trace!(task = task.id(), attempt, "task is starting");

        let result = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ErrorInfo::cancelled()),
                r = task.invoke() => r,
            },
            None => task.invoke().await,
        };

        let err = match result {
            Ok(value) => {
                if attempt > 1 {
                    debug!(task = task.id(), attempt, "task succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if attempt >= max_attempts {
            warn!(
                task = task.id(),
                attempt,
                reason = %err,
                "task exhausted retry policy (no further attempts)"
            );
            return Err(err);
        }

        let delay_ms = policy.delay_ms_for(attempt);
        let delay = Duration::from_millis(delay_ms);
        debug!(
            task = task.id(),
            attempt,
            delay_ms,
            reason = %err,
            "retry scheduled after failure",
        );

        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ErrorInfo::cancelled()),
                _ = tokio::time::sleep(delay) => {}
            },
            None => tokio::time::sleep(delay).await,
        }
    }
}
