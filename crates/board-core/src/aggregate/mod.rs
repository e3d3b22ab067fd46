//! Concurrent fan-out over fetch tasks with per-task outcomes.
//!
//! Every task is retried independently; a task that still fails after its attempt budget is recorded as
//! [`Outcome::Rejected`] and never fails the batch. The batch only returns an error when it could not run
//! at all (invalid policy, empty batch), when a spawned task could not be joined, or when it was cancelled.

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{CoreError, ErrorInfo},
    retry::{RetryPolicy, retry_with_cancel},
    task::FetchTask,
};

/// Final result of one task in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome<T> {
    Fulfilled { value: T },
    Rejected { error: ErrorInfo },
}

impl<T> Outcome<T> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Outcome::Fulfilled { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Fulfilled { value } => Some(value),
            Outcome::Rejected { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Outcome::Fulfilled { .. } => None,
            Outcome::Rejected { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, ErrorInfo> {
        match self {
            Outcome::Fulfilled { value } => Ok(value),
            Outcome::Rejected { error } => Err(error),
        }
    }
}

impl<T> From<Result<T, ErrorInfo>> for Outcome<T> {
    fn from(result: Result<T, ErrorInfo>) -> Self {
        match result {
            Ok(value) => Outcome::Fulfilled { value },
            Err(error) => Outcome::Rejected { error },
        }
    }
}

/// Overall status of a batch, derived from its failure count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregateStatus {
    AllOk,
    Partial,
    AllFailed,
}

impl AggregateStatus {
    fn derive(failed: usize, total: usize) -> Self {
        if failed == 0 {
            AggregateStatus::AllOk
        } else if failed == total {
            AggregateStatus::AllFailed
        } else {
            AggregateStatus::Partial
        }
    }
}

/// Order-preserving record of every task's final outcome.
///
/// `outcomes[i]` belongs to `tasks[i]` regardless of completion order. The status is computed once at
/// construction and the value is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult<T> {
    outcomes: Vec<Outcome<T>>,
    failed_count: usize,
    status: AggregateStatus,
}

impl<T> AggregateResult<T> {
    /// Build from outcomes in task order. Callers guarantee `outcomes` is non-empty.
    pub(crate) fn new(outcomes: Vec<Outcome<T>>) -> Self {
        let failed_count = outcomes.iter().filter(|o| o.is_rejected()).count();
        let status = AggregateStatus::derive(failed_count, outcomes.len());
        Self {
            outcomes,
            failed_count,
            status,
        }
    }

    pub fn outcomes(&self) -> &[Outcome<T>] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<Outcome<T>> {
        self.outcomes
    }

    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn status(&self) -> AggregateStatus {
        self.status
    }

    /// Fulfilled values in task order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.outcomes.iter().filter_map(Outcome::value)
    }

    /// Failures with their task position.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &ErrorInfo)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.error().map(|e| (i, e)))
    }
}

/// Run every task concurrently under `policy` and wait for all of them to settle.
///
/// Never short-circuits: one task's failure (or backoff) does not delay or cancel the others.
pub async fn aggregate<T>(
    tasks: Vec<FetchTask<T>>,
    policy: RetryPolicy,
) -> Result<AggregateResult<T>, CoreError>
where
    T: Send + 'static,
{
    aggregate_with_cancel(tasks, policy, &CancellationToken::new()).await
}

/// Like [`aggregate`], but stops every task and returns [`CoreError::Cancelled`] once `cancel` fires.
///
/// Partial results gathered before cancellation are discarded.
#[instrument(level = "debug", skip_all, fields(tasks = tasks.len(), max_attempts = policy.max_attempts))]
pub async fn aggregate_with_cancel<T>(
    tasks: Vec<FetchTask<T>>,
    policy: RetryPolicy,
    cancel: &CancellationToken,
) -> Result<AggregateResult<T>, CoreError>
where
    T: Send + 'static,
{
    policy.validate()?;
    if tasks.is_empty() {
        return Err(CoreError::EmptyBatch);
    }

    let total = tasks.len();
    let batch = cancel.child_token();
    let mut set = JoinSet::new();
    for (index, task) in tasks.into_iter().enumerate() {
        let token = batch.clone();
        set.spawn(async move {
            let result = retry_with_cancel(&task, &policy, &token).await;
            (index, Outcome::from(result))
        });
    }
    debug!("batch launched");

    let mut slots: Vec<Option<Outcome<T>>> = (0..total).map(|_| None).collect();
    loop {
        let joined = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                batch.cancel();
                set.abort_all();
                warn!("aggregation cancelled before all tasks settled");
                return Err(CoreError::Cancelled);
            }
            joined = set.join_next() => joined,
        };

        match joined {
            None => break,
            Some(Ok((index, outcome))) => slots[index] = Some(outcome),
            Some(Err(e)) => {
                batch.cancel();
                set.abort_all();
                return Err(CoreError::Join(e.to_string()));
            }
        }
    }

    let outcomes = slots
        .into_iter()
        .map(|slot| slot.ok_or_else(|| CoreError::Join("task finished without an outcome".into())))
        .collect::<Result<Vec<_>, _>>()?;

    let result = AggregateResult::new(outcomes);
    match result.status() {
        AggregateStatus::AllOk => debug!("all tasks fulfilled"),
        AggregateStatus::Partial => info!(
            failed = result.failed_count(),
            total, "batch settled with partial failure"
        ),
        AggregateStatus::AllFailed => warn!(total, "every task in the batch failed"),
    }
    Ok(result)
}
