//! Resilient fetching for the board dashboard.
//!
//! - [`retry`] runs one [`FetchTask`] with a bounded number of attempts and linear backoff.
//! - [`aggregate`] runs a batch of tasks concurrently and records every outcome, failures included, as data.

pub mod error;
pub use error::{CoreError, ErrorInfo, ErrorKind};

pub mod task;
pub use task::{BoxError, FetchTask};

pub mod retry;
pub use retry::{RetryPolicy, retry, retry_with_cancel};

pub mod aggregate;
pub use aggregate::{AggregateResult, AggregateStatus, Outcome, aggregate, aggregate_with_cancel};

pub use tokio_util::sync::CancellationToken;
