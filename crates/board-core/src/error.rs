use std::any::Any;
use std::error::Error as StdError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Failure of an aggregation call itself, as opposed to failures of the tasks it ran.
///
/// Tasks that fail after exhausting their attempts are reported as [`crate::Outcome::Rejected`], never through this type.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid retry policy: {0}")]
    InvalidPolicy(String),

    #[error("aggregation needs at least one task")]
    EmptyBatch,

    #[error("task could not be driven to completion: {0}")]
    Join(String),

    #[error("aggregation cancelled")]
    Cancelled,
}

/// Coarse category of a task failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The task returned an error.
    Failed,
    /// The task failed without a usable error (panic, empty message).
    Unknown,
    /// The task was stopped by a cancellation token.
    Cancelled,
}

/// Normalized description of a task failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    /// Messages of the error's `source()` chain, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::unknown();
        }
        Self {
            kind: ErrorKind::Failed,
            message,
            causes: Vec::new(),
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: ErrorKind::Unknown,
            message: UNKNOWN_ERROR.to_string(),
            causes: Vec::new(),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            kind: ErrorKind::Cancelled,
            message: "cancelled".to_string(),
            causes: Vec::new(),
        }
    }

    /// Capture `err` and its source chain.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut info = Self::new(err.to_string());
        let mut source = err.source();
        while let Some(cause) = source {
            info.causes.push(cause.to_string());
            source = cause.source();
        }
        info
    }

    /// Wrap a panic payload; the payload text, if any, is kept as a cause.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let mut info = Self::unknown();
        let text = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned());
        if let Some(text) = text {
            info.causes.push(format!("panicked: {text}"));
        }
        info
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ErrorKind::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("request failed")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn from_error_keeps_source_chain() {
        let err = Outer(std::io::Error::other("connection reset"));
        let info = ErrorInfo::from_error(&err);
        assert_eq!(info.kind, ErrorKind::Failed);
        assert_eq!(info.message, "request failed");
        assert_eq!(info.causes, vec!["connection reset".to_string()]);
    }

    #[test]
    fn empty_message_becomes_unknown() {
        let info = ErrorInfo::new("  ");
        assert_eq!(info.kind, ErrorKind::Unknown);
        assert_eq!(info.message, "Unknown error");
    }

    #[test]
    fn panic_payload_is_wrapped() {
        let info = ErrorInfo::from_panic(Box::new("boom"));
        assert_eq!(info.message, "Unknown error");
        assert_eq!(info.causes, vec!["panicked: boom".to_string()]);

        let info = ErrorInfo::from_panic(Box::new(7_u8));
        assert_eq!(info.kind, ErrorKind::Unknown);
        assert!(info.causes.is_empty());
    }

    #[test]
    fn display_is_the_message() {
        assert_eq!(ErrorInfo::new("timeout").to_string(), "timeout");
    }

    #[test]
    fn serializes_without_empty_causes() {
        let json = serde_json::to_string(&ErrorInfo::new("x")).unwrap();
        assert_eq!(json, r#"{"kind":"failed","message":"x"}"#);
    }
}
