use thiserror::Error;

/// Failures while installing the global `tracing` subscriber.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log format '{0}' (expected: text|json|journald)")]
    InvalidFormat(String),
    #[error("journald output requires linux and the `journald` feature")]
    JournaldNotSupported,
    #[error("global logger already installed")]
    AlreadyInitialized,
    #[error("logger setup failed: {0}")]
    InitializationFailed(String),
    #[error("invalid log level directive '{0}'")]
    InvalidLogLevel(String),
}
