mod config;
mod error;
mod format;
mod log;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;

/// Output format variable read by [`logger_init_from_env`] (`text`, `json`, `journald`).
pub const ENV_LOG_FORMAT: &str = "BOARD_LOG_FORMAT";
/// `EnvFilter` directive variable read by [`logger_init_from_env`].
pub const ENV_LOG_LEVEL: &str = "BOARD_LOG_LEVEL";

/// Install the global subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInitialized`] on a second call.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    log::install(cfg)
}

/// Build the config from [`ENV_LOG_FORMAT`] and [`ENV_LOG_LEVEL`] and install it.
///
/// Unset variables keep the defaults. Returns the config that was applied.
pub fn logger_init_from_env() -> Result<LoggerConfig, LoggerError> {
    let format = std::env::var(ENV_LOG_FORMAT).ok();
    let level = std::env::var(ENV_LOG_LEVEL).ok();

    let cfg = LoggerConfig::from_parts(format.as_deref(), level.as_deref())?;
    logger_init(&cfg)?;
    tracing::debug!(format = %cfg.format, level = %cfg.level, "logger installed from environment");
    Ok(cfg)
}
