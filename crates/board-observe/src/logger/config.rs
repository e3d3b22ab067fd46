use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat};

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `"info"` or `"board_core=debug,info"`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}

impl LoggerConfig {
    /// Build a config from `format` and `level` strings, typically read from the environment.
    ///
    /// Missing values fall back to the defaults.
    pub fn from_parts(format: Option<&str>, level: Option<&str>) -> Result<Self, LoggerError> {
        let mut cfg = Self::default();
        if let Some(format) = format {
            cfg.format = format.parse()?;
        }
        if let Some(level) = level {
            let level = level.trim();
            if level.is_empty() {
                return Err(LoggerError::InvalidLogLevel(level.to_string()));
            }
            cfg.level = level.to_string();
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_text_at_info() {
        let cfg = LoggerConfig::default();
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level, "info");
        assert!(cfg.with_targets);
    }

    #[test]
    fn from_parts_overrides_format_and_level() {
        let cfg = LoggerConfig::from_parts(Some("json"), Some("debug")).unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level, "debug");
    }

    #[test]
    fn from_parts_rejects_blank_level() {
        let err = LoggerConfig::from_parts(None, Some("  ")).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLogLevel(_)));
    }

    #[test]
    fn from_parts_rejects_unknown_format() {
        let err = LoggerConfig::from_parts(Some("yaml"), None).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidFormat(_)));
    }
}
