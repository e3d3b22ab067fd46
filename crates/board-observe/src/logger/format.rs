use std::{fmt, str::FromStr};

use crate::logger::error::LoggerError;

const JOURNALD_ENABLED: bool = cfg!(all(target_os = "linux", feature = "journald"));

/// Output format of the global subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoggerFormat {
    /// Human-readable lines, colored on a terminal.
    #[default]
    Text,
    /// One JSON object per event, with the current span attached.
    Json,
    /// systemd journal; linux with the `journald` feature only.
    Journald,
}

impl LoggerFormat {
    pub const ALL: [LoggerFormat; 3] = [LoggerFormat::Text, LoggerFormat::Json, LoggerFormat::Journald];

    pub fn as_str(self) -> &'static str {
        match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            LoggerFormat::Journald => "journald",
        }
    }

    /// Whether this build can install the format.
    pub fn is_available(self) -> bool {
        self != LoggerFormat::Journald || JOURNALD_ENABLED
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    /// Accepts the names printed by `Display` in any case; `journal` is an alias of `journald`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = if name.eq_ignore_ascii_case("journal") {
            "journald"
        } else {
            name
        };

        let format = LoggerFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| LoggerError::InvalidFormat(s.to_string()))?;

        if format.is_available() {
            Ok(format)
        } else {
            Err(LoggerError::JournaldNotSupported)
        }
    }
}
