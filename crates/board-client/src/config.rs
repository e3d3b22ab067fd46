use std::time::Duration;

use reqwest::Url;

use crate::errors::ClientError;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://localhost:3000` or `https://host/api`.
    pub base_url: String,
    /// Per-request timeout (default: 10 seconds).
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        self.parsed_base_url()?;
        if self.timeout_ms == 0 {
            return Err(ClientError::Config("timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn parsed_base_url(&self) -> Result<Url, ClientError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|e| ClientError::Config(format!("base_url '{}': {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ClientError::Config(format!(
                    "base_url must be http or https, got '{other}'"
                )));
            }
        }
        if url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base_url '{}' cannot carry paths",
                self.base_url
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let cfg = ClientConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let cfg = ClientConfig::new("ftp://example.com");
        assert!(matches!(cfg.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(ClientConfig::new("not a url").validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = ClientConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
