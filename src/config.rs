//! Client configuration.
//!
//! The only external setting is the base URL of the analysis service. It comes from
//! the `ANALYST_API_URL` environment variable or the command line; when it is absent,
//! every network operation fails with [`ConfigError::MissingBaseUrl`] before any I/O.

use crate::error::ConfigError;
use crate::session::ProgressPolicy;

/// Environment variable holding the analysis service base URL.
pub const API_URL_ENV: &str = "ANALYST_API_URL";

/// Path of the streaming upload endpoint, relative to the base URL.
pub const UPLOAD_PATH: &str = "/upload-and-analyze/progress";

/// Path of the health endpoint, relative to the base URL.
pub const HEALTH_PATH: &str = "/health";

/// Configuration for [`AnalysisClient`](crate::client::AnalysisClient) and the session
/// controller.
///
/// # Example
///
/// ```ignore
/// use analyst::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_base_url("http://localhost:2024")
///     .with_progress_policy(ProgressPolicy::strict());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:2024`
    pub base_url: Option<String>,
    /// Client-side progress validation (off by default)
    pub progress_policy: ProgressPolicy,
}

impl ClientConfig {
    /// Create an empty configuration (no base URL).
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the base URL from `ANALYST_API_URL`. Blank values count as absent.
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_ENV).ok();
        Self {
            base_url: base_url.as_deref().and_then(normalize_base_url),
            ..Self::default()
        }
    }

    /// Set the base URL. Blank values clear it.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(url.as_ref());
        self
    }

    pub fn with_progress_policy(mut self, policy: ProgressPolicy) -> Self {
        self.progress_policy = policy;
        self
    }

    /// The configured base URL, validated.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        let url = self.base_url.as_deref().ok_or(ConfigError::MissingBaseUrl)?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                url: url.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }
        Ok(url)
    }

    /// `POST` target for uploads.
    pub fn upload_url(&self) -> Result<String, ConfigError> {
        Ok(format!("{}{}", self.require_base_url()?, UPLOAD_PATH))
    }

    /// `GET` target for the health probe.
    pub fn health_url(&self) -> Result<String, ConfigError> {
        Ok(format!("{}{}", self.require_base_url()?, HEALTH_PATH))
    }
}

fn normalize_base_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_has_no_base_url() {
        let config = ClientConfig::new();
        assert_eq!(config.require_base_url(), Err(ConfigError::MissingBaseUrl));
        assert_eq!(config.upload_url(), Err(ConfigError::MissingBaseUrl));
        assert_eq!(config.progress_policy, ProgressPolicy::default());
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = ClientConfig::new().with_base_url("http://localhost:2024/");
        assert_eq!(
            config.upload_url().unwrap(),
            "http://localhost:2024/upload-and-analyze/progress"
        );
        assert_eq!(config.health_url().unwrap(), "http://localhost:2024/health");
    }

    #[test]
    fn test_blank_base_url_counts_as_missing() {
        let config = ClientConfig::new().with_base_url("   ");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_invalid_scheme_is_rejected() {
        let config = ClientConfig::new().with_base_url("localhost:2024");
        assert!(matches!(
            config.require_base_url(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var(API_URL_ENV, "https://analysis.example.com/");
        let config = ClientConfig::from_env();
        assert_eq!(
            config.base_url.as_deref(),
            Some("https://analysis.example.com")
        );

        std::env::remove_var(API_URL_ENV);
        assert!(ClientConfig::from_env().base_url.is_none());
    }
}
