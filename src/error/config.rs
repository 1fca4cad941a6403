//! Configuration errors, raised before any network I/O.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("The analysis service URL is not configured. Contact your administrator.")]
    MissingBaseUrl,

    #[error("Invalid analysis service URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
