//! Unified error type returned by client operations.

use thiserror::Error;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::network::TransportError;
use super::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Config(_) => ErrorCategory::Configuration,
            ClientError::Validation(_) => ErrorCategory::Validation,
            ClientError::Transport(_) => ErrorCategory::Transport,
            // Reading the document from disk is part of collecting input
            ClientError::Io(_) => ErrorCategory::Validation,
        }
    }

    /// Message suitable for display in the session's error slot.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
