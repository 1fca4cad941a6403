//! Error category classification.
//!
//! Categories decide how a failure is presented and whether the user can simply try
//! again.

use std::fmt;

/// High-level categorization of client failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or invalid endpoint configuration.
    /// Not retryable until the configuration is fixed.
    Configuration,

    /// Disallowed file type, empty prompt, no file selected.
    /// Recovered locally once the user corrects the input.
    Validation,

    /// Network failure while uploading or streaming.
    /// Never retried automatically; the user may submit again.
    Transport,

    /// Error frame sent deliberately by the analysis service.
    Application,

    /// A frame that failed structured parsing. Dropped silently.
    MalformedFrame,
}

impl ErrorCategory {
    /// Returns true if the user can resubmit the same input and expect a different
    /// outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Transport)
    }

    /// Returns true if an error of this category ends the session in `failed`.
    pub fn is_fatal_for_session(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Configuration | ErrorCategory::Transport | ErrorCategory::Application
        )
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Transport => "transport",
            ErrorCategory::Application => "application",
            ErrorCategory::MalformedFrame => "malformed_frame",
        }
    }

    /// Suggested recovery action shown under the error message.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "Set ANALYST_API_URL or pass --api-url",
            ErrorCategory::Validation => "Check the file and prompt, then submit again",
            ErrorCategory::Transport => "Check that the analysis service is running and retry",
            ErrorCategory::Application => "The service rejected this analysis",
            ErrorCategory::MalformedFrame => "",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Transport.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
        assert!(!ErrorCategory::Validation.is_retryable());
        assert!(!ErrorCategory::Application.is_retryable());
        assert!(!ErrorCategory::MalformedFrame.is_retryable());
    }

    #[test]
    fn test_category_fatal_for_session() {
        assert!(ErrorCategory::Configuration.is_fatal_for_session());
        assert!(ErrorCategory::Transport.is_fatal_for_session());
        assert!(ErrorCategory::Application.is_fatal_for_session());
        assert!(!ErrorCategory::Validation.is_fatal_for_session());
        assert!(!ErrorCategory::MalformedFrame.is_fatal_for_session());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::MalformedFrame), "malformed_frame");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }
}
