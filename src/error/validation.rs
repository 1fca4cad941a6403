//! Input validation errors, recovered locally by the user.

use thiserror::Error;

use crate::models::UNSUPPORTED_FILE_MESSAGE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The file's media type is outside the allow-list.
    #[error("Only PDF, DOCX and TXT files are supported (got {media_type})")]
    UnsupportedMediaType { media_type: String },

    #[error("Enter a prompt describing the analysis you want")]
    EmptyPrompt,

    #[error("Select a file before submitting")]
    NoFileSelected,
}

impl ValidationError {
    /// The fixed text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::UnsupportedMediaType { .. } => UNSUPPORTED_FILE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_media_type_user_message_is_fixed() {
        let err = ValidationError::UnsupportedMediaType {
            media_type: "image/png".to_string(),
        };
        assert_eq!(err.user_message(), UNSUPPORTED_FILE_MESSAGE);
        assert!(err.to_string().contains("image/png"));
    }
}
