//! Upload session data.

use std::fmt;

use uuid::Uuid;

use crate::error::ErrorCategory;
use crate::models::{AnalysisResult, UploadFile};

/// Identifier tagging one session and every stream update opened for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle position of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Submitted,
    Streaming,
    Completed,
    Failed,
}

impl SessionStatus {
    /// `Completed` and `Failed` absorb every further update.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Failed)
    }

    /// A request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SessionStatus::Submitted | SessionStatus::Streaming)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Submitted => "submitted",
            SessionStatus::Streaming => "streaming",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the live upload session, read by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSession {
    pub id: SessionId,
    pub file: Option<UploadFile>,
    pub prompt: String,
    pub status: SessionStatus,
    /// Last accepted progress value; 0..=100 unless the server sends otherwise
    pub progress: i64,
    /// Short label for the current stage, possibly empty
    pub stage: String,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    /// Where `error` came from; drives the recovery hint shown beside it
    pub error_category: Option<ErrorCategory>,
}

impl UploadSession {
    /// Fresh idle session, optionally holding a selected file.
    pub fn new(file: Option<UploadFile>) -> Self {
        Self {
            id: SessionId::new(),
            file,
            prompt: String::new(),
            status: SessionStatus::Idle,
            progress: 0,
            stage: String::new(),
            result: None,
            error: None,
            error_category: None,
        }
    }
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_status_helpers() {
        assert!(SessionStatus::Completed.is_terminal());
        assert!(SessionStatus::Failed.is_terminal());
        assert!(!SessionStatus::Streaming.is_terminal());
        assert!(SessionStatus::Submitted.is_in_flight());
        assert!(SessionStatus::Streaming.is_in_flight());
        assert!(!SessionStatus::Idle.is_in_flight());
        assert_eq!(SessionStatus::Streaming.to_string(), "streaming");
    }

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = UploadSession::default();
        assert_eq!(session.status, SessionStatus::Idle);
        assert_eq!(session.progress, 0);
        assert!(session.stage.is_empty());
        assert!(session.result.is_none());
        assert!(session.error.is_none());
        assert!(session.error_category.is_none());
    }
}
