//! Session controller.
//!
//! Owns the single live [`UploadSession`] and applies user actions and stream updates
//! to it. Pure state: no I/O happens here, which is what lets the app run every
//! transition to completion on one thread.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::client::StreamUpdate;
use crate::error::{ErrorCategory, ValidationError};
use crate::models::{UploadFile, UploadRequest};
use crate::sse::AnalysisEvent;

use super::progress::ProgressPolicy;
use super::state::{SessionId, SessionStatus, UploadSession};

/// Why a submission was refused. A refused submission changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already {status}")]
    NotIdle { status: SessionStatus },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// What [`SessionController::apply`] did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The session changed
    Updated,
    /// The update was for an abandoned session
    Stale,
    /// The update arrived in a state that does not accept it (terminal, or out of order)
    Ignored,
}

/// State machine for one user's upload sessions.
#[derive(Debug, Default)]
pub struct SessionController {
    session: UploadSession,
    policy: ProgressPolicy,
}

impl SessionController {
    pub fn new(policy: ProgressPolicy) -> Self {
        Self {
            session: UploadSession::default(),
            policy,
        }
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn current_id(&self) -> SessionId {
        self.session.id
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status
    }

    pub fn policy(&self) -> ProgressPolicy {
        self.policy
    }

    /// Replace the live session with a fresh idle one holding `file`.
    ///
    /// Allowed in any state. An in-flight session is abandoned: its updates become
    /// stale from here on.
    pub fn select_file(&mut self, file: UploadFile) -> SessionId {
        if self.session.status.is_in_flight() {
            info!(abandoned = %self.session.id, "new file selected, abandoning in-flight session");
        }
        self.session = UploadSession::new(Some(file));
        debug!(session = %self.session.id, "file selected");
        self.session.id
    }

    /// Validate a declared media type and select the file.
    ///
    /// On rejection nothing is uploaded; see [`reject_input`](Self::reject_input)
    /// for how the error is recorded.
    pub fn select_declared(
        &mut self,
        name: &str,
        mime: &str,
        bytes: Bytes,
    ) -> Result<SessionId, ValidationError> {
        match UploadFile::new(name, mime, bytes) {
            Ok(file) => Ok(self.select_file(file)),
            Err(err) => {
                self.reject_input(&err);
                Err(err)
            }
        }
    }

    /// Record a rejected file selection or submission.
    ///
    /// The message lands on the live session only while it is idle; a running or
    /// finished session is left untouched.
    pub fn reject_input(&mut self, err: &ValidationError) {
        debug!(error = %err, "input rejected");
        if self.session.status == SessionStatus::Idle {
            self.session.error = Some(err.user_message());
            self.session.error_category = Some(ErrorCategory::Validation);
        }
    }

    /// Set the prompt. Ignored unless idle.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> bool {
        if self.session.status != SessionStatus::Idle {
            return false;
        }
        self.session.prompt = prompt.into();
        true
    }

    /// Move `Idle -> Submitted` and hand back the request to send.
    ///
    /// Requires a selected file and a prompt that is not blank.
    pub fn begin_submit(&mut self) -> Result<(SessionId, UploadRequest), SubmitRejected> {
        if self.session.status != SessionStatus::Idle {
            return Err(SubmitRejected::NotIdle {
                status: self.session.status,
            });
        }
        let file = self
            .session
            .file
            .clone()
            .ok_or(ValidationError::NoFileSelected)?;
        if self.session.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt.into());
        }

        let session = &mut self.session;
        session.status = SessionStatus::Submitted;
        session.progress = 0;
        session.stage.clear();
        session.error = None;
        session.error_category = None;
        session.result = None;
        info!(session = %session.id, file = %file.name, "submitting upload");

        Ok((session.id, UploadRequest::new(file, session.prompt.clone())))
    }

    /// Apply one stream update opened for session `id`.
    pub fn apply(&mut self, id: SessionId, update: StreamUpdate) -> Applied {
        if id != self.session.id {
            debug!(stale = %id, current = %self.session.id, "dropping update for abandoned session");
            return Applied::Stale;
        }

        let status = self.session.status;
        match (status, update) {
            (SessionStatus::Submitted, StreamUpdate::Opened) => {
                self.session.status = SessionStatus::Streaming;
                Applied::Updated
            }
            (
                SessionStatus::Submitted | SessionStatus::Streaming,
                StreamUpdate::TransportFailed(message),
            ) => self.finish_failed(ErrorCategory::Transport, message),
            (SessionStatus::Streaming, StreamUpdate::Event(event)) => self.apply_event(event),
            (status, update) => {
                debug!(status = %status, ?update, "ignoring update");
                Applied::Ignored
            }
        }
    }

    /// Fail a submitted session before any stream was opened.
    ///
    /// Categories that are not fatal for a session put it back to `Idle` with the
    /// message recorded, so the user can correct the input and submit again.
    pub fn fail(
        &mut self,
        id: SessionId,
        category: ErrorCategory,
        message: impl Into<String>,
    ) -> Applied {
        if id != self.session.id {
            return Applied::Stale;
        }
        if !self.session.status.is_in_flight() {
            return Applied::Ignored;
        }
        if !category.is_fatal_for_session() {
            debug!(session = %self.session.id, category = %category, "submission sent back to idle");
            self.session.status = SessionStatus::Idle;
            self.session.error = Some(message.into());
            self.session.error_category = Some(category);
            return Applied::Updated;
        }
        self.finish_failed(category, message.into())
    }

    /// Abandon an in-flight submission and return to `Idle`, keeping file and prompt.
    ///
    /// The session gets a new id so late updates from the aborted stream are stale.
    /// Returns the new id, or `None` if nothing was in flight.
    pub fn cancel(&mut self) -> Option<SessionId> {
        if !self.session.status.is_in_flight() {
            return None;
        }
        let mut fresh = UploadSession::new(self.session.file.take());
        fresh.prompt = std::mem::take(&mut self.session.prompt);
        info!(cancelled = %self.session.id, session = %fresh.id, "submission cancelled");
        self.session = fresh;
        Some(self.session.id)
    }

    fn apply_event(&mut self, event: AnalysisEvent) -> Applied {
        match event {
            AnalysisEvent::Progress { value, stage } => {
                match self.policy.admit(self.session.progress, value) {
                    Some(progress) => {
                        self.session.progress = progress;
                        self.session.stage = stage;
                        Applied::Updated
                    }
                    None => {
                        debug!(value, current = self.session.progress, "progress update rejected by policy");
                        Applied::Ignored
                    }
                }
            }
            AnalysisEvent::Result(result) => {
                self.session.result = Some(result);
                self.session.status = SessionStatus::Completed;
                info!(session = %self.session.id, "analysis completed");
                Applied::Updated
            }
            AnalysisEvent::Error(message) => self.finish_failed(ErrorCategory::Application, message),
        }
    }

    fn finish_failed(&mut self, category: ErrorCategory, message: String) -> Applied {
        info!(session = %self.session.id, category = %category, error = %message, "analysis failed");
        self.session.error = Some(message);
        self.session.error_category = Some(category);
        self.session.result = None;
        self.session.status = SessionStatus::Failed;
        Applied::Updated
    }
}
