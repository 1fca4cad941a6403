//! Application state and logic.
//!
//! [`App`] wires the [`SessionController`] to the [`AnalysisClient`]:
//! - each submission spawns one reader task
//! - the task forwards [`AppMessage`]s tagged with the session id
//! - the app applies them to the controller one at a time
//!
//! Selecting a new file or cancelling aborts the reader; anything it already queued is
//! dropped by the controller as stale.

mod cancel;
mod handlers;
mod messages;
mod stream;

pub use messages::AppMessage;

use std::path::Path;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::AnalysisClient;
use crate::error::{ClientError, ValidationError};
use crate::models::UploadFile;
use crate::session::{SessionController, SessionId, SessionStatus, UploadSession};

/// Upload application state
pub struct App {
    controller: SessionController,
    client: AnalysisClient,
    /// Set when the user asked to leave
    pub should_quit: bool,
    /// Set when visible state changed since the last draw
    pub needs_redraw: bool,
    /// Receiver for async messages; taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (cloned into reader tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    reader: Option<JoinHandle<()>>,
}

impl App {
    /// Create an app using the client's progress policy.
    pub fn new(client: AnalysisClient) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let controller = SessionController::new(client.config().progress_policy);
        Self {
            controller,
            client,
            should_quit: false,
            needs_redraw: true,
            message_rx: Some(message_rx),
            message_tx,
            reader: None,
        }
    }

    pub fn session(&self) -> &UploadSession {
        self.controller.session()
    }

    pub fn status(&self) -> SessionStatus {
        self.controller.status()
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    /// Start a fresh session for `file`, abandoning any running one.
    pub fn select_file(&mut self, file: UploadFile) -> SessionId {
        self.abort_reader();
        self.mark_dirty();
        self.controller.select_file(file)
    }

    /// Select a file from a declared name and MIME type.
    pub fn select_declared(
        &mut self,
        name: &str,
        mime: &str,
        bytes: Bytes,
    ) -> Result<SessionId, ValidationError> {
        self.mark_dirty();
        let file = match UploadFile::new(name, mime, bytes) {
            Ok(file) => file,
            Err(e) => {
                self.controller.reject_input(&e);
                return Err(e);
            }
        };
        Ok(self.select_file(file))
    }

    /// Read a document from disk and select it.
    ///
    /// The media type comes from the extension; a disallowed type is rejected before
    /// the file is read.
    pub async fn select_path(&mut self, path: &Path) -> Result<SessionId, ClientError> {
        match UploadFile::from_path(path).await {
            Ok(file) => Ok(self.select_file(file)),
            Err(ClientError::Validation(e)) => {
                self.mark_dirty();
                self.controller.reject_input(&e);
                Err(e.into())
            }
            Err(e) => Err(e),
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> bool {
        self.mark_dirty();
        self.controller.set_prompt(prompt)
    }

    /// Apply queued messages until the live session leaves `Submitted`/`Streaming`.
    ///
    /// `on_update` sees the session after every change. Used by the plain output mode.
    pub async fn run_until_terminal<F>(&mut self, mut on_update: F)
    where
        F: FnMut(&UploadSession),
    {
        let Some(mut message_rx) = self.message_rx.take() else {
            return;
        };
        while self.controller.status().is_in_flight() {
            let Some(msg) = message_rx.recv().await else {
                break;
            };
            if self.handle_message(msg) == crate::session::Applied::Updated {
                on_update(self.controller.session());
            }
        }
        debug!(status = %self.controller.status(), "session settled");
        self.message_rx = Some(message_rx);
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.abort_reader();
        self.should_quit = true;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.abort_reader();
    }
}
