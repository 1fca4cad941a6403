//! Upload submission and stream forwarding for the App.

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::EventStream;
use crate::session::{SessionId, SubmitRejected};

use super::{App, AppMessage};

impl App {
    /// Submit the live session and spawn its reader task.
    ///
    /// A rejected submission changes nothing. A client error that is fatal for the
    /// session (configuration) fails it before any request is made; anything else
    /// puts it back to idle with the message shown.
    pub fn submit(&mut self) -> Result<SessionId, SubmitRejected> {
        let (session_id, request) = self.controller.begin_submit()?;
        self.mark_dirty();

        let stream = match self.client.submit(&request) {
            Ok(stream) => stream,
            Err(e) => {
                warn!(session = %session_id, error = %e, category = %e.category(), "submission failed before sending");
                self.controller.fail(session_id, e.category(), e.user_message());
                return Ok(session_id);
            }
        };

        self.abort_reader();
        let message_tx = self.message_tx.clone();
        self.reader = Some(tokio::spawn(forward_updates(session_id, stream, message_tx)));
        Ok(session_id)
    }

    /// Start over with the same file and prompt after a terminal state.
    pub fn retry(&mut self) -> Result<SessionId, SubmitRejected> {
        let session = self.controller.session();
        if !session.status.is_terminal() {
            return Err(SubmitRejected::NotIdle {
                status: session.status,
            });
        }
        let prompt = session.prompt.clone();
        if let Some(file) = session.file.clone() {
            self.select_file(file);
            self.controller.set_prompt(prompt);
        }
        self.submit()
    }

    pub(super) fn abort_reader(&mut self) {
        if let Some(reader) = self.reader.take() {
            if !reader.is_finished() {
                debug!("aborting previous reader task");
            }
            reader.abort();
        }
    }
}

/// Tag every update from `stream` with `session_id` and send it to the app.
async fn forward_updates(
    session_id: SessionId,
    mut stream: EventStream,
    message_tx: mpsc::UnboundedSender<AppMessage>,
) {
    while let Some(update) = stream.next().await {
        if message_tx
            .send(AppMessage::Stream { session_id, update })
            .is_err()
        {
            // App is gone
            break;
        }
    }
}
