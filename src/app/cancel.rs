//! Submission cancellation for the App.
//!
//! The service has no cancel endpoint, so cancelling only stops reading: the reader
//! task is aborted and the session goes back to idle under a new id.

use tracing::info;

use crate::session::SessionId;

use super::App;

impl App {
    /// Cancel the running submission if there is one.
    pub fn cancel(&mut self) -> Option<SessionId> {
        let id = self.controller.cancel()?;
        self.abort_reader();
        info!(session = %id, "stopped reading cancelled submission");
        self.mark_dirty();
        Some(id)
    }
}
