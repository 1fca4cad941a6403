//! AppMessage enum for async communication within the application.

use crate::client::StreamUpdate;
use crate::session::SessionId;

/// Messages received from async operations
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// An update from the reader task opened for `session_id`
    Stream {
        session_id: SessionId,
        update: StreamUpdate,
    },
}
