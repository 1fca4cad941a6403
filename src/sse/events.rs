//! Event types decoded from the progress stream.

use crate::models::AnalysisResult;

/// One structured event carried by a frame.
///
/// Events are transient: they exist only to mutate the upload session.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    /// Progress update. `value` is passed through unclamped.
    Progress { value: i64, stage: String },
    /// Final analysis result. Terminal.
    Result(AnalysisResult),
    /// Error sent deliberately by the service. Terminal.
    Error(String),
}

impl AnalysisEvent {
    /// Returns true if no further event may follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisEvent::Result(_) | AnalysisEvent::Error(_))
    }

    /// Event type name for logging.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            AnalysisEvent::Progress { .. } => "progress",
            AnalysisEvent::Result(_) => "result",
            AnalysisEvent::Error(_) => "error",
        }
    }
}

/// Outcome of decoding one delimited frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Payload parsed; zero or more events in field order (progress, result, error).
    Events(Vec<AnalysisEvent>),
    /// Payload carried the prefix but failed to parse. Dropped by callers, never
    /// surfaced as a session error.
    Malformed { raw: String, reason: String },
    /// Frame without the `data: ` prefix (keep-alive comments, stray text).
    Ignored,
}

impl Frame {
    /// Consume the frame, yielding its events. Malformed and ignored frames yield none.
    pub fn into_events(self) -> Vec<AnalysisEvent> {
        match self {
            Frame::Events(events) => events,
            Frame::Malformed { .. } | Frame::Ignored => Vec::new(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Frame::Malformed { .. })
    }
}
