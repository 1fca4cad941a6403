//! Analysis service client.
//!
//! [`AnalysisClient::submit`] opens one upload and turns its growing response body into
//! a stream of [`StreamUpdate`]s: `Opened` once the server accepts the upload, then one
//! update per decoded event, ending at the first terminal event.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::adapters::ReqwestTransport;
use crate::config::ClientConfig;
use crate::error::{AnalystResult, ClientError, TransportError, ValidationError};
use crate::models::UploadRequest;
use crate::sse::{AnalysisEvent, Frame, FrameDecoder};
use crate::traits::{ByteStream, UploadTransport};

/// Message reported for every transport-level failure.
pub const TRANSPORT_ERROR_MESSAGE: &str =
    "Network error: could not reach the analysis service. Check that it is running and try again.";

/// Message reported when the body ends without a result or error frame.
pub const INCOMPLETE_STREAM_MESSAGE: &str =
    "The analysis service closed the connection before sending a result.";

/// One item of an upload stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamUpdate {
    /// The server accepted the upload and the body is being read
    Opened,
    /// A decoded event from the body
    Event(AnalysisEvent),
    /// The transfer failed or ended early. Never produced by an error frame.
    TransportFailed(String),
}

impl StreamUpdate {
    /// Returns true if the stream ends after this update.
    pub fn is_terminal(&self) -> bool {
        match self {
            StreamUpdate::Opened => false,
            StreamUpdate::Event(event) => event.is_terminal(),
            StreamUpdate::TransportFailed(_) => true,
        }
    }
}

/// Stream returned by [`AnalysisClient::submit`].
pub type EventStream = Pin<Box<dyn Stream<Item = StreamUpdate> + Send>>;

/// Client for the analysis service.
#[derive(Clone)]
pub struct AnalysisClient {
    config: ClientConfig,
    transport: Arc<dyn UploadTransport>,
}

impl AnalysisClient {
    /// Create a client using the reqwest transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn UploadTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start an upload.
    ///
    /// Configuration and prompt are checked before any network I/O; failures are
    /// returned as `Err`. The returned stream is lazy: the single request is sent when
    /// it is first polled. Transport failures surface as one
    /// [`StreamUpdate::TransportFailed`] carrying [`TRANSPORT_ERROR_MESSAGE`]. No retry
    /// is attempted.
    pub fn submit(&self, request: &UploadRequest) -> AnalystResult<EventStream> {
        let url = self.config.upload_url()?;
        if request.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt.into());
        }

        let state = ReadState::Connecting {
            transport: Arc::clone(&self.transport),
            url,
            request: request.clone(),
        };

        Ok(Box::pin(stream::unfold(state, next_update)))
    }

    /// Check if the analysis service is healthy and reachable.
    ///
    /// # Returns
    /// `true` if the health endpoint returns a 2xx status, `false` otherwise
    pub async fn health_check(&self) -> Result<bool, ClientError> {
        let url = self.config.health_url()?;
        let status = self.transport.get_status(&url).await?;
        Ok((200..300).contains(&status))
    }
}

enum ReadState {
    Connecting {
        transport: Arc<dyn UploadTransport>,
        url: String,
        request: UploadRequest,
    },
    Reading {
        body: ByteStream,
        decoder: FrameDecoder,
        queue: VecDeque<AnalysisEvent>,
        body_ended: bool,
    },
    Done,
}

async fn next_update(state: ReadState) -> Option<(StreamUpdate, ReadState)> {
    match state {
        ReadState::Connecting {
            transport,
            url,
            request,
        } => match transport.open_upload(&url, &request).await {
            Ok(body) => {
                info!(url = %url, file = %request.file.name, "upload accepted, reading progress stream");
                Some((
                    StreamUpdate::Opened,
                    ReadState::Reading {
                        body,
                        decoder: FrameDecoder::new(),
                        queue: VecDeque::new(),
                        body_ended: false,
                    },
                ))
            }
            Err(e) => Some(transport_failed(&e)),
        },
        ReadState::Reading {
            mut body,
            mut decoder,
            mut queue,
            mut body_ended,
        } => loop {
            if let Some(event) = queue.pop_front() {
                if event.is_terminal() {
                    debug!(event = event.event_type_name(), "terminal event received");
                    return Some((StreamUpdate::Event(event), ReadState::Done));
                }
                return Some((
                    StreamUpdate::Event(event),
                    ReadState::Reading {
                        body,
                        decoder,
                        queue,
                        body_ended,
                    },
                ));
            }

            if body_ended {
                warn!(
                    malformed_frames = decoder.malformed_count(),
                    "progress stream ended without a terminal event"
                );
                return Some((
                    StreamUpdate::TransportFailed(INCOMPLETE_STREAM_MESSAGE.to_string()),
                    ReadState::Done,
                ));
            }

            match body.next().await {
                Some(Ok(chunk)) => {
                    queue.extend(decoder.push_bytes(&chunk).into_iter().flat_map(Frame::into_events));
                }
                Some(Err(e)) => return Some(transport_failed(&e)),
                None => {
                    queue.extend(decoder.finish().into_iter().flat_map(Frame::into_events));
                    body_ended = true;
                }
            }
        },
        ReadState::Done => None,
    }
}

fn transport_failed(error: &TransportError) -> (StreamUpdate, ReadState) {
    warn!(
        error = %error,
        code = error.error_code(),
        status = ?error.status(),
        "upload transport failed"
    );
    (
        StreamUpdate::TransportFailed(TRANSPORT_ERROR_MESSAGE.to_string()),
        ReadState::Done,
    )
}
