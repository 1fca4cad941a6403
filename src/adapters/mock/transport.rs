//! Mock upload transport for testing.
//!
//! Each call to `open_upload` pops the next scripted [`MockUpload`] and records the
//! request, so tests can assert both what was sent and how many transfers were made.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::error::TransportError;
use crate::models::{MediaType, UploadRequest};
use crate::traits::{ByteStream, UploadTransport};

/// A recorded upload for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpload {
    pub url: String,
    pub file_name: String,
    pub media_type: MediaType,
    pub prompt: String,
}

/// Scripted behavior for one upload.
#[derive(Debug)]
pub enum MockUpload {
    /// Deliver these chunks, then end the body cleanly
    Chunks(Vec<Bytes>),
    /// Deliver these chunks, then fail mid-body
    ChunksThenError(Vec<Bytes>, TransportError),
    /// Fail before the response head arrives
    OpenError(TransportError),
    /// Body driven by the test through a [`MockBodySender`]
    Channel(mpsc::UnboundedReceiver<Result<Bytes, TransportError>>),
}

impl MockUpload {
    /// Convenience for text chunks.
    pub fn text_chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockUpload::Chunks(
            chunks
                .into_iter()
                .map(|chunk| Bytes::from(chunk.into()))
                .collect(),
        )
    }

    /// Create a channel-driven body and the sender that feeds it.
    pub fn channel() -> (Self, MockBodySender) {
        let (tx, rx) = mpsc::unbounded_channel();
        (MockUpload::Channel(rx), MockBodySender { tx })
    }
}

/// Feeds a [`MockUpload::Channel`] body. Dropping it ends the body.
#[derive(Debug, Clone)]
pub struct MockBodySender {
    tx: mpsc::UnboundedSender<Result<Bytes, TransportError>>,
}

impl MockBodySender {
    /// Send a chunk. Returns false once the reader has gone away.
    pub fn send(&self, chunk: impl Into<String>) -> bool {
        self.tx.send(Ok(Bytes::from(chunk.into()))).is_ok()
    }

    /// Fail the body mid-transfer.
    pub fn fail(&self, error: TransportError) -> bool {
        self.tx.send(Err(error)).is_ok()
    }
}

/// Mock transport with a queue of scripted uploads.
///
/// When the queue is empty, `open_upload` fails with a connect error.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    uploads: Arc<Mutex<VecDeque<MockUpload>>>,
    recorded: Arc<Mutex<Vec<RecordedUpload>>>,
    health_status: Arc<Mutex<Option<u16>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the behavior of the next upload.
    pub fn push_upload(&self, upload: MockUpload) {
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push_back(upload);
        }
    }

    /// Builder form of [`push_upload`](Self::push_upload).
    pub fn with_upload(self, upload: MockUpload) -> Self {
        self.push_upload(upload);
        self
    }

    /// Status returned by `get_status`. Unset means connection failure.
    pub fn with_health_status(self, status: u16) -> Self {
        if let Ok(mut health) = self.health_status.lock() {
            *health = Some(status);
        }
        self
    }

    /// Uploads made so far.
    pub fn recorded(&self) -> Vec<RecordedUpload> {
        self.recorded
            .lock()
            .map(|recorded| recorded.clone())
            .unwrap_or_default()
    }

    /// Number of network transfers initiated.
    pub fn upload_count(&self) -> usize {
        self.recorded().len()
    }
}

fn refused(url: &str) -> TransportError {
    TransportError::Connect {
        url: url.to_string(),
        message: "connection refused".to_string(),
    }
}

#[async_trait]
impl UploadTransport for MockTransport {
    async fn open_upload(
        &self,
        url: &str,
        request: &UploadRequest,
    ) -> Result<ByteStream, TransportError> {
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.push(RecordedUpload {
                url: url.to_string(),
                file_name: request.file.name.clone(),
                media_type: request.file.media_type,
                prompt: request.prompt.clone(),
            });
        }

        let next = self
            .uploads
            .lock()
            .ok()
            .and_then(|mut uploads| uploads.pop_front());

        match next {
            Some(MockUpload::Chunks(chunks)) => {
                Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
            }
            Some(MockUpload::ChunksThenError(chunks, error)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(error)));
                Ok(Box::pin(stream::iter(items)))
            }
            Some(MockUpload::OpenError(error)) => Err(error),
            Some(MockUpload::Channel(rx)) => Ok(Box::pin(stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|item| (item, rx))
            }))),
            None => Err(refused(url)),
        }
    }

    async fn get_status(&self, url: &str) -> Result<u16, TransportError> {
        self.health_status
            .lock()
            .ok()
            .and_then(|status| *status)
            .ok_or_else(|| refused(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadFile;
    use futures_util::StreamExt;

    fn request() -> UploadRequest {
        let file = UploadFile::new("deal.pdf", "application/pdf", b"%PDF".to_vec()).unwrap();
        UploadRequest::new(file, "analyze")
    }

    #[tokio::test]
    async fn test_scripted_chunks_are_delivered_in_order() {
        let transport = MockTransport::new().with_upload(MockUpload::text_chunks(["a", "b"]));
        let mut body = transport.open_upload("http://mock/u", &request()).await.unwrap();

        assert_eq!(body.next().await.unwrap().unwrap(), Bytes::from("a"));
        assert_eq!(body.next().await.unwrap().unwrap(), Bytes::from("b"));
        assert!(body.next().await.is_none());

        let recorded = transport.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].file_name, "deal.pdf");
        assert_eq!(recorded[0].media_type, MediaType::Pdf);
        assert_eq!(recorded[0].prompt, "analyze");
    }

    #[tokio::test]
    async fn test_empty_queue_refuses_connection() {
        let transport = MockTransport::new();
        let result = transport.open_upload("http://mock/u", &request()).await;
        assert!(matches!(result, Err(TransportError::Connect { .. })));
        assert_eq!(transport.upload_count(), 1);
    }

    #[tokio::test]
    async fn test_channel_body() {
        let (upload, sender) = MockUpload::channel();
        let transport = MockTransport::new().with_upload(upload);
        let mut body = transport.open_upload("http://mock/u", &request()).await.unwrap();

        assert!(sender.send("chunk"));
        assert_eq!(body.next().await.unwrap().unwrap(), Bytes::from("chunk"));
        drop(sender);
        assert!(body.next().await.is_none());
    }

    #[tokio::test]
    async fn test_health_status() {
        let transport = MockTransport::new().with_health_status(200);
        assert_eq!(transport.get_status("http://mock/health").await.unwrap(), 200);
        assert!(MockTransport::new().get_status("http://mock/health").await.is_err());
    }
}
