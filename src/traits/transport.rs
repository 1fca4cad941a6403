//! Upload transport trait abstraction.
//!
//! The stream reader only needs two things from HTTP: open one multipart upload and
//! hand back its body as a byte stream, and probe a URL for its status code. Keeping
//! that behind a trait lets tests script arbitrary chunking and failures.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

use crate::error::TransportError;
use crate::models::UploadRequest;

/// Response body delivered chunk by chunk as it arrives.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Trait for the HTTP operations the analysis client performs.
///
/// # Example
///
/// ```ignore
/// use analyst::traits::UploadTransport;
///
/// async fn first_chunk<T: UploadTransport>(transport: &T, url: &str, request: &UploadRequest) {
///     let mut body = transport.open_upload(url, request).await?;
///     let chunk = body.next().await;
/// }
/// ```
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Send `request` as a multipart POST (`file` and `prompt` fields) asking for an
    /// event-stream response.
    ///
    /// Resolves once the response head has arrived. A non-2xx status is returned as
    /// [`TransportError::Status`]. Exactly one request is made per call.
    async fn open_upload(
        &self,
        url: &str,
        request: &UploadRequest,
    ) -> Result<ByteStream, TransportError>;

    /// Perform a GET request and return the status code.
    async fn get_status(&self, url: &str) -> Result<u16, TransportError>;
}
