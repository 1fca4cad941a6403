//! Reqwest-based upload transport adapter.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::error::{classify_reqwest_error, TransportError};
use crate::models::UploadRequest;
use crate::traits::{ByteStream, UploadTransport};

/// Upload transport implementation using reqwest.
///
/// No timeout is configured: an analysis can legitimately run for minutes while the
/// service keeps the body open.
///
/// # Example
///
/// ```ignore
/// use analyst::adapters::ReqwestTransport;
///
/// let transport = ReqwestTransport::new();
/// let body = transport.open_upload("http://localhost:2024/upload-and-analyze/progress", &request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new ReqwestTransport with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Build the multipart form: `file` (bytes with name and media type) and `prompt`.
    fn build_form(url: &str, request: &UploadRequest) -> Result<Form, TransportError> {
        let part = Part::bytes(request.file.bytes.to_vec())
            .file_name(request.file.name.clone())
            .mime_str(request.file.media_type.as_mime())
            .map_err(|e| classify_reqwest_error(&e, url))?;

        Ok(Form::new()
            .part("file", part)
            .text("prompt", request.prompt.clone()))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadTransport for ReqwestTransport {
    async fn open_upload(
        &self,
        url: &str,
        request: &UploadRequest,
    ) -> Result<ByteStream, TransportError> {
        let form = Self::build_form(url, request)?;

        debug!(
            url,
            file = %request.file.name,
            media_type = %request.file.media_type,
            bytes = request.file.len(),
            "opening upload stream"
        );

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "text/event-stream")
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, url))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status, "upload rejected by server");
            return Err(TransportError::Status { status, message });
        }

        let url = url.to_string();
        let stream = response
            .bytes_stream()
            .map(move |result| result.map_err(|e| classify_reqwest_error(&e, &url)));

        Ok(Box::pin(stream))
    }

    async fn get_status(&self, url: &str) -> Result<u16, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, url))?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadFile;

    fn request() -> UploadRequest {
        let file = UploadFile::new("notes.txt", "text/plain", b"hello".to_vec()).unwrap();
        UploadRequest::new(file, "summarize")
    }

    #[test]
    fn test_build_form() {
        let form = ReqwestTransport::build_form("http://localhost/upload", &request());
        assert!(form.is_ok());
    }

    #[tokio::test]
    async fn test_open_upload_with_invalid_server() {
        let transport = ReqwestTransport::new();
        let result = transport
            .open_upload("http://127.0.0.1:1/upload-and-analyze/progress", &request())
            .await;
        assert!(matches!(result, Err(TransportError::Connect { .. })));
    }

    #[tokio::test]
    async fn test_get_status_with_invalid_server() {
        let transport = ReqwestTransport::default();
        let result = transport.get_status("http://127.0.0.1:1/health").await;
        assert!(result.is_err());
    }
}
