//! Common test utilities for integration tests.

#![allow(dead_code)]

use analyst::client::{AnalysisClient, StreamUpdate};
use analyst::config::ClientConfig;
use analyst::models::{UploadFile, UploadRequest};
use futures::StreamExt;
use serde_json::Value;

/// Upload endpoint path.
pub const UPLOAD_PATH: &str = "/upload-and-analyze/progress";

/// Encode one payload as a complete frame.
pub fn frame(payload: Value) -> String {
    format!("data: {}\n\n", payload)
}

/// A client pointed at `base_url` using the reqwest transport.
pub fn client_for(base_url: &str) -> AnalysisClient {
    AnalysisClient::new(ClientConfig::new().with_base_url(base_url))
}

/// A plain-text upload request (keeps multipart bodies valid UTF-8 for matchers).
pub fn text_request(prompt: &str) -> UploadRequest {
    let file = UploadFile::new("memo.txt", "text/plain", b"Quarterly revenue grew 40%.".to_vec())
        .expect("text/plain is allowed");
    UploadRequest::new(file, prompt)
}

/// Run one submission to the end and collect every update.
pub async fn collect_updates(client: &AnalysisClient, request: &UploadRequest) -> Vec<StreamUpdate> {
    client
        .submit(request)
        .expect("submission accepted")
        .collect()
        .await
}
