//! Mock implementations for testing.
//!
//! Enables exercising the stream reader and the app without network access.
//!
//! # Available Mocks
//!
//! - [`MockTransport`] - upload transport with scripted chunks, failures and
//!   externally driven bodies

pub mod transport;

pub use transport::{MockBodySender, MockTransport, MockUpload, RecordedUpload};
