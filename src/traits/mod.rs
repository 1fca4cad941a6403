//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`UploadTransport`] - multipart upload with a streamed response body, plus the
//!   status probe used by the health check

pub mod transport;

pub use transport::{ByteStream, UploadTransport};
