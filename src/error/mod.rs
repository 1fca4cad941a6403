//! Error handling for the analysis client.
//!
//! Every failure the client can report falls into one [`ErrorCategory`]:
//!
//! | Category | Raised | Retryable |
//! |----------|--------|-----------|
//! | Configuration | before any I/O, missing or invalid base URL | No |
//! | Validation | before any I/O, bad file type or empty prompt | After correcting input |
//! | Transport | while streaming, connection or body failure | Manually |
//! | Application | error frame sent by the service | No |
//! | MalformedFrame | frame that fails JSON parsing | Dropped, never surfaced |
//!
//! # Example
//!
//! ```ignore
//! use analyst::error::{AnalystResult, ClientError};
//!
//! fn start(client: &AnalysisClient, request: &UploadRequest) -> AnalystResult<()> {
//!     let _stream = client.submit(request)?;
//!     Ok(())
//! }
//! ```

mod category;
mod client;
mod config;
mod network;
mod result;
mod validation;

pub use category::ErrorCategory;
pub use client::ClientError;
pub use config::ConfigError;
pub use network::{classify_reqwest_error, TransportError};
pub use result::AnalystResult;
pub use validation::ValidationError;
