//! Result type alias for client operations.

use super::client::ClientError;

/// Type alias for Results using [`ClientError`].
pub type AnalystResult<T> = Result<T, ClientError>;
