//! Transport-level errors.
//!
//! These cover connection, status and body failures. They are never confused with an
//! error frame sent by the service: the stream reader maps every one of them to a
//! single fixed message.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection to the server failed.
    #[error("Connection failed to '{url}': {message}")]
    Connect { url: String, message: String },

    /// Server answered with a non-2xx status.
    #[error("HTTP {status} error: {message}")]
    Status { status: u16, message: String },

    /// Reading the response body failed mid-transfer.
    #[error("Response body error: {message}")]
    Body { message: String },

    /// The request could not be built (bad multipart part, invalid URL).
    #[error("Request error: {message}")]
    Request { message: String },
}

impl TransportError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::Connect { .. } => "E_NET_CONN",
            TransportError::Status { .. } => "E_NET_HTTP",
            TransportError::Body { .. } => "E_NET_BODY",
            TransportError::Request { .. } => "E_NET_REQUEST",
        }
    }
}

/// Classify a reqwest error into a [`TransportError`].
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> TransportError {
    if err.is_connect() {
        TransportError::Connect {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if let Some(status) = err.status() {
        TransportError::Status {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else if err.is_body() || err.is_decode() {
        TransportError::Body {
            message: err.to_string(),
        }
    } else if err.is_builder() {
        TransportError::Request {
            message: err.to_string(),
        }
    } else {
        TransportError::Connect {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = TransportError::Status {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.error_code(), "E_NET_HTTP");

        let err = TransportError::Body {
            message: "reset".to_string(),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_display() {
        let err = TransportError::Connect {
            url: "http://127.0.0.1:1".to_string(),
            message: "refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Connection failed to 'http://127.0.0.1:1': refused"
        );
    }

    #[tokio::test]
    async fn test_classify_connect_error() {
        let url = "http://127.0.0.1:1/health";
        let err = reqwest::Client::new().get(url).send().await.unwrap_err();
        assert!(matches!(
            classify_reqwest_error(&err, url),
            TransportError::Connect { .. }
        ));
    }
}
