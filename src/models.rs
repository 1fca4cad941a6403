//! Domain models shared by the decoder, the client and the session controller.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Message shown when a file outside the allow-list is selected.
pub const UNSUPPORTED_FILE_MESSAGE: &str = "Only PDF, DOCX and TXT files are supported";

/// Media types accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Pdf,
    Docx,
    Text,
}

impl MediaType {
    /// All accepted media types, in display order.
    pub const ALL: [MediaType; 3] = [MediaType::Pdf, MediaType::Docx, MediaType::Text];

    /// The MIME string sent with the multipart `file` field.
    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            MediaType::Text => "text/plain",
        }
    }

    /// Parse a declared MIME string. Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|media_type| media_type.as_mime().eq_ignore_ascii_case(essence))
    }

    /// Infer the media type from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(MediaType::Pdf),
            "docx" => Some(MediaType::Docx),
            "txt" => Some(MediaType::Text),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

/// A document selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    /// File name sent in the multipart part
    pub name: String,
    pub media_type: MediaType,
    pub bytes: Bytes,
}

impl UploadFile {
    /// Build an upload file from a declared MIME string.
    ///
    /// Fails with [`ValidationError::UnsupportedMediaType`] for anything outside the
    /// allow-list.
    pub fn new(
        name: impl Into<String>,
        mime: &str,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, ValidationError> {
        let media_type =
            MediaType::from_mime(mime).ok_or_else(|| ValidationError::UnsupportedMediaType {
                media_type: mime.to_string(),
            })?;
        Ok(Self {
            name: name.into(),
            media_type,
            bytes: bytes.into(),
        })
    }

    /// Read a file from disk, inferring its media type from the extension.
    ///
    /// The extension is checked before the file is read.
    pub async fn from_path(path: &Path) -> Result<Self, crate::error::ClientError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let media_type = MediaType::from_extension(extension).ok_or_else(|| {
            ValidationError::UnsupportedMediaType {
                media_type: format!(".{}", extension),
            }
        })?;
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self {
            name,
            media_type,
            bytes: Bytes::from(bytes),
        })
    }

    /// Size of the document in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Investment score reported by the service; the backend sends a number today but
/// older deployments sent free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvestmentScore {
    Number(f64),
    Text(String),
}

impl fmt::Display for InvestmentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0"
            InvestmentScore::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                write!(f, "{}", *n as i64)
            }
            InvestmentScore::Number(n) => write!(f, "{}", n),
            InvestmentScore::Text(text) => f.write_str(text),
        }
    }
}

/// Structured result of one analysis.
///
/// Fields are read leniently: a field of the wrong type degrades to its empty form
/// instead of rejecting the whole result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Empty when missing or null; other non-string values keep their JSON text
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub investment_score: Option<InvestmentScore>,
    /// Source URLs in the order the service gathered them
    #[serde(default, deserialize_with = "lenient_sources")]
    pub sources: Vec<String>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

fn lenient_score<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<InvestmentScore>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(InvestmentScore::Number),
        Value::String(text) => Some(InvestmentScore::Text(text)),
        _ => None,
    })
}

/// Non-string entries are dropped; anything but an array reads as no sources.
fn lenient_sources<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(source) => Some(source),
            _ => None,
        })
        .collect())
}

/// Everything needed to open one upload stream.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub file: UploadFile,
    pub prompt: String,
}

impl UploadRequest {
    pub fn new(file: UploadFile, prompt: impl Into<String>) -> Self {
        Self {
            file,
            prompt: prompt.into(),
        }
    }
}
