//! Document upload validation
//!
//! Uploaded document images are checked locally before any adapter call:
//! the payload must be at most 5 MB and must actually be a PNG, JPEG, or
//! WebP image. The declared MIME type is not trusted on its own; the
//! leading bytes are sniffed.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::request::InlineData;

/// Client-side upload cap, enforced before any network call
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// An uploaded document image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpload {
    /// Original filename, recorded in history
    pub filename: String,
    /// Declared MIME type
    pub mime_type: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    /// Create a new upload
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Validate size and content type
    ///
    /// Returns the sniffed format on success so callers can use the real
    /// MIME type rather than the declared one.
    pub fn validate(&self) -> Result<ImageFormat> {
        if self.bytes.is_empty() {
            return Err(Error::validation("No document image was provided."));
        }
        if self.bytes.len() > MAX_DOCUMENT_BYTES {
            return Err(Error::validation(
                "The document exceeds the 5 MB size limit.",
            ));
        }
        ImageFormat::detect(&self.bytes).ok_or_else(|| {
            Error::validation("Unsupported document type. Upload a PNG, JPEG, or WebP image.")
        })
    }

    /// Validate, then encode for inline transmission to the provider
    pub fn to_inline_data(&self) -> Result<InlineData> {
        let format = self.validate()?;
        Ok(InlineData::from_bytes(format.mime_type(), &self.bytes))
    }
}

/// Accepted image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    /// Sniff the format from leading bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    /// Canonical MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }
}
