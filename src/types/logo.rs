//! Logo input types and upload validation.

use std::fmt;
use std::path::Path;

use crate::error::{PlateError, Result};

/// Default cap on uploaded logo size (5 MiB).
pub const DEFAULT_MAX_LOGO_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted logo encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogoKind {
    /// SVG markup, rasterized at the target size.
    Svg,
    /// PNG raster.
    Png,
    /// JPEG raster.
    Jpeg,
}

impl LogoKind {
    /// Resolve a content-type marker.
    pub fn from_content_type(content_type: &str) -> Result<Self> {
        match content_type {
            "image/svg+xml" => Ok(Self::Svg),
            "image/png" => Ok(Self::Png),
            "image/jpeg" => Ok(Self::Jpeg),
            other => Err(PlateError::UnsupportedLogoFormat {
                kind: other.to_string(),
            }),
        }
    }

    /// Resolve a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(PlateError::UnsupportedLogoFormat {
                kind: format!(".{}", other),
            }),
        }
    }

    /// The content-type marker for this kind.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

}

impl fmt::Display for LogoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}

/// Logo bytes tagged with their declared encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub kind: LogoKind,
    pub bytes: Vec<u8>,
}

impl Logo {
    pub fn new(kind: LogoKind, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            bytes: bytes.into(),
        }
    }

    /// SVG logo from markup bytes.
    pub fn svg(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(LogoKind::Svg, bytes)
    }

    /// Read a logo file, inferring its kind from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let kind = LogoKind::from_extension(ext)?;

        let bytes = std::fs::read(path).map_err(|e| PlateError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read logo: {}", e),
        })?;

        Ok(Self::new(kind, bytes))
    }
}

/// An uploaded logo as received from a transport layer, not yet trusted.
#[derive(Debug, Clone, Default)]
pub struct LogoUpload {
    /// Declared content type.
    pub content_type: Option<String>,

    /// Original filename.
    pub filename: Option<String>,

    /// Raw bytes.
    pub bytes: Vec<u8>,
}

impl LogoUpload {
    /// Read a logo file as an upload, declaring the kind its extension names.
    pub fn from_path(path: &Path) -> Result<Self> {
        let logo = Logo::from_path(path)?;
        Ok(Self {
            content_type: Some(logo.kind.content_type().to_string()),
            filename: path.file_name().and_then(|n| n.to_str()).map(str::to_string),
            bytes: logo.bytes,
        })
    }

    /// Validate the upload and turn it into a [`Logo`].
    ///
    /// An empty upload means no logo was supplied and yields `None`.
    pub fn validate(self, max_bytes: u64) -> Result<Option<Logo>> {
        if self.bytes.is_empty() {
            return Ok(None);
        }

        if self.bytes.len() as u64 > max_bytes {
            return Err(PlateError::InvalidUpload {
                message: format!(
                    "Logo file size {} exceeds maximum allowed size of {} bytes",
                    self.bytes.len(),
                    max_bytes
                ),
                help: None,
            });
        }

        let kind = LogoKind::from_content_type(self.content_type.as_deref().unwrap_or(""))?;

        let filename = self
            .filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PlateError::InvalidUpload {
                message: "Logo file name is required".to_string(),
                help: None,
            })?;

        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("");
        let ext_kind = LogoKind::from_extension(ext).map_err(|_| PlateError::InvalidUpload {
            message: format!("Invalid logo file extension: {}", filename),
            help: Some("Supported: .svg, .png, .jpg, .jpeg".to_string()),
        })?;

        if ext_kind != kind {
            return Err(PlateError::InvalidUpload {
                message: format!(
                    "Logo file '{}' does not match declared content type {}",
                    filename, kind
                ),
                help: None,
            });
        }

        Ok(Some(Logo::new(kind, self.bytes)))
    }
}
