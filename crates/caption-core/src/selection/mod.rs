//! Image selection: loading a picked file and deriving its local preview.
//!
//! - **validate**: signature sniffing that maps header bytes to an image MIME type
//! - **preview**: the local preview reference shown before upload

pub mod preview;
pub mod validate;

pub use preview::{PreviewGenerator, PreviewRef};
pub use validate::sniff_mime;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::LimitsConfig;
use crate::error::SelectError;

/// An image the user picked, held in memory until it is uploaded.
///
/// The bytes are shared so snapshots of the session stay cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    file_name: String,
    mime_type: String,
    path: Option<PathBuf>,
    bytes: Arc<[u8]>,
}

impl SelectedImage {
    /// Build a selection from in-memory bytes, sniffing the MIME type.
    ///
    /// Returns `None` when the bytes are not a recognized image.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let mime_type = sniff_mime(&bytes[..bytes.len().min(validate::HEADER_LEN)])?;
        Some(Self {
            file_name: file_name.into(),
            mime_type: mime_type.to_string(),
            path: None,
            bytes: bytes.into(),
        })
    }

    /// Original file name, sent on the multipart part.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Sniffed MIME type, e.g. `image/png`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Path the image was read from, if it came from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Reads picked files from disk and enforces selection limits.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    limits: LimitsConfig,
}

impl ImageLoader {
    /// Create a new loader with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Load an image file.
    ///
    /// Checks that the file exists, is within the size limit and carries an
    /// image signature.
    pub fn load(&self, path: &Path) -> Result<SelectedImage, SelectError> {
        if !path.exists() {
            return Err(SelectError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| SelectError::Read {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {e}"),
        })?;
        if !metadata.is_file() {
            return Err(SelectError::Read {
                path: path.to_path_buf(),
                message: "Not a regular file".to_string(),
            });
        }

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(SelectError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let bytes = std::fs::read(path).map_err(|e| SelectError::Read {
            path: path.to_path_buf(),
            message: format!("Cannot open file: {e}"),
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let mut image = SelectedImage::from_bytes(file_name, bytes).ok_or_else(|| {
            SelectError::NotAnImage {
                path: path.to_path_buf(),
            }
        })?;
        image.path = Some(path.to_path_buf());

        tracing::debug!(
            "Loaded {} ({}, {} bytes)",
            path.display(),
            image.mime_type,
            image.len()
        );
        Ok(image)
    }
}
