//! Local preview references.
//!
//! A preview is a `data:` URI over in-memory image data, usable as an image
//! source without uploading anything. It is owned by the session and dropped
//! when the selection changes or the session ends.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

use super::SelectedImage;
use crate::config::PreviewConfig;

/// A client-local preview of the selected image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRef {
    uri: String,
    width: Option<u32>,
    height: Option<u32>,
}

impl PreviewRef {
    /// The `data:` URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Preview dimensions, known only when the image could be decoded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }

    /// Whether the preview holds a downscaled WebP rather than the original bytes.
    pub fn is_thumbnail(&self) -> bool {
        self.uri.starts_with("data:image/webp;") && self.width.is_some()
    }
}

/// Derives preview references from selected images.
#[derive(Debug, Clone)]
pub struct PreviewGenerator {
    config: PreviewConfig,
}

impl PreviewGenerator {
    /// Create a new preview generator with the given configuration.
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// Build the preview for an image.
    ///
    /// Deterministic in the image bytes and the config. Falls back to the
    /// original bytes when thumbnails are disabled or the image can't be
    /// decoded (e.g. HEIC).
    pub fn generate(&self, image: &SelectedImage) -> PreviewRef {
        let decoded = image::load_from_memory(image.bytes()).ok();

        if self.config.enabled {
            if let Some(thumb) = decoded.as_ref().and_then(|img| self.thumbnail(img)) {
                return thumb;
            }
        }

        let (width, height) = match decoded {
            Some(img) => {
                let (w, h) = img.dimensions();
                (Some(w), Some(h))
            }
            None => {
                tracing::debug!(
                    "Cannot decode {} for preview, referencing original bytes",
                    image.file_name()
                );
                (None, None)
            }
        };

        PreviewRef {
            uri: data_uri(image.mime_type(), image.bytes()),
            width,
            height,
        }
    }

    /// Resize maintaining aspect ratio (longest edge = config.size) and encode to WebP.
    fn thumbnail(&self, image: &DynamicImage) -> Option<PreviewRef> {
        let thumbnail = image.thumbnail(self.config.size, self.config.size);
        // The WebP encoder only takes 8-bit RGB(A)
        let thumbnail = DynamicImage::ImageRgba8(thumbnail.to_rgba8());
        let (width, height) = thumbnail.dimensions();

        let mut buffer = Cursor::new(Vec::new());
        thumbnail.write_to(&mut buffer, ImageFormat::WebP).ok()?;

        Some(PreviewRef {
            uri: data_uri("image/webp", &buffer.into_inner()),
            width: Some(width),
            height: Some(height),
        })
    }
}

fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}
