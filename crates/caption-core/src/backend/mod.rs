//! The predict backend: the external service that turns an image into a caption.
//!
//! The backend is an opaque collaborator. Its contract is one multipart POST
//! answered by a JSON object whose `caption` string is the only field consumed.

pub(crate) mod http;

pub use http::HttpPredictBackend;

use crate::error::CaptionError;
use crate::selection::SelectedImage;
use async_trait::async_trait;
use serde::Deserialize;

/// Trait that predict backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the client holds a `Box<dyn PredictBackend>`).
#[async_trait]
pub trait PredictBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// The URL requests go to.
    fn endpoint(&self) -> &str;

    /// Check whether the backend answers at all.
    async fn is_available(&self) -> bool;

    /// Upload the image and return its caption.
    async fn predict(&self, image: &SelectedImage) -> Result<String, CaptionError>;
}

/// Body of a predict response. Unknown fields are ignored.
#[derive(Deserialize)]
struct PredictResponse {
    caption: Option<String>,
    error: Option<String>,
}

/// Interpret a predict response from its status code and raw body.
pub fn parse_response(status: u16, body: &str) -> Result<String, CaptionError> {
    if !(200..300).contains(&status) {
        // Surface the backend's own error field when it sent one
        let detail = serde_json::from_str::<PredictResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .unwrap_or_else(|| truncate(body, 200).to_string());
        return Err(CaptionError::Server { status, detail });
    }

    let parsed: PredictResponse =
        serde_json::from_str(body).map_err(|e| CaptionError::MalformedResponse {
            message: format!("invalid JSON: {e}"),
        })?;

    match parsed.caption {
        Some(caption) if !caption.trim().is_empty() => Ok(caption),
        Some(_) => Err(CaptionError::MalformedResponse {
            message: "caption is empty".to_string(),
        }),
        None => Err(CaptionError::MalformedResponse {
            message: "missing `caption` field".to_string(),
        }),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
