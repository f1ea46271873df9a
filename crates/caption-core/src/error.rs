//! Error types for the Caption upload client.
//!
//! Errors are split by concern: loading configuration, selecting an image,
//! and getting a caption back from the predict backend. Caption errors carry
//! a detailed message for logs and a short user-facing message for the view.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when submit is triggered with nothing selected.
pub const NO_IMAGE_MESSAGE: &str = "Please select an image first.";

/// Message shown for every transport or server-side failure.
pub const BACKEND_UNREACHABLE_MESSAGE: &str =
    "Error connecting to server. Is the backend running?";

/// Message shown when a submit is abandoned before its response arrives.
pub const CANCELLED_MESSAGE: &str = "Request cancelled. Please try again.";

/// Top-level error type for Caption operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image selection errors
    #[error("Selection error: {0}")]
    Select(#[from] SelectError),

    /// Predict request errors
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while selecting an image. The session is left untouched.
#[derive(Error, Debug)]
pub enum SelectError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File exists but could not be read
    #[error("Cannot read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// File does not carry a recognized image signature
    #[error("Not an image file: {path}")]
    NotAnImage { path: PathBuf },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },
}

/// Failures of a single submit attempt.
///
/// None of these are fatal to the session; the user re-triggers submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptionError {
    /// Submit was triggered with no image selected
    #[error("No image selected")]
    NoImageSelected,

    /// The backend could not be reached (refused, DNS, timeout, ...)
    #[error("Request to predict endpoint failed: {message}")]
    Transport { message: String },

    /// The backend answered with a non-2xx status
    #[error("Predict endpoint returned HTTP {status}: {detail}")]
    Server { status: u16, detail: String },

    /// The body was not JSON or had no usable `caption` field
    #[error("Malformed predict response: {message}")]
    MalformedResponse { message: String },

    /// The submit was dropped before the backend answered
    #[error("Predict request cancelled before a response arrived")]
    Cancelled,
}

impl CaptionError {
    /// The message placed in the session's error slot.
    ///
    /// Transport and server-side failures share one message; the detail only
    /// goes to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            CaptionError::NoImageSelected => NO_IMAGE_MESSAGE,
            CaptionError::Transport { .. }
            | CaptionError::Server { .. }
            | CaptionError::MalformedResponse { .. } => BACKEND_UNREACHABLE_MESSAGE,
            CaptionError::Cancelled => CANCELLED_MESSAGE,
        }
    }
}

/// Convenience type alias for Caption results.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_failures_share_user_message() {
        let transport = CaptionError::Transport {
            message: "connection refused".to_string(),
        };
        let server = CaptionError::Server {
            status: 500,
            detail: "boom".to_string(),
        };
        let malformed = CaptionError::MalformedResponse {
            message: "missing field `caption`".to_string(),
        };
        assert_eq!(transport.user_message(), BACKEND_UNREACHABLE_MESSAGE);
        assert_eq!(server.user_message(), BACKEND_UNREACHABLE_MESSAGE);
        assert_eq!(malformed.user_message(), BACKEND_UNREACHABLE_MESSAGE);
    }

    #[test]
    fn test_no_image_has_its_own_message() {
        assert_eq!(
            CaptionError::NoImageSelected.user_message(),
            NO_IMAGE_MESSAGE
        );
    }

    #[test]
    fn test_cancelled_has_its_own_message() {
        assert_eq!(CaptionError::Cancelled.user_message(), CANCELLED_MESSAGE);
        assert_ne!(CANCELLED_MESSAGE, BACKEND_UNREACHABLE_MESSAGE);
    }

    #[test]
    fn test_server_error_display_includes_status() {
        let err = CaptionError::Server {
            status: 400,
            detail: "No image uploaded".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("No image uploaded"));
    }
}
