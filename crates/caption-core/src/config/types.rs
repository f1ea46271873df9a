//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Endpoint the client posts images to unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";

/// Multipart field name carrying the image bytes.
pub const DEFAULT_FIELD_NAME: &str = "image";

/// Predict backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Full URL of the predict endpoint
    pub endpoint: String,

    /// Multipart field name for the image part
    pub field_name: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
        }
    }
}

/// Resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum size of a selectable image in megabytes
    pub max_file_size_mb: u64,

    /// Predict request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 20,
            request_timeout_ms: 60000,
        }
    }
}

/// Local preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Downscale the preview to a WebP thumbnail. When false, the preview
    /// references the original bytes.
    pub enabled: bool,

    /// Thumbnail size in pixels (longest edge)
    pub size: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 256,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: pretty or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
