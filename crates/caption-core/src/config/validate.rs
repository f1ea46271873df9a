//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.backend.endpoint).map_err(|e| {
            ConfigError::ValidationError(format!(
                "backend.endpoint is not a valid URL ({}): {e}",
                self.backend.endpoint
            ))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::ValidationError(format!(
                "backend.endpoint must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.backend.field_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend.field_name must not be empty".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.request_timeout_ms must be > 0".into(),
            ));
        }
        if self.preview.size == 0 {
            return Err(ConfigError::ValidationError(
                "preview.size must be > 0".into(),
            ));
        }
        Ok(())
    }
}
