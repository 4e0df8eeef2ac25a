use crate::utils::DocumentError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const LOW_QUALITY_THRESHOLD: u64 = 50_000;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";

/// Tunables for the validation pipeline. Every field has a default, so a
/// config file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    pub max_file_size: u64,
    pub allowed_mime_types: Vec<String>,
    /// Image files below this many bytes are flagged as low resolution
    pub low_quality_threshold: u64,
    /// Simulated latency of the quality check
    pub quality_latency_ms: u64,
    /// Simulated latency of the extraction service
    pub extraction_latency_ms: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            max_file_size: MAX_FILE_SIZE,
            allowed_mime_types: [MIME_PDF, MIME_DOCX, MIME_DOC, MIME_JPEG, MIME_PNG]
                .iter()
                .map(|mime| mime.to_string())
                .collect(),
            low_quality_threshold: LOW_QUALITY_THRESHOLD,
            quality_latency_ms: 0,
            extraction_latency_ms: 0,
        }
    }
}

impl ValidatorConfig {
    /// Load a JSON config file, filling unspecified fields with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let contents = std::fs::read_to_string(&path)?;
        let config: ValidatorConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), DocumentError> {
        if self.max_file_size == 0 {
            return Err(DocumentError::ConfigError(
                "maxFileSize must be greater than zero".to_string(),
            ));
        }
        if self.max_file_size > MAX_FILE_SIZE {
            return Err(DocumentError::ConfigError(format!(
                "maxFileSize may not exceed {} bytes",
                MAX_FILE_SIZE
            )));
        }
        if self.allowed_mime_types.is_empty() {
            return Err(DocumentError::ConfigError(
                "allowedMimeTypes must not be empty".to_string(),
            ));
        }
        // A config may narrow the whitelist but never widen it
        let supported = ValidatorConfig::default().allowed_mime_types;
        if let Some(unsupported) = self
            .allowed_mime_types
            .iter()
            .find(|mime| !supported.contains(mime))
        {
            return Err(DocumentError::ConfigError(format!(
                "allowedMimeTypes contains unsupported type {}",
                unsupported
            )));
        }
        Ok(())
    }

    pub fn is_allowed_mime(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|allowed| allowed == mime_type)
    }

    pub fn quality_latency(&self) -> Duration {
        Duration::from_millis(self.quality_latency_ms)
    }

    pub fn extraction_latency(&self) -> Duration {
        Duration::from_millis(self.extraction_latency_ms)
    }
}
