//! Result and error types for Sondeo.
//!
//! The analyzers themselves are total; only configuration and name parsing
//! can fail.

use thiserror::Error;

/// Result type for Sondeo operations
pub type SondeoResult<T> = Result<T, SondeoError>;

/// Errors that can occur in Sondeo
#[derive(Debug, Error)]
pub enum SondeoError {
    /// Engine configuration is out of range
    #[error("Invalid configuration: {field}: {message}")]
    InvalidConfig {
        /// Offending field
        field: &'static str,
        /// Error message
        message: String,
    },

    /// Unknown failure category name
    #[error("Unknown failure category: {name}")]
    UnknownCategory {
        /// Name that failed to parse
        name: String,
    },

    /// Unknown run status name
    #[error("Unknown run status: {name}")]
    UnknownStatus {
        /// Name that failed to parse
        name: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SondeoError {
    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = SondeoError::invalid_config("trend_stable_band", "must not be negative");
        let text = err.to_string();
        assert!(text.contains("Invalid configuration"));
        assert!(text.contains("trend_stable_band"));
        assert!(text.contains("must not be negative"));
    }

    #[test]
    fn test_unknown_category_display() {
        let err = SondeoError::UnknownCategory {
            name: "cosmic_ray".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown failure category: cosmic_ray");
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: SondeoError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
