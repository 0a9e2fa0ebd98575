//! Error types for drill-core.

use crate::types::Aspect;
use thiserror::Error;

/// Result type alias using DrillError.
pub type Result<T> = std::result::Result<T, DrillError>;

/// Errors raised by the review engine and its collaborators.
#[derive(Debug, Error)]
pub enum DrillError {
    #[error("no primary {aspect} answer found")]
    NoPrimaryAnswer { aspect: Aspect },

    #[error("session interrupted by user")]
    Interrupted,

    #[error("input error: {0}")]
    Input(String),

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

impl From<std::io::Error> for DrillError {
    fn from(e: std::io::Error) -> Self {
        Self::Input(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_primary() {
        let error = DrillError::NoPrimaryAnswer {
            aspect: Aspect::Reading,
        };
        assert_eq!(error.to_string(), "no primary reading answer found");
    }

    #[test]
    fn test_error_display_invalid_setting() {
        let error = DrillError::InvalidSetting {
            name: "limit",
            reason: "must be between 1 and 500".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid setting limit: must be between 1 and 500"
        );
    }

    #[test]
    fn test_io_error_maps_to_input() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin closed");
        let error: DrillError = io.into();
        assert!(matches!(error, DrillError::Input(ref msg) if msg == "stdin closed"));
    }
}
