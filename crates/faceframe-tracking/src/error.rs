//! Error types for tracking operations.
//!
//! The per-tick path never fails; these cover construction, configuration
//! changes and capture finalization.

use thiserror::Error;

/// Result type for tracking operations.
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Errors that can occur at the tracking API boundary.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Invalid tracking configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Invalid {what} size: {width}x{height}")]
    InvalidSize {
        what: &'static str,
        width: f64,
        height: f64,
    },

    #[error("No photo capture in progress")]
    NoCaptureInProgress,
}

impl TrackingError {
    /// Create an invalid size error.
    pub fn invalid_size(what: &'static str, size: faceframe_models::Size) -> Self {
        Self::InvalidSize {
            what,
            width: size.width,
            height: size.height,
        }
    }
}
