//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Malformed catalog entry, fatal at startup
    #[error("Invalid catalog entry at index {index}: {reason}")]
    Validation {
        /// Position of the offending record in the input
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// No track with this id exists in the catalog
    #[error("Track not found: {0}")]
    TrackNotFound(String),

    /// Internal logic error; the operation was aborted without side effects
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Catalog JSON could not be parsed
    #[error("Catalog parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlaybackError {
    pub(crate) fn validation(index: usize, reason: impl Into<String>) -> Self {
        Self::Validation {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
