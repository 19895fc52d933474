//! Error types for the playback sink seam

use thiserror::Error;

/// Failures reported by a playback sink
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// Platform refused to start playback (autoplay restriction)
    #[error("Playback not allowed: {0}")]
    NotAllowed(String),

    /// Start request was interrupted, e.g. by a new source being loaded
    #[error("Playback request aborted")]
    Aborted,

    /// Bound media cannot be played
    #[error("Media unsupported: {0}")]
    Unsupported(String),

    /// No media is attached to the sink
    #[error("No media attached")]
    NotAttached,
}

impl SinkError {
    /// Whether the failure is an expected, recoverable condition
    ///
    /// Recoverable failures leave the player paused with a retry armed;
    /// the rest put the current track into the error state.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotAllowed(_) | Self::Aborted)
    }
}

/// Result type for sink operations
pub type Result<T> = std::result::Result<T, SinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoplay_rejection_is_recoverable() {
        assert!(SinkError::NotAllowed("gesture required".into()).is_recoverable());
        assert!(SinkError::Aborted.is_recoverable());
        assert!(!SinkError::Unsupported("codec".into()).is_recoverable());
        assert!(!SinkError::NotAttached.is_recoverable());
    }
}
