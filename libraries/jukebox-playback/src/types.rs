//! Core types for playback management

use crate::volume::Volume;
use serde::{Deserialize, Serialize};

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No track bound
    Idle,

    /// Track bound, waiting for playback to start
    Loading,

    /// Producing audio
    Playing,

    /// Bound but silent (user pause or rejected start)
    Paused,

    /// Current track reached its end
    Ended,

    /// Bound media cannot play; transport disabled for this track
    Error,
}

/// Policy for choosing the next and previous track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
    /// Cyclic playlist order
    Sequential,

    /// Uniform draw over the whole playlist (repeats allowed)
    #[default]
    Random,
}

impl TraversalMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Sequential => Self::Random,
            Self::Random => Self::Sequential,
        }
    }
}

/// Traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Next track
    Forward,

    /// Previous track
    Backward,
}

/// Result of a playback start attempt
///
/// Start failures are expected and handled inside the controller, so they
/// are reported as outcomes rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started
    Started,

    /// Platform refused; paused with a retry armed for the next user gesture
    Blocked,

    /// Media cannot play; track moved to the error state
    Failed,

    /// Nothing to play (empty playlist or transport disabled)
    Ignored,
}

/// Snapshot of the player state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerState {
    /// Playback status
    pub status: PlaybackStatus,

    /// Index of the bound track, `None` only for an empty playlist
    pub current_track_index: Option<usize>,

    /// Playback position in seconds
    pub current_time_secs: f64,

    /// Media duration in seconds (0 until known)
    pub duration_secs: f64,

    /// Session volume
    pub volume: Volume,

    /// Traversal policy
    pub traversal_mode: TraversalMode,
}

impl PlayerState {
    pub(crate) fn new(config: &PlaybackConfig) -> Self {
        Self {
            status: PlaybackStatus::Idle,
            current_track_index: None,
            current_time_secs: 0.0,
            duration_secs: 0.0,
            volume: config.volume,
            traversal_mode: config.traversal_mode,
        }
    }

    /// Playback progress in [0, 1] for the progress bar
    pub fn progress(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.current_time_secs / self.duration_secs).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial session volume (default: 1/3)
    pub volume: Volume,

    /// Initial traversal mode (default: Random)
    pub traversal_mode: TraversalMode,

    /// Attempt to start playback as soon as the widget mounts (default: true)
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: Volume::default(),
            traversal_mode: TraversalMode::default(),
            autoplay: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, Volume::default());
        assert_eq!(config.traversal_mode, TraversalMode::Random);
        assert!(config.autoplay);
    }

    #[test]
    fn traversal_mode_toggles() {
        assert_eq!(TraversalMode::Random.toggled(), TraversalMode::Sequential);
        assert_eq!(TraversalMode::Sequential.toggled().toggled(), TraversalMode::Sequential);
    }

    #[test]
    fn progress_handles_unknown_duration() {
        let mut state = PlayerState::new(&PlaybackConfig::default());
        assert_eq!(state.progress(), 0.0);

        state.duration_secs = 200.0;
        state.current_time_secs = 50.0;
        assert_eq!(state.progress(), 0.25);

        state.current_time_secs = 500.0;
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn config_deserializes_partial_input() {
        let config: PlaybackConfig =
            serde_json::from_str(r#"{ "traversal_mode": "sequential" }"#).unwrap();
        assert_eq!(config.traversal_mode, TraversalMode::Sequential);
        assert!(config.autoplay);

        let bad: Result<PlaybackConfig, _> = serde_json::from_str(r#"{ "volume": "loud" }"#);
        assert!(bad.is_err());
    }
}
