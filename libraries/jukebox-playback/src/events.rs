//! Player Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as state changes; the host drains them after each callback and
//! re-renders.

use crate::types::{PlaybackStatus, TraversalMode};
use jukebox_core::TrackId;
use serde::Serialize;

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlayerEvent {
    /// Playback status changed
    StatusChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// A different track was bound
    TrackChanged {
        /// Playlist index of the new track
        index: usize,
        /// ID of the new track
        track_id: TrackId,
    },

    /// Track finished playing naturally
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Session volume changed
    VolumeChanged {
        /// New volume fraction
        volume: f32,
    },

    /// Traversal mode changed
    TraversalModeChanged {
        /// New mode
        mode: TraversalMode,
    },

    /// Playback start was refused; waiting for a user gesture
    AutoplayBlocked {
        /// Platform-provided reason
        reason: String,
    },

    /// Bound media failed
    Error {
        /// Error message
        message: String,
    },
}
