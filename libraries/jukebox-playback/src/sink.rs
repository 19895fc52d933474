//! Platform-agnostic playback sink trait
//!
//! The widget never decodes audio. The host wraps its platform primitive
//! (an audio element, a native player) in a `PlaybackSink` and forwards the
//! primitive's notifications as [`SinkEvent`]s.

use crate::error::Result;
use async_trait::async_trait;

/// Platform playback primitive
///
/// Exactly one source is attached at a time. `attach` is only called after
/// `detach` for the previous source.
#[async_trait(?Send)]
pub trait PlaybackSink {
    /// Attach a media locator
    fn attach(&mut self, locator: &str);

    /// Detach the current media, silencing it
    fn detach(&mut self);

    /// Request playback start
    ///
    /// Resolves once the platform has accepted or rejected the request.
    async fn play(&mut self) -> Result<()>;

    /// Stop producing audio, keeping the position
    fn pause(&mut self);

    /// Move the playback position
    fn set_position(&mut self, seconds: f64);

    /// Apply a volume fraction in [0, 1]
    fn set_volume(&mut self, volume: f32);
}

/// Notifications the host forwards from its playback primitive
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    /// Playback position advanced
    TimeUpdate(f64),

    /// Media metadata became available
    LoadedMetadata {
        /// Media duration in seconds
        duration_secs: f64,
    },

    /// Playback started outside the controller (e.g. OS media keys)
    Playing,

    /// Playback paused outside the controller
    Paused,

    /// Media reached its end
    Ended,

    /// Media failed to load or decode
    Error(String),
}
