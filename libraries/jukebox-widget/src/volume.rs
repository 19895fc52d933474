//! Vertical volume bar
//!
//! The top of the bar is full volume, the bottom is silence.

use jukebox_playback::{PlaybackController, PlaybackSink};

/// Maps a vertical gesture on the volume bar to a volume fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeController {
    region_height: f32,
}

impl VolumeController {
    /// Create a controller for a bar of `region_height` pixels
    pub fn new(region_height: f32) -> Self {
        Self { region_height }
    }

    /// Volume for a gesture `y` pixels below the top of the bar
    ///
    /// `clamp(1 - y / H, 0, 1)`. Returns `None` for a degenerate bar or a
    /// non-finite position.
    pub fn fraction_at(&self, y: f32) -> Option<f32> {
        let height = self.region_height;
        if !height.is_finite() || height <= 0.0 || !y.is_finite() {
            return None;
        }
        Some((1.0 - y / height).clamp(0.0, 1.0))
    }

    /// Apply the volume for `y` to the playback controller
    pub fn apply<S: PlaybackSink>(
        &self,
        y: f32,
        playback: &mut PlaybackController<S>,
    ) -> Option<f32> {
        let fraction = self.fraction_at(y)?;
        playback.set_volume(fraction);
        Some(fraction)
    }
}
