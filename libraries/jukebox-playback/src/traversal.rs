//! Playlist traversal
//!
//! Resolves next/previous targets per [`TraversalMode`] and hands them to the
//! playback controller. Random mode draws uniformly over the whole playlist,
//! so the current track may repeat.

use crate::{
    controller::PlaybackController,
    sink::PlaybackSink,
    types::{Direction, PlayOutcome, TraversalMode},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Computes and applies traversal targets
#[derive(Debug)]
pub struct TraversalController<R: Rng = StdRng> {
    rng: R,
}

impl TraversalController<StdRng> {
    /// Create a controller seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a controller with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for TraversalController<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TraversalController<R> {
    /// Create a controller drawing from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Resolve the target index without touching playback
    ///
    /// Returns `None` for an empty playlist.
    pub fn target(
        &mut self,
        mode: TraversalMode,
        current: Option<usize>,
        len: usize,
        direction: Direction,
    ) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let index = match mode {
            TraversalMode::Random => self.rng.gen_range(0..len),
            TraversalMode::Sequential => {
                let current = current.unwrap_or(0) % len;
                match direction {
                    Direction::Forward => (current + 1) % len,
                    Direction::Backward => (current + len - 1) % len,
                }
            }
        };
        Some(index)
    }

    /// Switch to the next track
    pub async fn next<S: PlaybackSink>(
        &mut self,
        playback: &mut PlaybackController<S>,
    ) -> Option<PlayOutcome> {
        self.advance(playback, Direction::Forward).await
    }

    /// Switch to the previous track
    pub async fn previous<S: PlaybackSink>(
        &mut self,
        playback: &mut PlaybackController<S>,
    ) -> Option<PlayOutcome> {
        self.advance(playback, Direction::Backward).await
    }

    /// Resolve the target for `direction` and switch to it
    ///
    /// No-op on an empty playlist.
    pub async fn advance<S: PlaybackSink>(
        &mut self,
        playback: &mut PlaybackController<S>,
        direction: Direction,
    ) -> Option<PlayOutcome> {
        let state = playback.state();
        let target = self.target(
            state.traversal_mode,
            state.current_track_index,
            playback.playlist().len(),
            direction,
        )?;

        debug!("Advancing {:?} to track {}", direction, target);
        Some(playback.switch_track(target).await)
    }

    /// Change the traversal policy; current playback is unaffected
    pub fn set_traversal_mode<S: PlaybackSink>(
        &self,
        playback: &mut PlaybackController<S>,
        mode: TraversalMode,
    ) {
        playback.set_traversal_mode(mode);
    }

    /// Flip between sequential and random
    pub fn toggle_traversal_mode<S: PlaybackSink>(
        &self,
        playback: &mut PlaybackController<S>,
    ) -> TraversalMode {
        let mode = playback.state().traversal_mode.toggled();
        playback.set_traversal_mode(mode);
        mode
    }
}
