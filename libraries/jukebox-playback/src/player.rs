//! Player - playback plus traversal
//!
//! Wires the "ended" notification to traversal so every accepted end of
//! track advances exactly once.

use crate::{
    controller::PlaybackController,
    events::PlayerEvent,
    sink::{PlaybackSink, SinkEvent},
    traversal::TraversalController,
    types::{Direction, PlayOutcome, PlaybackConfig, PlayerState, TraversalMode},
};
use jukebox_core::{MetadataProvider, PlaylistSource};
use rand::rngs::StdRng;
use rand::Rng;

/// Playback controller and traversal controller working together
pub struct Player<S: PlaybackSink, R: Rng = StdRng> {
    playback: PlaybackController<S>,
    traversal: TraversalController<R>,
}

impl<S: PlaybackSink> Player<S, StdRng> {
    /// Create a player over `source`, binding its first track
    pub fn new(sink: S, source: &dyn PlaylistSource, config: &PlaybackConfig) -> Self {
        Self::with_traversal(sink, source, config, TraversalController::new())
    }
}

impl<S: PlaybackSink, R: Rng> Player<S, R> {
    /// Create a player with a specific traversal controller
    pub fn with_traversal(
        sink: S,
        source: &dyn PlaylistSource,
        config: &PlaybackConfig,
        traversal: TraversalController<R>,
    ) -> Self {
        Self {
            playback: PlaybackController::new(sink, source, config),
            traversal,
        }
    }

    /// Playback controller
    pub fn playback(&self) -> &PlaybackController<S> {
        &self.playback
    }

    /// Mutable playback controller
    pub fn playback_mut(&mut self) -> &mut PlaybackController<S> {
        &mut self.playback
    }

    /// Snapshot of the player state
    pub fn state(&self) -> PlayerState {
        self.playback.state()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.playback.drain_events()
    }

    /// Enrich track metadata, best-effort
    pub async fn enrich_metadata(&mut self, provider: &dyn MetadataProvider) {
        self.playback.enrich_metadata(provider).await;
    }

    /// Switch to the next track per the traversal mode
    pub async fn next(&mut self) -> Option<PlayOutcome> {
        self.traversal.next(&mut self.playback).await
    }

    /// Switch to the previous track per the traversal mode
    pub async fn previous(&mut self) -> Option<PlayOutcome> {
        self.traversal.previous(&mut self.playback).await
    }

    /// Change the traversal mode
    pub fn set_traversal_mode(&mut self, mode: TraversalMode) {
        self.traversal.set_traversal_mode(&mut self.playback, mode);
    }

    /// Flip the traversal mode
    pub fn toggle_traversal_mode(&mut self) -> TraversalMode {
        self.traversal.toggle_traversal_mode(&mut self.playback)
    }

    /// Forward a sink notification
    ///
    /// An accepted `Ended` advances forward exactly once and returns the
    /// outcome of starting the next track.
    pub async fn handle_sink_event(&mut self, event: SinkEvent) -> Option<PlayOutcome> {
        if self.playback.handle_sink_event(event) {
            self.traversal
                .advance(&mut self.playback, Direction::Forward)
                .await
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedSink;
    use crate::types::PlaybackStatus;
    use jukebox_core::Track;

    fn tracks(names: &[&str]) -> Vec<Track> {
        names
            .iter()
            .map(|n| Track::from_entry(n, &format!("https://cdn.example.org/{n}.mp3")))
            .collect()
    }

    fn sequential() -> PlaybackConfig {
        PlaybackConfig {
            traversal_mode: TraversalMode::Sequential,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn three_nexts_return_to_start() {
        let (sink, _probe) = ScriptedSink::new();
        let mut player = Player::new(sink, &tracks(&["A", "B", "C"]), &sequential());

        for expected in [1, 2, 0] {
            player.next().await;
            assert_eq!(player.state().current_track_index, Some(expected));
        }
    }

    #[tokio::test]
    async fn previous_wraps_to_last() {
        let (sink, _probe) = ScriptedSink::new();
        let mut player = Player::new(sink, &tracks(&["A", "B", "C"]), &sequential());

        player.previous().await;
        assert_eq!(player.state().current_track_index, Some(2));
    }

    #[tokio::test]
    async fn ended_advances_once() {
        let (sink, probe) = ScriptedSink::new();
        let mut player = Player::new(sink, &tracks(&["A", "B", "C"]), &sequential());
        player.playback_mut().play().await;
        let attaches_before = probe.attach_calls();

        let outcome = player.handle_sink_event(SinkEvent::Ended).await;

        assert_eq!(outcome, Some(PlayOutcome::Started));
        assert_eq!(probe.attach_calls(), attaches_before + 1);
        assert_eq!(player.state().current_track_index, Some(1));
        assert_eq!(player.state().status, PlaybackStatus::Playing);
    }

    #[tokio::test]
    async fn non_ended_events_do_not_advance() {
        let (sink, probe) = ScriptedSink::new();
        let mut player = Player::new(sink, &tracks(&["A", "B"]), &sequential());

        for event in [
            SinkEvent::TimeUpdate(3.0),
            SinkEvent::LoadedMetadata { duration_secs: 10.0 },
            SinkEvent::Playing,
            SinkEvent::Paused,
        ] {
            assert_eq!(player.handle_sink_event(event).await, None);
        }
        assert_eq!(probe.attach_calls(), 1);
    }

    #[tokio::test]
    async fn mode_change_leaves_playback_alone() {
        let (sink, probe) = ScriptedSink::new();
        let mut player = Player::new(sink, &tracks(&["A", "B"]), &sequential());
        player.playback_mut().play().await;

        assert_eq!(player.toggle_traversal_mode(), TraversalMode::Random);
        assert_eq!(player.state().status, PlaybackStatus::Playing);
        assert_eq!(player.state().current_track_index, Some(0));
        assert_eq!(probe.attach_calls(), 1);
    }

    #[tokio::test]
    async fn empty_player_ignores_everything() {
        let (sink, probe) = ScriptedSink::new();
        let empty: Vec<Track> = Vec::new();
        let mut player = Player::new(sink, &empty, &sequential());
        let before = player.state();

        assert_eq!(player.next().await, None);
        assert_eq!(player.previous().await, None);
        assert_eq!(player.handle_sink_event(SinkEvent::Ended).await, None);
        assert_eq!(player.state(), before);
        assert_eq!(probe.attach_calls(), 0);
    }
}
