//! Playback controller - owns the sink and the player state
//!
//! All mutation of [`PlayerState`] goes through this type. Start requests are
//! asynchronous and may be refused by the platform; a refusal leaves the
//! player paused and arms a single retry that the next user gesture consumes.

use crate::{
    events::PlayerEvent,
    sink::{PlaybackSink, SinkEvent},
    types::{PlayOutcome, PlaybackConfig, PlaybackStatus, PlayerState, TraversalMode},
    volume::Volume,
};
use jukebox_core::{MetadataCache, MetadataProvider, PlaylistSource, Track, TrackDetails};
use tracing::{debug, info, warn};

/// Single-owner playback orchestration
///
/// Owns exactly one sink. Binding a new track always detaches the previous
/// source first, so two sources never play at once.
pub struct PlaybackController<S: PlaybackSink> {
    sink: S,
    playlist: Vec<Track>,
    state: PlayerState,

    // Whether a source is currently attached to the sink
    bound: bool,

    // Set by a refused start; consumed by the next user gesture
    retry_armed: bool,

    // Index of the track whose media failed
    failed_index: Option<usize>,

    metadata: MetadataCache,
    pending_events: Vec<PlayerEvent>,
}

impl<S: PlaybackSink> PlaybackController<S> {
    /// Create a controller and bind the first track of the playlist, if any
    pub fn new(sink: S, source: &dyn PlaylistSource, config: &PlaybackConfig) -> Self {
        let playlist = source.tracks();
        info!("Player mounted with {} tracks", playlist.len());

        let mut controller = Self {
            sink,
            playlist,
            state: PlayerState::new(config),
            bound: false,
            retry_armed: false,
            failed_index: None,
            metadata: MetadataCache::new(),
            pending_events: Vec::new(),
        };

        if !controller.playlist.is_empty() {
            controller.bind(0);
        }

        controller
    }

    // ===== Accessors =====

    /// Snapshot of the player state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Playback status
    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    /// Session playlist
    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    /// Currently bound track
    pub fn current_track(&self) -> Option<&Track> {
        self.state
            .current_track_index
            .and_then(|index| self.playlist.get(index))
    }

    /// Whether play/pause/seek currently act on the sink
    pub fn transport_enabled(&self) -> bool {
        self.bound && self.state.status != PlaybackStatus::Error
    }

    /// Whether a refused start is waiting for a user gesture
    pub fn is_retry_armed(&self) -> bool {
        self.retry_armed
    }

    /// Display details of the current track
    ///
    /// Falls back to the details parsed from the track itself until metadata
    /// enrichment has run. The duration is the one reported by the sink.
    pub fn now_playing(&self) -> Option<TrackDetails> {
        let track = self.current_track()?;
        let mut details = self
            .metadata
            .get(track.id())
            .cloned()
            .unwrap_or_else(|| TrackDetails::of(track));

        if self.state.duration_secs > 0.0 {
            details.duration_secs = self.state.duration_secs;
        }
        Some(details)
    }

    /// Metadata cache filled by enrichment
    pub fn metadata(&self) -> &MetadataCache {
        &self.metadata
    }

    /// Mutable metadata cache, for seeding or clearing it
    ///
    /// Tracks already cached are skipped by [`Self::enrich_metadata`].
    pub fn metadata_mut(&mut self) -> &mut MetadataCache {
        &mut self.metadata
    }

    /// Sink, for hosts that need to inspect their own primitive
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Binding =====

    /// Attach a playlist track to the sink
    ///
    /// Resets the position, re-applies the session volume and moves to
    /// `Loading`. Returns `false` when the index is out of range or names the
    /// track whose media already failed.
    pub fn bind(&mut self, index: usize) -> bool {
        let Some(track) = self.playlist.get(index) else {
            warn!("Ignoring bind to out-of-range index {}", index);
            return false;
        };

        if self.failed_index == Some(index) {
            debug!("Track {} failed earlier; keeping transport disabled", track.id());
            return false;
        }

        let track_id = track.id().clone();
        let locator = track.source_locator().to_string();

        if self.bound {
            self.sink.detach();
        }
        self.sink.attach(&locator);
        self.sink.set_volume(self.state.volume.get());
        self.bound = true;
        self.failed_index = None;

        self.state.current_track_index = Some(index);
        self.state.current_time_secs = 0.0;
        self.state.duration_secs = 0.0;

        debug!("Bound track {} ({})", index, track_id);
        self.pending_events
            .push(PlayerEvent::TrackChanged { index, track_id });
        self.set_status(PlaybackStatus::Loading);
        true
    }

    /// Bind a track and try to start it
    ///
    /// Switching always attempts playback, even if the player was paused.
    pub async fn switch_track(&mut self, index: usize) -> PlayOutcome {
        self.retry_armed = false;
        if !self.bind(index) {
            return PlayOutcome::Ignored;
        }
        self.attempt_play().await
    }

    // ===== Transport =====

    /// Attempt the mount-time autoplay
    pub async fn autoplay(&mut self) -> PlayOutcome {
        self.attempt_play().await
    }

    /// Request playback start
    pub async fn play(&mut self) -> PlayOutcome {
        self.retry_armed = false;
        self.attempt_play().await
    }

    /// Stop playback, keeping the position
    pub fn pause(&mut self) {
        if !self.transport_enabled() {
            return;
        }
        self.retry_armed = false;
        self.sink.pause();
        self.set_status(PlaybackStatus::Paused);
    }

    /// Pause when playing, otherwise play
    pub async fn toggle(&mut self) -> PlayOutcome {
        if self.state.status == PlaybackStatus::Playing {
            self.pause();
            PlayOutcome::Ignored
        } else {
            self.play().await
        }
    }

    /// Seek to a position, clamped to the known duration
    pub fn seek(&mut self, seconds: f64) {
        if !self.transport_enabled() || !seconds.is_finite() {
            return;
        }

        let target = seconds.clamp(0.0, self.state.duration_secs.max(0.0));
        self.sink.set_position(target);
        self.state.current_time_secs = target;
    }

    /// Seek to a fraction of the duration (progress-bar click)
    ///
    /// No-op while the duration is unknown.
    pub fn seek_fraction(&mut self, fraction: f64) {
        if self.state.duration_secs <= 0.0 || !fraction.is_finite() {
            return;
        }
        self.seek(fraction.clamp(0.0, 1.0) * self.state.duration_secs);
    }

    /// Set the session volume; survives track switches
    ///
    /// Values are clamped to [0, 1]; non-finite values are ignored.
    pub fn set_volume(&mut self, volume: f32) {
        let Some(volume) = Volume::new(volume) else {
            warn!("Ignoring non-finite volume {}", volume);
            return;
        };

        self.state.volume = volume;
        self.sink.set_volume(volume.get());
        self.pending_events.push(PlayerEvent::VolumeChanged {
            volume: volume.get(),
        });
    }

    pub(crate) fn set_traversal_mode(&mut self, mode: TraversalMode) {
        if self.state.traversal_mode == mode {
            return;
        }
        self.state.traversal_mode = mode;
        self.pending_events
            .push(PlayerEvent::TraversalModeChanged { mode });
    }

    // ===== Gesture-driven retry =====

    /// Notify the controller of a user interaction anywhere on the page
    ///
    /// Consumes an armed retry and makes exactly one new start attempt.
    /// Returns `None` when no retry was armed.
    pub async fn on_user_gesture(&mut self) -> Option<PlayOutcome> {
        if !self.retry_armed {
            return None;
        }
        self.retry_armed = false;
        info!("User gesture received; retrying playback start");
        Some(self.attempt_play().await)
    }

    // ===== Sink notifications =====

    /// Apply a notification from the sink
    ///
    /// Returns `true` when the event ended the current track; the caller is
    /// then responsible for advancing exactly once.
    pub fn handle_sink_event(&mut self, event: SinkEvent) -> bool {
        match event {
            SinkEvent::TimeUpdate(seconds) => {
                if seconds.is_finite() && self.bound {
                    self.state.current_time_secs = seconds.max(0.0);
                }
                false
            }
            SinkEvent::LoadedMetadata { duration_secs } => {
                if duration_secs.is_finite() && duration_secs >= 0.0 && self.bound {
                    self.state.duration_secs = duration_secs;
                    self.sink.set_volume(self.state.volume.get());
                }
                false
            }
            SinkEvent::Playing => {
                if self.transport_enabled() {
                    self.set_status(PlaybackStatus::Playing);
                }
                false
            }
            SinkEvent::Paused => {
                if self.transport_enabled() && self.state.status == PlaybackStatus::Playing {
                    self.set_status(PlaybackStatus::Paused);
                }
                false
            }
            SinkEvent::Ended => self.finish_track(),
            SinkEvent::Error(message) => {
                self.fail(message);
                false
            }
        }
    }

    // ===== Metadata =====

    /// Fill the display cache from a metadata provider
    ///
    /// Best-effort: failures are logged and replaced by the unknown fallback.
    /// Transport stays usable throughout.
    pub async fn enrich_metadata(&mut self, provider: &dyn MetadataProvider) {
        for track in &self.playlist {
            if self.metadata.contains(track.id()) {
                continue;
            }

            let details = match provider.details(track).await {
                Ok(details) => details,
                Err(e) => {
                    warn!("Metadata lookup failed for {}: {}", track.id(), e);
                    TrackDetails::unknown()
                }
            };
            self.metadata.set(track.id().clone(), details);
        }
    }

    // ===== Teardown =====

    /// Stop playback and release the sink binding
    pub fn teardown(&mut self) {
        self.retry_armed = false;
        if self.bound {
            self.sink.pause();
            self.sink.detach();
            self.bound = false;
            info!("Player torn down");
        }
        self.set_status(PlaybackStatus::Idle);
    }

    // ===== Internals =====

    async fn attempt_play(&mut self) -> PlayOutcome {
        if !self.transport_enabled() {
            return PlayOutcome::Ignored;
        }

        match self.sink.play().await {
            Ok(()) => {
                self.set_status(PlaybackStatus::Playing);
                PlayOutcome::Started
            }
            Err(e) if e.is_recoverable() => {
                warn!("Playback start refused, waiting for a user gesture: {}", e);
                self.retry_armed = true;
                self.pending_events.push(PlayerEvent::AutoplayBlocked {
                    reason: e.to_string(),
                });
                self.set_status(PlaybackStatus::Paused);
                PlayOutcome::Blocked
            }
            Err(e) => {
                self.fail(e.to_string());
                PlayOutcome::Failed
            }
        }
    }

    fn finish_track(&mut self) -> bool {
        if !self.transport_enabled() {
            return false;
        }
        let Some(track_id) = self.current_track().map(|t| t.id().clone()) else {
            return false;
        };

        self.state.current_time_secs = 0.0;
        self.pending_events
            .push(PlayerEvent::TrackFinished { track_id });
        self.set_status(PlaybackStatus::Ended);
        true
    }

    fn fail(&mut self, message: String) {
        if !self.bound {
            return;
        }
        warn!("Playback failed: {}", message);
        self.retry_armed = false;
        self.failed_index = self.state.current_track_index;
        self.pending_events.push(PlayerEvent::Error { message });
        self.set_status(PlaybackStatus::Error);
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.state.status != status {
            self.state.status = status;
            self.pending_events
                .push(PlayerEvent::StatusChanged { status });
        }
    }
}

impl<S: PlaybackSink> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        if self.bound {
            self.sink.pause();
            self.sink.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::testing::ScriptedSink;

    fn playlist(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| {
                Track::from_entry(
                    &format!("Artist {i} - Song {i}"),
                    &format!("https://cdn.example.org/{i}.mp3"),
                )
            })
            .collect()
    }

    fn controller(n: usize) -> (PlaybackController<ScriptedSink>, crate::testing::SinkProbe) {
        let (sink, probe) = ScriptedSink::new();
        let controller = PlaybackController::new(sink, &playlist(n), &PlaybackConfig::default());
        (controller, probe)
    }

    #[test]
    fn mount_binds_first_track() {
        let (controller, probe) = controller(3);
        assert_eq!(controller.state().current_track_index, Some(0));
        assert_eq!(controller.status(), PlaybackStatus::Loading);
        assert_eq!(probe.attached(), vec!["https://cdn.example.org/0.mp3"]);
        assert_eq!(probe.last_volume(), Some(Volume::default().get()));
    }

    #[test]
    fn empty_playlist_stays_idle() {
        let (controller, probe) = controller(0);
        assert_eq!(controller.state().current_track_index, None);
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert!(probe.attached().is_empty());
    }

    #[tokio::test]
    async fn empty_playlist_transport_is_noop() {
        let (mut controller, probe) = controller(0);
        assert_eq!(controller.play().await, PlayOutcome::Ignored);
        controller.pause();
        controller.seek(10.0);
        assert_eq!(controller.toggle().await, PlayOutcome::Ignored);
        assert_eq!(probe.play_calls(), 0);
        assert_eq!(controller.status(), PlaybackStatus::Idle);
    }

    #[tokio::test]
    async fn play_success_moves_to_playing() {
        let (mut controller, _probe) = controller(2);
        assert_eq!(controller.play().await, PlayOutcome::Started);
        assert_eq!(controller.status(), PlaybackStatus::Playing);
    }

    #[tokio::test]
    async fn refused_play_pauses_and_arms_retry() {
        let (mut controller, probe) = controller(2);
        probe.reject_next_play(SinkError::NotAllowed("no gesture yet".into()));

        assert_eq!(controller.autoplay().await, PlayOutcome::Blocked);
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert!(controller.is_retry_armed());

        let events = controller.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, PlayerEvent::AutoplayBlocked { .. })));
    }

    #[tokio::test]
    async fn gesture_retries_exactly_once() {
        let (mut controller, probe) = controller(2);
        probe.reject_next_play(SinkError::NotAllowed("no gesture yet".into()));
        controller.autoplay().await;

        assert_eq!(controller.on_user_gesture().await, Some(PlayOutcome::Started));
        assert_eq!(controller.status(), PlaybackStatus::Playing);
        assert_eq!(controller.on_user_gesture().await, None);
        assert_eq!(probe.play_calls(), 2);
    }

    #[tokio::test]
    async fn explicit_pause_disarms_retry() {
        let (mut controller, probe) = controller(1);
        probe.reject_next_play(SinkError::NotAllowed("no gesture yet".into()));
        controller.autoplay().await;

        controller.pause();
        assert!(!controller.is_retry_armed());
        assert_eq!(controller.on_user_gesture().await, None);
    }

    #[tokio::test]
    async fn toggle_flips_between_playing_and_paused() {
        let (mut controller, probe) = controller(1);
        controller.toggle().await;
        assert_eq!(controller.status(), PlaybackStatus::Playing);
        controller.toggle().await;
        assert_eq!(controller.status(), PlaybackStatus::Paused);
        assert_eq!(probe.pause_calls(), 1);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let (mut controller, probe) = controller(1);
        controller.handle_sink_event(SinkEvent::LoadedMetadata { duration_secs: 120.0 });

        controller.seek(500.0);
        assert_eq!(controller.state().current_time_secs, 120.0);
        controller.seek(-4.0);
        assert_eq!(controller.state().current_time_secs, 0.0);
        controller.seek(30.0);
        assert_eq!(probe.last_position(), Some(30.0));
    }

    #[test]
    fn seek_fraction_needs_duration() {
        let (mut controller, probe) = controller(1);
        controller.seek_fraction(0.5);
        assert_eq!(probe.last_position(), None);

        controller.handle_sink_event(SinkEvent::LoadedMetadata { duration_secs: 200.0 });
        controller.seek_fraction(0.25);
        assert_eq!(probe.last_position(), Some(50.0));
    }

    #[tokio::test]
    async fn volume_survives_track_switch() {
        let (mut controller, probe) = controller(3);
        controller.set_volume(0.8);
        controller.switch_track(2).await;

        assert_eq!(controller.state().volume.get(), 0.8);
        assert_eq!(probe.last_volume(), Some(0.8));
    }

    #[test]
    fn volume_is_clamped_and_nan_ignored() {
        let (mut controller, _probe) = controller(1);
        controller.set_volume(3.0);
        assert_eq!(controller.state().volume.get(), 1.0);
        controller.set_volume(f32::NAN);
        assert_eq!(controller.state().volume.get(), 1.0);
    }

    #[tokio::test]
    async fn switch_resumes_even_when_paused() {
        let (mut controller, probe) = controller(3);
        controller.play().await;
        controller.pause();

        assert_eq!(controller.switch_track(1).await, PlayOutcome::Started);
        assert_eq!(controller.status(), PlaybackStatus::Playing);
        assert_eq!(controller.state().current_track_index, Some(1));
        assert_eq!(probe.active_bindings(), 1);
    }

    #[tokio::test]
    async fn sink_error_disables_transport_until_other_track() {
        let (mut controller, probe) = controller(2);
        controller.handle_sink_event(SinkEvent::Error("decode failed".into()));
        assert_eq!(controller.status(), PlaybackStatus::Error);
        assert!(!controller.transport_enabled());

        assert_eq!(controller.play().await, PlayOutcome::Ignored);
        assert_eq!(controller.switch_track(0).await, PlayOutcome::Ignored);
        assert_eq!(controller.status(), PlaybackStatus::Error);

        assert_eq!(controller.switch_track(1).await, PlayOutcome::Started);
        assert_eq!(controller.status(), PlaybackStatus::Playing);
        assert_eq!(probe.play_calls(), 1);
    }

    #[tokio::test]
    async fn unsupported_media_on_play_is_sink_failure() {
        let (mut controller, probe) = controller(2);
        probe.reject_next_play(SinkError::Unsupported("codec".into()));

        assert_eq!(controller.play().await, PlayOutcome::Failed);
        assert_eq!(controller.status(), PlaybackStatus::Error);
        assert!(!controller.is_retry_armed());
    }

    #[tokio::test]
    async fn ended_reports_once_and_resets_position() {
        let (mut controller, _probe) = controller(2);
        controller.play().await;
        controller.handle_sink_event(SinkEvent::TimeUpdate(42.0));

        assert!(controller.handle_sink_event(SinkEvent::Ended));
        assert_eq!(controller.status(), PlaybackStatus::Ended);
        assert_eq!(controller.state().current_time_secs, 0.0);
    }

    #[test]
    fn ended_ignored_after_failure() {
        let (mut controller, _probe) = controller(1);
        controller.handle_sink_event(SinkEvent::Error("gone".into()));
        assert!(!controller.handle_sink_event(SinkEvent::Ended));
    }

    #[test]
    fn external_play_pause_sync_status() {
        let (mut controller, _probe) = controller(1);
        controller.handle_sink_event(SinkEvent::Playing);
        assert_eq!(controller.status(), PlaybackStatus::Playing);
        controller.handle_sink_event(SinkEvent::Paused);
        assert_eq!(controller.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn teardown_releases_sink() {
        let (mut controller, probe) = controller(2);
        controller.teardown();
        assert_eq!(probe.active_bindings(), 0);
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert!(!controller.transport_enabled());
    }

    #[test]
    fn drop_releases_sink() {
        let (controller, probe) = controller(2);
        drop(controller);
        assert_eq!(probe.active_bindings(), 0);
    }

    #[test]
    fn now_playing_uses_parsed_names_and_sink_duration() {
        let (mut controller, _probe) = controller(1);
        controller.handle_sink_event(SinkEvent::LoadedMetadata { duration_secs: 95.0 });

        let details = controller.now_playing().unwrap();
        assert_eq!(details.artist, "Artist 0");
        assert_eq!(details.title, "Song 0");
        assert_eq!(details.duration_secs, 95.0);
    }

    #[tokio::test]
    async fn seeded_metadata_wins_over_enrichment() {
        let (mut controller, _probe) = controller(2);
        let id = controller.playlist()[0].id().clone();
        controller.metadata_mut().set(
            id,
            TrackDetails {
                title: "Imported".to_string(),
                artist: "Cache".to_string(),
                duration_secs: 0.0,
            },
        );

        controller
            .enrich_metadata(&jukebox_core::NameParsingMetadata)
            .await;

        assert_eq!(controller.metadata().len(), 2);
        assert_eq!(controller.now_playing().unwrap().title, "Imported");

        controller.metadata_mut().clear();
        assert_eq!(controller.now_playing().unwrap().title, "Song 0");
    }
}
