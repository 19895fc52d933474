//! Player widget - gesture routing over the controllers
//!
//! The host forwards raw input here; the widget decides which controller
//! owns it. Key presses and presses away from the transport controls count
//! as the user interaction that lets a refused autoplay retry. Transport
//! controls settle the retry through their own action.

use crate::{
    config::WidgetConfig,
    drag::{DragController, DragState, GestureOutcome, ListenerRegistry, PointerButton},
    geometry::{Point, Size},
    visibility::{VisibilityController, WidgetKey},
    volume::VolumeController,
};
use jukebox_core::{format_clock, MetadataCache, MetadataProvider, PlaylistSource, TrackDetails};
use jukebox_playback::{
    PlayOutcome, PlaybackSink, Player, PlayerEvent, PlayerState, SinkEvent, TraversalController,
    TraversalMode,
};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::info;

/// What a press landed on, as classified by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The draggable player icon
    Handle,
    /// The open panel, away from any control
    Panel,
    /// A transport button in the panel
    Control,
    /// Anywhere outside the widget
    Outside,
}

/// Transport buttons in the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportControl {
    /// Play/pause button
    TogglePlay,
    /// Next track
    Next,
    /// Previous track
    Previous,
    /// Sequential/random switch
    ToggleMode,
}

/// Everything the host needs to render the widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    /// Widget top-left
    pub position: Point,
    /// Whether the panel is open
    pub is_open: bool,
    /// Whether a press on the handle is active
    pub is_dragging: bool,
    /// Player state snapshot
    pub player: PlayerState,
    /// Display details of the current track
    pub now_playing: Option<TrackDetails>,
    /// Elapsed time as `m:ss`
    pub elapsed: String,
    /// Duration as `m:ss`
    pub total: String,
    /// Whether transport buttons are enabled
    pub transport_enabled: bool,
}

/// The draggable media-player widget
pub struct PlayerWidget<S: PlaybackSink, R: Rng = StdRng> {
    player: Player<S, R>,
    drag: DragController,
    visibility: VisibilityController,
    volume: VolumeController,
}

impl<S: PlaybackSink> PlayerWidget<S, StdRng> {
    /// Mount the widget: bind the first track and attempt autoplay
    pub async fn mount(
        sink: S,
        source: &dyn PlaylistSource,
        config: &WidgetConfig,
        registry: Box<dyn ListenerRegistry>,
        viewport: Size,
    ) -> Self {
        Self::mount_with_traversal(sink, source, config, registry, viewport, TraversalController::new())
            .await
    }
}

impl<S: PlaybackSink, R: Rng> PlayerWidget<S, R> {
    /// Mount with a specific traversal controller
    pub async fn mount_with_traversal(
        sink: S,
        source: &dyn PlaylistSource,
        config: &WidgetConfig,
        registry: Box<dyn ListenerRegistry>,
        viewport: Size,
        traversal: TraversalController<R>,
    ) -> Self {
        let mut player = Player::with_traversal(sink, source, &config.playback, traversal);
        if config.playback.autoplay {
            player.playback_mut().autoplay().await;
        }

        let drag = DragController::new(
            config.start_position(viewport),
            config.widget_size,
            viewport,
            config.drag_threshold,
            registry,
        );

        Self {
            player,
            drag,
            visibility: VisibilityController::new(),
            volume: VolumeController::new(config.volume_bar_height),
        }
    }

    // ===== Accessors =====

    /// Player
    pub fn player(&self) -> &Player<S, R> {
        &self.player
    }

    /// Drag state
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Whether the panel is open
    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    /// Render snapshot
    pub fn view(&self) -> WidgetView {
        let playback = self.player.playback();
        let state = playback.state();

        WidgetView {
            position: self.drag.position(),
            is_open: self.visibility.is_open(),
            is_dragging: self.drag.is_dragging(),
            player: state,
            now_playing: playback.now_playing(),
            elapsed: format_clock(state.current_time_secs),
            total: format_clock(state.duration_secs),
            transport_enabled: playback.transport_enabled(),
        }
    }

    /// Take pending player events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.player.drain_events()
    }

    // ===== Input =====

    /// Press anywhere on the page
    pub async fn pointer_down(&mut self, pointer: Point, button: PointerButton, target: HitTarget) {
        if target != HitTarget::Control {
            self.player.playback_mut().on_user_gesture().await;
        }

        match target {
            HitTarget::Handle => {
                self.drag.pointer_down(pointer, button);
            }
            HitTarget::Outside => {
                // Hosts classify by element; the icon itself never dismisses
                if !self.drag.hit(pointer) {
                    self.visibility
                        .on_pointer_down_outside(self.drag.is_dragging());
                }
            }
            HitTarget::Panel | HitTarget::Control => {}
        }
    }

    /// Pointer moved anywhere on the page
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        self.drag.pointer_move(pointer)
    }

    /// Pointer released anywhere; a click on the handle toggles the panel
    pub fn pointer_up(&mut self, pointer: Point) -> Option<GestureOutcome> {
        let outcome = self.drag.pointer_up(pointer)?;
        if outcome == GestureOutcome::Click {
            self.visibility.toggle();
        }
        Some(outcome)
    }

    /// Key press; counts as a user interaction for an armed retry
    pub async fn key_down(&mut self, key: WidgetKey) {
        self.player.playback_mut().on_user_gesture().await;
        self.visibility.on_key(key);
    }

    /// Transport button pressed
    pub async fn control(&mut self, control: TransportControl) -> Option<PlayOutcome> {
        match control {
            TransportControl::TogglePlay => Some(self.player.playback_mut().toggle().await),
            TransportControl::Next => self.player.next().await,
            TransportControl::Previous => self.player.previous().await,
            TransportControl::ToggleMode => {
                // The only control that does not start playback itself
                let retried = self.player.playback_mut().on_user_gesture().await;
                let mode: TraversalMode = self.player.toggle_traversal_mode();
                info!("Traversal mode set to {:?}", mode);
                retried
            }
        }
    }

    /// Press on the volume bar, `y` pixels below its top
    pub fn volume_gesture(&mut self, y: f32) -> Option<f32> {
        self.volume.apply(y, self.player.playback_mut())
    }

    /// Click on the progress bar, `x` pixels from its left edge
    pub fn progress_click(&mut self, x: f32, width: f32) {
        if width > 0.0 && x.is_finite() {
            self.player
                .playback_mut()
                .seek_fraction(f64::from(x / width));
        }
    }

    /// Notification from the platform primitive
    pub async fn sink_event(&mut self, event: SinkEvent) -> Option<PlayOutcome> {
        self.player.handle_sink_event(event).await
    }

    /// Viewport resized
    pub fn resize(&mut self, viewport: Size) {
        self.drag.set_viewport(viewport);
    }

    /// Track metadata looked up or imported so far
    pub fn metadata(&self) -> &MetadataCache {
        self.player.playback().metadata()
    }

    /// Mutable metadata cache, for importing or clearing entries
    pub fn metadata_mut(&mut self) -> &mut MetadataCache {
        self.player.playback_mut().metadata_mut()
    }

    /// Enrich track metadata, best-effort
    pub async fn enrich_metadata(&mut self, provider: &dyn MetadataProvider) {
        self.player.enrich_metadata(provider).await;
    }

    /// Stop playback and release every listener
    pub fn unmount(mut self) {
        self.drag.teardown();
        self.visibility.close();
        self.player.playback_mut().teardown();
        info!("Widget unmounted");
    }
}
