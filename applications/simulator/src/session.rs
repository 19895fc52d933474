/// Scripted headless session
///
/// Mounts the widget against a [`SimulatedSink`] and walks it through the
/// interactions a visitor would make: the first page press that unblocks
/// autoplay, opening the panel, the volume bar, tracks playing through, a
/// drag into the corner, Escape and unmount.
use crate::config::SimConfig;
use crate::error::Result;
use crate::sink::{SimulatedSink, UserActivation};
use jukebox_core::{MetadataCache, MusicCatalog, NameParsingMetadata};
use jukebox_playback::{PlayerEvent, SinkEvent, TraversalController};
use jukebox_widget::{
    HitTarget, ListenerLease, ListenerRegistry, Point, PlayerWidget, PointerButton, Size,
    WidgetKey, WidgetView,
};
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Number of tracks to play to the end
    pub plays: usize,

    /// Seed for random traversal; entropy when unset
    pub seed: Option<u64>,

    /// Details known before enrichment runs
    pub metadata: MetadataCache,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            plays: 3,
            seed: None,
            metadata: MetadataCache::new(),
        }
    }
}

/// Widget state after one scripted step
#[derive(Debug, Serialize)]
pub struct StepRecord {
    pub step: &'static str,
    pub view: WidgetView,
    pub events: Vec<PlayerEvent>,
}

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub tracks: usize,
    pub steps: Vec<StepRecord>,
    pub metadata: MetadataCache,
    pub listeners_released: bool,
}

impl SessionReport {
    pub fn step(&self, name: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|record| record.step == name)
    }
}

/// Counts page-wide drag listeners so the report can prove they were freed
#[derive(Debug, Clone, Default)]
struct PageListeners {
    active: Rc<Cell<usize>>,
}

impl ListenerRegistry for PageListeners {
    fn acquire_drag_listeners(&mut self) -> ListenerLease {
        self.active.set(self.active.get() + 1);
        debug!("Page listeners installed");

        let active = Rc::clone(&self.active);
        ListenerLease::new(move || {
            active.set(active.get().saturating_sub(1));
            debug!("Page listeners removed");
        })
    }
}

/// Load the configured catalog, or the built-in one
pub fn load_catalog(config: &SimConfig) -> Result<MusicCatalog> {
    let Some(path) = &config.session.catalog_path else {
        return Ok(MusicCatalog::builtin());
    };

    let json = std::fs::read_to_string(path)?;
    let mut catalog = MusicCatalog::new();
    let count = catalog.import_json(&json)?;
    info!("Loaded {} tracks from {}", count, path.display());
    Ok(catalog)
}

/// Load the configured metadata cache, or an empty one
pub fn load_metadata(config: &SimConfig) -> Result<MetadataCache> {
    let mut cache = MetadataCache::new();
    if let Some(path) = &config.session.metadata_path {
        let json = std::fs::read_to_string(path)?;
        let count = cache.import_json(&json)?;
        info!("Loaded {} metadata entries from {}", count, path.display());
    }
    Ok(cache)
}

struct Session {
    widget: PlayerWidget<SimulatedSink>,
    activation: UserActivation,
    widget_size: Size,
    steps: Vec<StepRecord>,
}

impl Session {
    fn record(&mut self, step: &'static str) {
        let view = self.widget.view();
        let events = self.widget.drain_events();
        info!(
            "[{}] status={:?} track={:?} open={} at ({:.0}, {:.0})",
            step,
            view.player.status,
            view.player.current_track_index,
            view.is_open,
            view.position.x,
            view.position.y
        );
        self.steps.push(StepRecord { step, view, events });
    }

    fn icon_center(&self) -> Point {
        let position = self.widget.drag_state().position;
        Point::new(
            position.x + self.widget_size.width / 2.0,
            position.y + self.widget_size.height / 2.0,
        )
    }

    async fn press(&mut self, pointer: Point, target: HitTarget) {
        self.activation.activate();
        self.widget
            .pointer_down(pointer, PointerButton::Primary, target)
            .await;
    }
}

/// Run the scripted session
pub async fn run_session(
    config: &SimConfig,
    catalog: &MusicCatalog,
    options: &SessionOptions,
) -> SessionReport {
    let activation = UserActivation::new();
    let sink = SimulatedSink::new(activation.clone(), config.session.require_activation);
    let listeners = PageListeners::default();
    let traversal = match options.seed {
        Some(seed) => TraversalController::seeded(seed),
        None => TraversalController::new(),
    };

    let widget = PlayerWidget::mount_with_traversal(
        sink,
        catalog,
        &config.widget,
        Box::new(listeners.clone()),
        config.viewport.size(),
        traversal,
    )
    .await;

    let mut session = Session {
        widget,
        activation,
        widget_size: config.widget.widget_size,
        steps: Vec::new(),
    };
    for (id, details) in options.metadata.all() {
        session.widget.metadata_mut().set(id.clone(), details.clone());
    }
    session.widget.enrich_metadata(&NameParsingMetadata).await;
    session.record("mount");

    // First interaction anywhere on the page
    let corner = Point::new(config.viewport.width - 1.0, 1.0);
    session.press(corner, HitTarget::Outside).await;
    session.record("first-gesture");

    let icon = session.icon_center();
    session.press(icon, HitTarget::Handle).await;
    session.widget.pointer_up(icon);
    session.record("open-panel");

    session.widget.volume_gesture(config.widget.volume_bar_height / 4.0);
    session.record("volume");

    let track_secs = config.session.track_secs;
    for _ in 0..options.plays {
        session
            .widget
            .sink_event(SinkEvent::LoadedMetadata {
                duration_secs: track_secs,
            })
            .await;
        session
            .widget
            .sink_event(SinkEvent::TimeUpdate(track_secs / 2.0))
            .await;
        session.record("playing");
        session.widget.sink_event(SinkEvent::Ended).await;
    }
    session.record("played-through");

    let icon = session.icon_center();
    let far = Point::new(icon.x - 10_000.0, icon.y - 10_000.0);
    session.press(icon, HitTarget::Handle).await;
    session.widget.pointer_move(far);
    session.widget.pointer_up(far);
    session.record("drag");

    session.activation.activate();
    session.widget.key_down(WidgetKey::Escape).await;
    session.record("escape");

    let Session { widget, steps, .. } = session;
    let metadata = widget.metadata().clone();
    widget.unmount();

    SessionReport {
        tracks: catalog.len(),
        steps,
        metadata,
        listeners_released: listeners.active.get() == 0,
    }
}
