//! Jukebox - Player Widget
//!
//! Headless control logic for the draggable media-player widget: drag and
//! position clamping, panel visibility, the volume bar, and routing of
//! page input to the playback controllers.
//!
//! Rendering stays with the host. The host forwards pointer, key and sink
//! notifications, then renders [`WidgetView`] and drains player events.
//!
//! ```rust
//! use jukebox_core::MusicCatalog;
//! use jukebox_playback::testing::ScriptedSink;
//! use jukebox_widget::{
//!     HitTarget, NoopRegistry, Point, PlayerWidget, PointerButton, Size, WidgetConfig,
//! };
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let (sink, _probe) = ScriptedSink::new();
//! let mut widget = PlayerWidget::mount(
//!     sink,
//!     &MusicCatalog::builtin(),
//!     &WidgetConfig::default(),
//!     Box::new(NoopRegistry),
//!     Size::new(1280.0, 800.0),
//! )
//! .await;
//!
//! // Click the icon to open the panel
//! let icon = Point::new(40.0, 660.0);
//! widget.pointer_down(icon, PointerButton::Primary, HitTarget::Handle).await;
//! widget.pointer_up(icon);
//! assert!(widget.view().is_open);
//! # });
//! ```

pub mod config;
pub mod drag;
pub mod geometry;
pub mod visibility;
pub mod volume;
pub mod widget;

pub use config::WidgetConfig;
pub use drag::{
    DragController, DragState, GestureOutcome, ListenerLease, ListenerRegistry, NoopRegistry,
    PointerButton,
};
pub use geometry::{clamp_to_viewport, Point, Size};
pub use visibility::{VisibilityController, WidgetKey};
pub use volume::VolumeController;
pub use widget::{HitTarget, PlayerWidget, TransportControl, WidgetView};
