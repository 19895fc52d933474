/// Widget configuration
use crate::drag::DEFAULT_DRAG_THRESHOLD;
use crate::geometry::{Point, Size};
use jukebox_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Playback settings
    pub playback: PlaybackConfig,

    /// Rendered widget extent
    pub widget_size: Size,

    /// Distance from the left edge at mount
    pub start_x: f32,

    /// Distance of the widget origin from the bottom edge at mount
    pub bottom_offset: f32,

    /// Pointer travel that turns a press into a drag
    pub drag_threshold: f32,

    /// Height of the volume bar
    pub volume_bar_height: f32,
}

impl WidgetConfig {
    /// Widget origin at mount, before clamping
    pub fn start_position(&self, viewport: Size) -> Point {
        Point::new(self.start_x, viewport.height - self.bottom_offset)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            widget_size: Size::new(128.0, 128.0),
            start_x: 20.0,
            bottom_offset: 160.0,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            volume_bar_height: 100.0,
        }
    }
}
