//! Panel visibility
//!
//! Opening or closing the panel never touches playback.

use tracing::debug;

/// Keys the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKey {
    /// Dismissal key
    Escape,
    /// Anything else
    Other,
}

/// Open/closed state of the player panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityController {
    is_open: bool,
}

impl VisibilityController {
    /// Create a closed panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the panel is open
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Flip the panel
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
        debug!("Panel {}", if self.is_open { "opened" } else { "closed" });
    }

    /// Close the panel
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Press outside the widget
    ///
    /// Closes an open panel unless the press belongs to an active drag.
    /// Returns `true` if the panel closed.
    pub fn on_pointer_down_outside(&mut self, drag_active: bool) -> bool {
        if self.is_open && !drag_active {
            self.close();
            debug!("Panel dismissed by outside press");
            true
        } else {
            false
        }
    }

    /// Key press; the dismissal key closes an open panel
    pub fn on_key(&mut self, key: WidgetKey) -> bool {
        if key == WidgetKey::Escape && self.is_open {
            self.close();
            true
        } else {
            false
        }
    }
}
