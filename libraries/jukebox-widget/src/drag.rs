//! Drag gesture tracking
//!
//! Idle → (primary press on the grab handle) → Dragging → (release) → Idle.
//!
//! Page-wide move/up listeners exist only while a gesture is active. They are
//! held as a [`ListenerLease`] whose drop releases them, so release happens on
//! pointer-up, on teardown and when the controller itself is dropped.

use crate::geometry::{clamp_to_viewport, contains, Point, Size};
use serde::Serialize;
use tracing::debug;

/// Default distance a pointer must travel before a press counts as a drag
pub const DEFAULT_DRAG_THRESHOLD: f32 = 3.0;

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left / primary
    Primary,
    /// Right / secondary
    Secondary,
    /// Middle / auxiliary
    Middle,
}

/// How a completed press was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Released without travelling past the threshold
    Click,
    /// Moved the widget
    Drag,
}

/// Handle for page-wide listeners, released on drop
pub struct ListenerLease {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerLease {
    /// Wrap the host's release action
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release now instead of at drop
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ListenerLease {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for ListenerLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerLease")
            .field("held", &self.release.is_some())
            .finish()
    }
}

/// Host hook for installing the page-wide move/up listeners of one drag
pub trait ListenerRegistry {
    /// Install listeners and return the lease that removes them
    fn acquire_drag_listeners(&mut self) -> ListenerLease;
}

/// Registry for hosts that deliver move/up events without extra listeners
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRegistry;

impl ListenerRegistry for NoopRegistry {
    fn acquire_drag_listeners(&mut self) -> ListenerLease {
        ListenerLease::new(|| {})
    }
}

/// Drag state snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragState {
    /// Widget top-left in viewport coordinates
    pub position: Point,

    /// Whether a press on the grab handle is active
    pub is_dragging: bool,

    /// Pointer position minus widget origin, fixed for one gesture
    pub grab_offset: Point,
}

/// Tracks one drag gesture at a time and keeps the widget in the viewport
pub struct DragController {
    state: DragState,
    widget: Size,
    viewport: Size,
    threshold: f32,

    // Pointer position at press
    press_origin: Point,

    // Set once travel exceeds the threshold; stays set until release
    was_dragged: bool,

    lease: Option<ListenerLease>,
    registry: Box<dyn ListenerRegistry>,
}

impl DragController {
    /// Create a controller with the widget at `position` (clamped)
    pub fn new(
        position: Point,
        widget: Size,
        viewport: Size,
        threshold: f32,
        registry: Box<dyn ListenerRegistry>,
    ) -> Self {
        Self {
            state: DragState {
                position: clamp_to_viewport(position, viewport, widget),
                is_dragging: false,
                grab_offset: Point::default(),
            },
            widget,
            viewport,
            threshold: threshold.max(0.0),
            press_origin: Point::default(),
            was_dragged: false,
            lease: None,
            registry,
        }
    }

    /// Current drag state
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Widget top-left
    pub fn position(&self) -> Point {
        self.state.position
    }

    /// Whether a gesture is active
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Whether page-wide listeners are currently held
    pub fn holds_listeners(&self) -> bool {
        self.lease.is_some()
    }

    /// Widget extent
    pub fn widget_size(&self) -> Size {
        self.widget
    }

    /// Whether `point` is over the widget
    pub fn hit(&self, point: Point) -> bool {
        contains(self.state.position, self.widget, point)
    }

    /// Press on the grab handle
    ///
    /// Only the primary button starts a gesture. Returns `true` if one started.
    pub fn pointer_down(&mut self, pointer: Point, button: PointerButton) -> bool {
        if button != PointerButton::Primary || self.state.is_dragging {
            return false;
        }

        self.state.grab_offset = pointer - self.state.position;
        self.state.is_dragging = true;
        self.press_origin = pointer;
        self.was_dragged = false;
        self.lease = Some(self.registry.acquire_drag_listeners());

        debug!("Drag started at ({}, {})", pointer.x, pointer.y);
        true
    }

    /// Pointer moved anywhere on the page
    ///
    /// Returns the new position while a gesture is active.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        if !self.state.is_dragging {
            return None;
        }

        if (pointer - self.press_origin).length() > self.threshold {
            self.was_dragged = true;
        }

        let raw = pointer - self.state.grab_offset;
        self.state.position = clamp_to_viewport(raw, self.viewport, self.widget);
        Some(self.state.position)
    }

    /// Pointer released anywhere, including outside the viewport
    ///
    /// Releases the listeners and reports whether the press was a click.
    pub fn pointer_up(&mut self, pointer: Point) -> Option<GestureOutcome> {
        if !self.state.is_dragging {
            return None;
        }

        if (pointer - self.press_origin).length() > self.threshold {
            self.was_dragged = true;
        }

        self.end_gesture();
        let outcome = if self.was_dragged {
            GestureOutcome::Drag
        } else {
            GestureOutcome::Click
        };
        debug!("Drag ended as {:?}", outcome);
        Some(outcome)
    }

    /// Viewport resized; keep the widget inside it
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.state.position = clamp_to_viewport(self.state.position, viewport, self.widget);
    }

    /// Abort any gesture and release its listeners
    pub fn teardown(&mut self) {
        self.end_gesture();
        self.was_dragged = false;
    }

    fn end_gesture(&mut self) {
        self.state.is_dragging = false;
        if let Some(lease) = self.lease.take() {
            lease.release();
        }
    }
}
