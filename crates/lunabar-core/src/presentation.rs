//! Popup window presentation state machine.
//!
//! The controller is the only owner of [`PresentationState`]. It talks to the
//! actual window through the [`PopupSurface`] seam and to the global
//! outside-click observer through [`ClickMonitor`], so the whole state machine
//! runs under test without a window server.

use crate::geometry::{DisplayLayout, Point, Rect, Size, place_below};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    Hidden,
    Visible,
}

/// The single content window, as the controller sees it.
pub trait PopupSurface {
    fn size(&self) -> Size;
    fn apply_origin(&mut self, origin: Point);
    /// Bring to front and take input focus.
    fn order_front(&mut self);
    /// Remove from screen without destroying the window or its content.
    fn order_out(&mut self);
}

/// Global pointer-press observation, scoped to one dismissal purpose.
///
/// A handle is an owned subscription token. Installing while a prior handle
/// is live must be preceded by uninstalling it; the controller enforces this.
pub trait ClickMonitor {
    type Handle;

    /// Start observing; presses outside every rect in `exclusion` dismiss.
    fn install(&mut self, exclusion: Vec<Rect>) -> Self::Handle;
    fn uninstall(&mut self, handle: Self::Handle);
}

pub struct PopupController<S, M: ClickMonitor> {
    state: PresentationState,
    surface: Option<S>,
    anchor: Option<Rect>,
    monitor: M,
    monitor_handle: Option<M::Handle>,
}

impl<S: PopupSurface, M: ClickMonitor> PopupController<S, M> {
    /// A controller starts hidden, with no window discovered yet.
    pub fn new(monitor: M) -> Self {
        Self {
            state: PresentationState::Hidden,
            surface: None,
            anchor: None,
            monitor,
            monitor_handle: None,
        }
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == PresentationState::Visible
    }

    /// Resolve window discovery. Called once by the bootstrap when the
    /// content window exists; until then show() degrades to a logged no-op.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Record the tray button's current screen rectangle.
    pub fn set_anchor(&mut self, anchor: Rect) {
        self.anchor = Some(anchor);
    }

    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    pub fn toggle(&mut self, layout: &DisplayLayout) {
        match self.state {
            PresentationState::Hidden => self.show(layout),
            PresentationState::Visible => self.hide(),
        }
    }

    /// Place the window under the anchor, bring it to front and arm the
    /// outside-click monitor. Calling while already visible re-places the
    /// window (the tray button may have moved to another display).
    pub fn show(&mut self, layout: &DisplayLayout) {
        let Some(anchor) = self.anchor else {
            tracing::warn!("show requested before any tray anchor was recorded");
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            tracing::warn!("show requested before the content window was discovered");
            return;
        };

        let frame = place_below(anchor, surface.size(), layout);
        surface.apply_origin(frame.origin());
        surface.order_front();

        // Uninstall-before-install keeps at most one live subscription.
        if let Some(handle) = self.monitor_handle.take() {
            self.monitor.uninstall(handle);
        }
        self.monitor_handle = Some(self.monitor.install(vec![frame, anchor]));
        self.state = PresentationState::Visible;
    }

    /// Order the window out and release the monitor. Idempotent.
    pub fn hide(&mut self) {
        if self.state == PresentationState::Hidden {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.order_out();
        }
        if let Some(handle) = self.monitor_handle.take() {
            self.monitor.uninstall(handle);
        }
        self.state = PresentationState::Hidden;
    }
}

impl<S, M: ClickMonitor> Drop for PopupController<S, M> {
    fn drop(&mut self) {
        if let Some(handle) = self.monitor_handle.take() {
            self.monitor.uninstall(handle);
        }
    }
}
