//! Presentation wiring between the core controller and the Tauri window.
//!
//! All geometry handed to the core is in **logical** (scale-independent)
//! units with the y axis flipped upward: Tauri reports physical pixels with
//! a top-left origin, while rdev reports the pointer in logical point
//! coordinates, so physical rects are divided by the owning monitor's scale
//! factor before the flip. The flip itself is a plain negation — a rect at
//! `(x, y, w, h)` top-left becomes `(x, -(y + h), w, h)` y-up — which needs
//! no knowledge of the total desktop height.

use crate::monitor::{MonitorHandle, MonitorRegistry, Purpose};
use crate::state::ShellState;
use lunabar_core::geometry::{Display, DisplayLayout, Point, Rect, Size};
use lunabar_core::presentation::{ClickMonitor, PopupSurface};
use tauri::{AppHandle, Manager, WebviewWindow};

/// Label of the single content window hosting the calendar UI.
pub const CONTENT_WINDOW: &str = "main";

/// Fallback frame size matching the window configuration, used only if the
/// window refuses to report its size.
const DEFAULT_WINDOW_SIZE: Size = Size {
    width: 500.0,
    height: 450.0,
};

/// Convert a physical top-left rect into the core's y-up logical space.
/// A non-positive scale factor is treated as unscaled.
pub(crate) fn logical_rect(x: f64, y: f64, width: f64, height: f64, scale: f64) -> Rect {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let (x, y) = (x / scale, y / scale);
    let (width, height) = (width / scale, height / scale);
    Rect::new(x, -(y + height), width, height)
}

/// Scale factor of the monitor containing the physical point, falling back
/// to the primary monitor's.
fn monitor_scale_at(app: &AppHandle, x: f64, y: f64) -> f64 {
    if let Ok(monitors) = app.available_monitors() {
        for m in &monitors {
            let min_x = m.position().x as f64;
            let min_y = m.position().y as f64;
            let max_x = min_x + m.size().width as f64;
            let max_y = min_y + m.size().height as f64;
            if x >= min_x && x < max_x && y >= min_y && y < max_y {
                return m.scale_factor();
            }
        }
    }
    app.primary_monitor()
        .ok()
        .flatten()
        .map(|m| m.scale_factor())
        .unwrap_or(1.0)
}

/// Convert a Tauri rect (tray button frame) into the core's y-up logical
/// space, normalizing physical components by the owning monitor's scale.
pub fn rect_from_tauri(app: &AppHandle, rect: &tauri::Rect) -> Rect {
    let (x, y, position_physical) = match rect.position {
        tauri::Position::Physical(p) => (p.x as f64, p.y as f64, true),
        tauri::Position::Logical(p) => (p.x, p.y, false),
    };
    let (width, height, size_physical) = match rect.size {
        tauri::Size::Physical(s) => (s.width as f64, s.height as f64, true),
        tauri::Size::Logical(s) => (s.width, s.height, false),
    };
    let scale = if position_physical || size_physical {
        monitor_scale_at(app, x, y)
    } else {
        1.0
    };
    let (x, y) = if position_physical {
        (x / scale, y / scale)
    } else {
        (x, y)
    };
    let (width, height) = if size_physical {
        (width / scale, height / scale)
    } else {
        (width, height)
    };
    Rect::new(x, -(y + height), width, height)
}

/// Snapshot the connected displays in logical units. Fails only if the
/// windowing system reports none at all.
pub fn display_layout(app: &AppHandle) -> anyhow::Result<DisplayLayout> {
    let monitors = app.available_monitors()?;
    let displays: Vec<Display> = monitors
        .iter()
        .map(|m| Display {
            bounds: logical_rect(
                m.position().x as f64,
                m.position().y as f64,
                m.size().width as f64,
                m.size().height as f64,
                m.scale_factor(),
            ),
        })
        .collect();

    let primary = match app.primary_monitor()? {
        Some(m) => Display {
            bounds: logical_rect(
                m.position().x as f64,
                m.position().y as f64,
                m.size().width as f64,
                m.size().height as f64,
                m.scale_factor(),
            ),
        },
        None => *displays
            .first()
            .ok_or_else(|| anyhow::anyhow!("no displays connected"))?,
    };

    Ok(DisplayLayout::new(displays, primary))
}

/// The content window as seen by the core controller.
pub struct WindowSurface {
    window: WebviewWindow,
}

impl WindowSurface {
    pub fn new(window: WebviewWindow) -> Self {
        Self { window }
    }
}

impl PopupSurface for WindowSurface {
    fn size(&self) -> Size {
        match (self.window.outer_size(), self.window.scale_factor()) {
            (Ok(size), Ok(scale)) if scale > 0.0 => {
                let logical = size.to_logical::<f64>(scale);
                Size {
                    width: logical.width,
                    height: logical.height,
                }
            }
            _ => {
                tracing::warn!("window size unavailable, using configured size");
                DEFAULT_WINDOW_SIZE
            }
        }
    }

    fn apply_origin(&mut self, origin: Point) {
        let height = self.size().height;
        let top_left_y = -(origin.y + height);
        let position = tauri::LogicalPosition::new(origin.x, top_left_y);
        if let Err(e) = self.window.set_position(position) {
            tracing::warn!(?e, "failed to place content window");
        }
    }

    fn order_front(&mut self) {
        if let Err(e) = self.window.show() {
            tracing::warn!(?e, "failed to show content window");
        }
        if let Err(e) = self.window.set_focus() {
            tracing::warn!(?e, "failed to focus content window");
        }
    }

    fn order_out(&mut self) {
        // Hide, never close: the webview keeps its state for the next show.
        if let Err(e) = self.window.hide() {
            tracing::warn!(?e, "failed to hide content window");
        }
    }
}

/// Outside-click dismissal for the main window, bridging the registry into
/// the controller's monitor seam. Dismissal posts `hide` back onto the main
/// loop; nothing runs on the listener thread beyond the containment check.
pub struct WindowDismissMonitor {
    app: AppHandle,
    registry: MonitorRegistry,
}

impl WindowDismissMonitor {
    pub fn new(app: AppHandle, registry: MonitorRegistry) -> Self {
        Self { app, registry }
    }
}

impl ClickMonitor for WindowDismissMonitor {
    type Handle = MonitorHandle;

    fn install(&mut self, exclusion: Vec<Rect>) -> MonitorHandle {
        let app = self.app.clone();
        self.registry.install(
            Purpose::MainWindow,
            exclusion,
            Box::new(move || {
                let handle = app.clone();
                let posted = app.run_on_main_thread(move || hide(&handle));
                if let Err(e) = posted {
                    tracing::warn!(?e, "failed to post outside-click dismissal");
                }
            }),
        )
    }

    fn uninstall(&mut self, handle: MonitorHandle) {
        self.registry.uninstall(handle);
    }
}

/// Record the tray button's screen rectangle as the placement anchor.
pub fn record_anchor(app: &AppHandle, rect: &tauri::Rect) {
    let anchor = rect_from_tauri(app, rect);
    let state = app.state::<ShellState>();
    state.controller.lock().unwrap().set_anchor(anchor);
}

pub fn toggle(app: &AppHandle) {
    let layout = match display_layout(app) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::warn!(?e, "cannot resolve displays, ignoring toggle");
            return;
        }
    };
    let state = app.state::<ShellState>();
    state.controller.lock().unwrap().toggle(&layout);
    crate::tray::refresh_menu(app);
}

pub fn hide(app: &AppHandle) {
    let state = app.state::<ShellState>();
    state.controller.lock().unwrap().hide();
    crate::tray::refresh_menu(app);
}
