//! The small settings panel opened from the context menu.
//!
//! The panel hosts a single checkbox ("week starts on Sunday") rendered by
//! the content layer; the shell owns its placement near the tray button and
//! its outside-click dismissal, which is a separate subscription from the
//! main window's.

use crate::monitor::Purpose;
use crate::state::ShellState;
use crate::window;
use lunabar_core::geometry::{Size, place_below};
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

pub const SETTINGS_WINDOW: &str = "settings";

const PANEL_SIZE: Size = Size {
    width: 280.0,
    height: 150.0,
};

/// Open (or refocus) the settings panel. The panel reads the current
/// preference through the `get_settings` command once its UI loads.
pub fn open(app: &AppHandle) {
    if let Some(existing) = app.get_webview_window(SETTINGS_WINDOW) {
        let _ = existing.show();
        let _ = existing.set_focus();
        return;
    }

    let built = WebviewWindowBuilder::new(
        app,
        SETTINGS_WINDOW,
        WebviewUrl::App("index.html#/settings".into()),
    )
    .title("Lunabar Settings")
    .inner_size(PANEL_SIZE.width, PANEL_SIZE.height)
    .resizable(false)
    .decorations(false)
    .always_on_top(true)
    .skip_taskbar(true)
    .visible(false)
    .build();

    let panel = match built {
        Ok(panel) => panel,
        Err(e) => {
            tracing::warn!(?e, "failed to create settings panel");
            return;
        }
    };

    place_panel(app, &panel);
    let _ = panel.show();
    let _ = panel.set_focus();
    arm_dismissal(app, &panel);
}

/// Close the panel and release its monitor. Safe when already closed.
pub fn close(app: &AppHandle) {
    if let Some(panel) = app.get_webview_window(SETTINGS_WINDOW)
        && let Err(e) = panel.close()
    {
        tracing::warn!(?e, "failed to close settings panel");
    }
    let state = app.state::<ShellState>();
    if let Some(handle) = state.panel_monitor.lock().unwrap().take() {
        state.registry.uninstall(handle);
    }
}

/// Anchor the panel under the tray button like the main window.
fn place_panel(app: &AppHandle, panel: &tauri::WebviewWindow) {
    let state = app.state::<ShellState>();
    let Some(anchor) = state.controller.lock().unwrap().anchor() else {
        tracing::warn!("no tray anchor recorded, leaving settings panel at default position");
        return;
    };
    let layout = match window::display_layout(app) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::warn!(?e, "cannot resolve displays for settings panel");
            return;
        }
    };

    let size = match (panel.outer_size(), panel.scale_factor()) {
        (Ok(s), Ok(scale)) if scale > 0.0 => {
            let logical = s.to_logical::<f64>(scale);
            Size {
                width: logical.width,
                height: logical.height,
            }
        }
        _ => PANEL_SIZE,
    };
    let frame = place_below(anchor, size, &layout);
    let top_left_y = -(frame.min_y() + frame.height);
    let position = tauri::LogicalPosition::new(frame.x, top_left_y);
    if let Err(e) = panel.set_position(position) {
        tracing::warn!(?e, "failed to place settings panel");
    }
}

/// Install the panel's own outside-click subscription. Replaces any stale
/// registration from a previous panel.
fn arm_dismissal(app: &AppHandle, panel: &tauri::WebviewWindow) {
    let frame = panel
        .outer_position()
        .ok()
        .zip(panel.outer_size().ok())
        .zip(panel.scale_factor().ok())
        .map(|((position, size), scale)| {
            window::logical_rect(
                position.x as f64,
                position.y as f64,
                size.width as f64,
                size.height as f64,
                scale,
            )
        });
    let Some(frame) = frame else {
        tracing::warn!("settings panel frame unavailable, skipping dismissal monitor");
        return;
    };

    let state = app.state::<ShellState>();
    let dismiss_app = app.clone();
    let handle = state.registry.install(
        Purpose::SettingsPanel,
        vec![frame],
        Box::new(move || {
            let handle = dismiss_app.clone();
            let posted = dismiss_app.run_on_main_thread(move || close(&handle));
            if let Err(e) = posted {
                tracing::warn!(?e, "failed to post settings panel dismissal");
            }
        }),
    );
    if let Some(stale) = state.panel_monitor.lock().unwrap().replace(handle) {
        state.registry.uninstall(stale);
    }
}
