//! Startup handshake with the content layer.

use crate::state::ShellState;
use crate::window::{CONTENT_WINDOW, WindowSurface};
use tauri::{AppHandle, Manager, State};

/// Readiness signal from the content layer. Normally the window is attached
/// during setup; this covers the case where the webview finished loading
/// before the shell found it, instead of waiting a fixed delay.
#[tauri::command]
pub fn content_ready(app: AppHandle, state: State<'_, ShellState>) {
    if state.has_window() {
        return;
    }
    match app.get_webview_window(CONTENT_WINDOW) {
        Some(window) => {
            let _ = window.hide();
            state.attach_window(WindowSurface::new(window));
            tracing::info!("content window attached via readiness signal");
        }
        None => tracing::warn!("content_ready received but window is still missing"),
    }
}

/// Exit the application gracefully, releasing monitors and the daily timer.
#[tauri::command]
pub fn exit_app(app: AppHandle, state: State<'_, ShellState>) {
    state.teardown();
    app.exit(0);
}
