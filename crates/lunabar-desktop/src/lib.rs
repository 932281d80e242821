//! Lunabar desktop shell.
//!
//! Owns the tray button, the presentation of the single calendar window and
//! the one persisted preference. The calendar itself is rendered by the
//! embedded content layer; the shell talks to it over Tauri commands and
//! events only.

mod commands;
mod monitor;
mod scheduler;
mod settings_panel;
mod state;
mod tray;
mod window;

use monitor::MonitorRegistry;
use state::ShellState;
use tauri::Manager;
use window::{CONTENT_WINDOW, WindowDismissMonitor, WindowSurface};

pub fn run() {
    tracing_subscriber::fmt::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::default().build())
        .plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
            tracing::info!("second instance suppressed");
        }))
        .invoke_handler(tauri::generate_handler![
            commands::get_settings,
            commands::set_week_start,
            commands::content_ready,
            commands::exit_app,
        ])
        .setup(|app| {
            // Tray-only presence: no dock icon, ever.
            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            let registry = MonitorRegistry::new();
            let dismiss = WindowDismissMonitor::new(app.handle().clone(), registry.clone());
            let mut controller = lunabar_core::presentation::PopupController::new(dismiss);

            // The window is configured hidden; discovering it here is the
            // readiness signal the controller waits on. If it is not up yet,
            // the content layer's `content_ready` command attaches it later.
            match app.get_webview_window(CONTENT_WINDOW) {
                Some(content) => {
                    let _ = content.hide();
                    controller.attach_surface(WindowSurface::new(content));
                }
                None => tracing::warn!("content window not found at startup"),
            }

            app.manage(ShellState::new(controller, registry));

            tray::setup_tray(app)?;

            let state = app.state::<ShellState>();
            state.set_scheduler(scheduler::spawn_daily_refresh(app.handle().clone()));

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building lunabar")
        .run(|app, event| {
            if let tauri::RunEvent::Exit = event {
                app.state::<ShellState>().teardown();
            }
        });
}
