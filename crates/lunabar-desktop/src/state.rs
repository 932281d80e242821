use crate::monitor::{MonitorHandle, MonitorRegistry};
use crate::window::{WindowDismissMonitor, WindowSurface};
use lunabar_core::presentation::{PopupController, PresentationState};
use std::sync::Mutex;

pub type Controller = PopupController<WindowSurface, WindowDismissMonitor>;

/// Shell-wide state. One instance, constructed at startup and managed by the
/// Tauri app; nothing here is an ambient static.
pub struct ShellState {
    /// Sole owner of the presentation state machine.
    pub controller: Mutex<Controller>,
    /// Shared outside-click registry (also used by the settings panel).
    pub registry: MonitorRegistry,
    /// Live dismissal subscription for the settings panel, if any.
    pub panel_monitor: Mutex<Option<MonitorHandle>>,
    /// Daily icon refresh task, aborted at exit.
    pub scheduler: Mutex<Option<tauri::async_runtime::JoinHandle<()>>>,
}

impl ShellState {
    pub fn new(controller: Controller, registry: MonitorRegistry) -> Self {
        Self {
            controller: Mutex::new(controller),
            registry,
            panel_monitor: Mutex::new(None),
            scheduler: Mutex::new(None),
        }
    }

    pub fn presentation(&self) -> PresentationState {
        self.controller.lock().unwrap().state()
    }

    /// Attach the content window once discovered (the readiness signal).
    pub fn attach_window(&self, surface: WindowSurface) {
        self.controller.lock().unwrap().attach_surface(surface);
    }

    pub fn has_window(&self) -> bool {
        self.controller.lock().unwrap().has_surface()
    }

    pub fn set_scheduler(&self, handle: tauri::async_runtime::JoinHandle<()>) {
        *self.scheduler.lock().unwrap() = Some(handle);
    }

    /// Release everything cancellable: the daily timer, the main-window
    /// monitor and the panel monitor. Called once at process exit.
    pub fn teardown(&self) {
        if let Some(handle) = self.scheduler.lock().unwrap().take() {
            handle.abort();
        }
        self.controller.lock().unwrap().hide();
        if let Some(handle) = self.panel_monitor.lock().unwrap().take() {
            self.registry.uninstall(handle);
        }
    }
}
