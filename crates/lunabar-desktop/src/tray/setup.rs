//! Tray construction and event dispatch.

use crate::state::ShellState;
use crate::{settings_panel, window};
use lunabar_core::menu::{MenuAction, MenuItem as ModelItem, MenuModel};
use lunabar_core::presentation::PresentationState;
use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::{AppHandle, Emitter, Manager, Wry};

pub fn setup_tray(app: &tauri::App) -> Result<(), Box<dyn std::error::Error>> {
    let menu = build_menu(app.handle(), PresentationState::Hidden)?;

    let _tray = TrayIconBuilder::with_id(crate::tray::TRAY_ID)
        .icon(crate::tray::icon::current_icon())
        .icon_as_template(false)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .tooltip("Lunabar - Click to show the calendar")
        .on_menu_event(|app, event| match MenuAction::from_id(event.id.as_ref()) {
            Some(MenuAction::OpenSettings) => settings_panel::open(app),
            Some(MenuAction::ShowAbout) => show_about(app),
            Some(MenuAction::Quit) => {
                app.state::<ShellState>().teardown();
                app.exit(0);
            }
            None => tracing::warn!(id = %event.id.as_ref(), "unknown menu action"),
        })
        .on_tray_icon_event(|tray, event| {
            let TrayIconEvent::Click {
                button,
                button_state,
                rect,
                ..
            } = event
            else {
                return;
            };
            let app = tray.app_handle();
            // Every click refreshes the anchor; the tray button may have
            // moved since the last one (status bar reflow, new display).
            window::record_anchor(app, &rect);

            match (button, button_state) {
                // Toggle on press, not release, matching the immediate feel
                // of a menu-bar button.
                (MouseButton::Left, MouseButtonState::Down) => window::toggle(app),
                (MouseButton::Right, MouseButtonState::Down) => {
                    // The menu reflects the state at the moment of the press;
                    // the window is then hidden so the menu doesn't cover it.
                    let state_at_press = app.state::<ShellState>().presentation();
                    window::hide(app);
                    match build_menu(app, state_at_press) {
                        Ok(menu) => {
                            if let Err(e) = tray.set_menu(Some(menu)) {
                                tracing::warn!(?e, "failed to refresh context menu");
                            }
                        }
                        Err(e) => tracing::warn!(?e, "failed to rebuild context menu"),
                    }
                }
                _ => {}
            }
        })
        .build(app)?;

    Ok(())
}

/// Re-attach a menu matching the current presentation state, so the menu is
/// never stale even if the toolkit shows it without a right-click event
/// reaching us first. Called on every show/hide transition.
pub fn refresh_menu(app: &AppHandle) {
    let Some(tray) = app.tray_by_id(crate::tray::TRAY_ID) else {
        return;
    };
    let state = app.state::<ShellState>().presentation();
    match build_menu(app, state) {
        Ok(menu) => {
            if let Err(e) = tray.set_menu(Some(menu)) {
                tracing::warn!(?e, "failed to update context menu");
            }
        }
        Err(e) => tracing::warn!(?e, "failed to rebuild context menu"),
    }
}

/// Realize the core menu model as a toolkit menu. Rebuilt before every
/// display so the Settings entry's enabled flag is never stale.
fn build_menu(app: &AppHandle, state: PresentationState) -> tauri::Result<Menu<Wry>> {
    let model = MenuModel::for_state(state);
    let menu = Menu::new(app)?;
    for item in &model.items {
        match item {
            ModelItem::Entry {
                label,
                action,
                enabled,
            } => {
                menu.append(&MenuItem::with_id(
                    app,
                    action.id(),
                    *label,
                    *enabled,
                    None::<&str>,
                )?)?;
            }
            ModelItem::Separator => {
                menu.append(&PredefinedMenuItem::separator(app)?)?;
            }
        }
    }
    Ok(menu)
}

/// About is rendered by the content layer; the shell only signals it.
fn show_about(app: &AppHandle) {
    if let Err(e) = app.emit("show-about", ()) {
        tracing::warn!(?e, "failed to emit about event");
    }
}
