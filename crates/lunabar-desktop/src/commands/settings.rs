//! Preference commands.
//!
//! One durable value exists: `weekStartsOnSunday`. Reads always go to the
//! store so the content layer never sees a cached value; a failed read
//! degrades to the default, a failed write is logged and swallowed.

use lunabar_core::settings::{Settings, WEEK_START_KEY};
use tauri::{AppHandle, Emitter};
use tauri_plugin_store::StoreExt;

/// Store file under the app's data directory.
pub const STORE_FILE: &str = "settings.json";

/// Event pushed to the content layer whenever the preference changes.
pub const SETTINGS_CHANGED_EVENT: &str = "settings-changed";

pub(crate) fn read_settings(app: &AppHandle) -> Settings {
    match app.store(STORE_FILE) {
        Ok(store) => Settings {
            week_starts_on_sunday: store
                .get(WEEK_START_KEY)
                .and_then(|value| value.as_bool())
                .unwrap_or_default(),
        },
        Err(e) => {
            tracing::warn!(?e, "preference store unavailable, using defaults");
            Settings::default()
        }
    }
}

/// Request half of the message channel: the content layer pulls the current
/// preference on demand.
#[tauri::command]
pub fn get_settings(app: AppHandle) -> Result<Settings, String> {
    Ok(read_settings(&app))
}

/// Persist a new preference value and broadcast it to the content layer.
#[tauri::command]
pub fn set_week_start(app: AppHandle, week_starts_on_sunday: bool) -> Result<(), String> {
    match app.store(STORE_FILE) {
        Ok(store) => {
            store.set(WEEK_START_KEY, serde_json::json!(week_starts_on_sunday));
            if let Err(e) = store.save() {
                // Degraded, not fatal: the in-memory store still answers
                // get_settings with the new value for this session.
                tracing::warn!(?e, "failed to persist preference");
            }
        }
        Err(e) => tracing::warn!(?e, "preference store unavailable, change not persisted"),
    }

    // Fire-and-forget notification; no response expected.
    let payload = Settings {
        week_starts_on_sunday,
    };
    if let Err(e) = app.emit(SETTINGS_CHANGED_EVENT, payload) {
        tracing::warn!(?e, "failed to notify content layer of settings change");
    }
    Ok(())
}
