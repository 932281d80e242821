//! Date icon rendering for the tray button.
//!
//! The bitmap comes from `lunabar_core::icon`; this module only converts it
//! into a Tauri image and swaps it on the tray. The previous image is
//! discarded by the swap, never mutated.

use lunabar_core::icon::{IconBitmap, IconDate};
use tauri::image::Image;
use tauri::{AppHandle, Manager};

/// Render today's icon.
pub fn current_icon() -> Image<'static> {
    let today = chrono::Local::now().date_naive();
    to_image(lunabar_core::icon::render(IconDate::from(today)))
}

fn to_image(bitmap: IconBitmap) -> Image<'static> {
    Image::new_owned(bitmap.rgba, bitmap.width, bitmap.height)
}

/// Re-render the icon for the current date and apply it to the tray button.
pub fn refresh_tray_icon(app: &AppHandle) {
    let Some(tray) = app.tray_by_id(crate::tray::TRAY_ID) else {
        tracing::warn!("tray button unavailable, skipping icon refresh");
        return;
    };
    if let Err(e) = tray.set_icon(Some(current_icon())) {
        tracing::warn!(?e, "failed to set tray icon");
    }
}
