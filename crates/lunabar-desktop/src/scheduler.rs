//! Daily icon refresh.
//!
//! Sleeps until the next local midnight, re-renders the tray icon for the
//! new date and loops. The duration is recomputed every iteration, so a
//! machine waking from sleep refreshes late rather than never.

use tauri::AppHandle;

pub fn spawn_daily_refresh(app: AppHandle) -> tauri::async_runtime::JoinHandle<()> {
    tauri::async_runtime::spawn(async move {
        loop {
            let wait = lunabar_core::schedule::until_next_midnight(&chrono::Local::now());
            tracing::debug!(seconds = wait.as_secs(), "next icon refresh scheduled");
            tokio::time::sleep(wait).await;
            crate::tray::refresh_tray_icon(&app);
        }
    })
}
