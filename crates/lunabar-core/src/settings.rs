//! The one user preference shared with the embedded calendar UI.

use serde::{Deserialize, Serialize};

/// Durable store key for [`Settings::week_starts_on_sunday`].
pub const WEEK_START_KEY: &str = "weekStartsOnSunday";

/// Shell settings. Exactly one value is persisted; everything else about the
/// calendar lives in the content layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Whether the calendar grid starts the week on Sunday (default Monday).
    #[serde(default)]
    pub week_starts_on_sunday: bool,
}
