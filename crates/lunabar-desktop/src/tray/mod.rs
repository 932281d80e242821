//! System Tray Module
//!
//! The tray button is the app's only persistent UI presence. Left click
//! toggles the calendar window, right click opens the context menu, and the
//! icon itself is a rendering of today's date.
//!
//! ```text
//! tray/
//! ├── icon.rs   - date icon rendering & tray application
//! ├── setup.rs  - tray construction, click and menu dispatch
//! └── mod.rs    - public API (this file)
//! ```

pub mod icon;
pub mod setup;

pub use icon::refresh_tray_icon;
pub use setup::{refresh_menu, setup_tray};

pub const TRAY_ID: &str = "lunabar-tray";
