//! Tauri command handlers — the request/response half of the message channel
//! between the shell and the embedded calendar UI.

mod lifecycle;
mod settings;

pub use lifecycle::*;
pub use settings::*;
