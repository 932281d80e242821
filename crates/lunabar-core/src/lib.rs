pub mod geometry;
pub mod icon;
pub mod menu;
pub mod presentation;
pub mod schedule;
pub mod settings;

pub use geometry::{ANCHOR_GAP, Display, DisplayLayout, Point, Rect, Size, place_below};
pub use icon::{ICON_SIZE, IconBitmap, IconDate, render};
pub use menu::{MenuAction, MenuItem, MenuModel};
pub use presentation::{ClickMonitor, PopupController, PopupSurface, PresentationState};
pub use schedule::{next_midnight, until_next_midnight};
pub use settings::{Settings, WEEK_START_KEY};
