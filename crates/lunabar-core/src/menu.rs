//! Context menu model for the tray button.
//!
//! Actions are a plain enum dispatched by the shell with a `match`; the model
//! carries no toolkit types so the menu contents are unit-testable.

use crate::presentation::PresentationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenSettings,
    ShowAbout,
    Quit,
}

impl MenuAction {
    /// Stable identifier used for toolkit menu item ids.
    pub fn id(self) -> &'static str {
        match self {
            MenuAction::OpenSettings => "settings",
            MenuAction::ShowAbout => "about",
            MenuAction::Quit => "quit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "settings" => Some(MenuAction::OpenSettings),
            "about" => Some(MenuAction::ShowAbout),
            "quit" => Some(MenuAction::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Entry {
        label: &'static str,
        action: MenuAction,
        enabled: bool,
    },
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    pub items: Vec<MenuItem>,
}

impl MenuModel {
    /// Build the menu for the current presentation state. Recomputed before
    /// every display: the Settings entry is only enabled while the calendar
    /// window is showing, so a settings panel never opens without calendar
    /// context.
    pub fn for_state(state: PresentationState) -> Self {
        Self {
            items: vec![
                MenuItem::Entry {
                    label: "Settings",
                    action: MenuAction::OpenSettings,
                    enabled: state == PresentationState::Visible,
                },
                MenuItem::Entry {
                    label: "About Lunabar",
                    action: MenuAction::ShowAbout,
                    enabled: true,
                },
                MenuItem::Separator,
                MenuItem::Entry {
                    label: "Quit",
                    action: MenuAction::Quit,
                    enabled: true,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_enabled(model: &MenuModel) -> bool {
        model
            .items
            .iter()
            .find_map(|item| match item {
                MenuItem::Entry {
                    action: MenuAction::OpenSettings,
                    enabled,
                    ..
                } => Some(*enabled),
                _ => None,
            })
            .expect("menu has a settings entry")
    }

    #[test]
    fn settings_entry_tracks_presentation_state() {
        assert!(!settings_enabled(&MenuModel::for_state(
            PresentationState::Hidden
        )));
        assert!(settings_enabled(&MenuModel::for_state(
            PresentationState::Visible
        )));
        // Recomputed, not cached: flips back after the state changes again.
        assert!(!settings_enabled(&MenuModel::for_state(
            PresentationState::Hidden
        )));
    }

    #[test]
    fn quit_always_enabled() {
        for state in [PresentationState::Hidden, PresentationState::Visible] {
            let model = MenuModel::for_state(state);
            assert!(model.items.contains(&MenuItem::Entry {
                label: "Quit",
                action: MenuAction::Quit,
                enabled: true,
            }));
        }
    }

    #[test]
    fn action_ids_round_trip() {
        for action in [
            MenuAction::OpenSettings,
            MenuAction::ShowAbout,
            MenuAction::Quit,
        ] {
            assert_eq!(MenuAction::from_id(action.id()), Some(action));
        }
        assert_eq!(MenuAction::from_id("bogus"), None);
    }
}
