//! Configurable key bindings

use crate::key::Key;
use serde::{Deserialize, Serialize};

/// What a key means inside a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Down,
    Up,
    Activate,
    FocusSidebar,
    FocusTracklist,
}

/// Key bindings, vim-style by default
///
/// ```toml
/// [navigation.bindings]
/// down = ["ArrowDown", "j"]
/// focus_sidebar = ["h", "ArrowLeft"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub down: Vec<Key>,
    pub up: Vec<Key>,
    pub activate: Vec<Key>,
    pub focus_sidebar: Vec<Key>,
    pub focus_tracklist: Vec<Key>,
    pub search: Vec<Key>,
    pub toggle_playback: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            down: vec![Key::ArrowDown, Key::Char('j')],
            up: vec![Key::ArrowUp, Key::Char('k')],
            activate: vec![Key::Enter, Key::Space],
            focus_sidebar: vec![Key::Char('h')],
            focus_tracklist: vec![Key::Char('l')],
            search: vec![Key::Char('/')],
            toggle_playback: vec![Key::Space],
        }
    }
}

impl KeyBindings {
    /// Resolve a key to its in-panel meaning
    ///
    /// Movement wins over activation when a key is bound to both.
    pub fn panel_action(&self, key: Key) -> Option<PanelAction> {
        if self.down.contains(&key) {
            Some(PanelAction::Down)
        } else if self.up.contains(&key) {
            Some(PanelAction::Up)
        } else if self.focus_sidebar.contains(&key) {
            Some(PanelAction::FocusSidebar)
        } else if self.focus_tracklist.contains(&key) {
            Some(PanelAction::FocusTracklist)
        } else if self.activate.contains(&key) {
            Some(PanelAction::Activate)
        } else {
            None
        }
    }

    pub fn is_search(&self, key: Key) -> bool {
        self.search.contains(&key)
    }

    pub fn is_toggle_playback(&self, key: Key) -> bool {
        self.toggle_playback.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_arrows_and_letters() {
        let bindings = KeyBindings::default();

        assert_eq!(bindings.panel_action(Key::Char('j')), Some(PanelAction::Down));
        assert_eq!(bindings.panel_action(Key::ArrowUp), Some(PanelAction::Up));
        assert_eq!(bindings.panel_action(Key::Space), Some(PanelAction::Activate));
        assert_eq!(
            bindings.panel_action(Key::Char('h')),
            Some(PanelAction::FocusSidebar)
        );
        assert_eq!(bindings.panel_action(Key::Char('x')), None);
        assert!(bindings.is_search(Key::Char('/')));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let bindings: KeyBindings =
            serde_json::from_str(r#"{ "down": ["s"], "up": ["w"] }"#).unwrap();

        assert_eq!(bindings.panel_action(Key::Char('s')), Some(PanelAction::Down));
        assert_eq!(bindings.panel_action(Key::Char('j')), None);
        assert_eq!(bindings.activate, vec![Key::Enter, Key::Space]);
    }
}
