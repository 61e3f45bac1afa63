//! Focus routing across registered panels

use crate::{
    bindings::{KeyBindings, PanelAction},
    key::{Key, KeyEvent, KeyTarget},
    panel::{Panel, PanelContainer},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Configuration for the navigation controller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub bindings: KeyBindings,
}

/// Result of routing a key to a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a panel key, or nothing to act on
    Ignored,

    /// Cursor moved within the panel
    Moved { panel: Panel, index: usize },

    /// Focus jumped to the other panel
    SwitchedPanel { from: Panel, to: Panel },

    /// The item under the cursor was activated
    Activate { panel: Panel, index: usize },
}

impl KeyOutcome {
    /// Whether the host should suppress the key's default behavior
    pub fn prevent_default(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// What the page-wide key listener decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    TogglePlayback,
    FocusSearch,
    None,
}

struct PanelSlot {
    container: Weak<dyn PanelContainer>,
    cursor: Option<usize>,
}

/// Keyboard focus controller
///
/// Tracks the active panel and an explicit cursor per panel. Containers are
/// held weakly; an unmounted container counts as having no items.
///
/// Every call runs to completion synchronously.
pub struct NavigationController {
    bindings: KeyBindings,
    panels: HashMap<Panel, PanelSlot>,
    active: Panel,
}

impl NavigationController {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            bindings: config.bindings,
            panels: HashMap::new(),
            active: Panel::default(),
        }
    }

    /// Register (or re-register) the container backing `panel`
    ///
    /// Re-registration replaces the container and resets the cursor.
    pub fn register_panel(&mut self, panel: Panel, container: &Arc<dyn PanelContainer>) {
        debug!(%panel, "Registering panel");
        self.panels.insert(
            panel,
            PanelSlot {
                container: Arc::downgrade(container),
                cursor: None,
            },
        );
    }

    pub fn unregister_panel(&mut self, panel: Panel) {
        debug!(%panel, "Unregistering panel");
        self.panels.remove(&panel);
    }

    pub fn set_active_panel(&mut self, panel: Panel) {
        if self.active != panel {
            debug!(from = %self.active, to = %panel, "Active panel changed");
            self.active = panel;
        }
    }

    pub fn active_panel(&self) -> Panel {
        self.active
    }

    /// Cursor position inside `panel`, if any item has focus
    pub fn cursor(&self, panel: Panel) -> Option<usize> {
        self.panels.get(&panel).and_then(|slot| slot.cursor)
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Route a key press to `panel`
    ///
    /// Movement clamps at both ends without wrapping. Panel switches focus
    /// the first item of the target panel and make it active.
    pub fn handle_panel_key(&mut self, key: Key, panel: Panel) -> KeyOutcome {
        let Some(action) = self.bindings.panel_action(key) else {
            return KeyOutcome::Ignored;
        };

        match action {
            PanelAction::Down => self.move_cursor(panel, 1),
            PanelAction::Up => self.move_cursor(panel, -1),
            PanelAction::Activate => self.activate(panel),
            PanelAction::FocusSidebar if panel == Panel::Tracklist => {
                self.switch_to(panel, Panel::Sidebar)
            }
            PanelAction::FocusTracklist if panel == Panel::Sidebar => {
                self.switch_to(panel, Panel::Tracklist)
            }
            PanelAction::FocusSidebar | PanelAction::FocusTracklist => KeyOutcome::Ignored,
        }
    }

    /// Keep the cursor in sync with focus changes made outside the keyboard
    ///
    /// The index is clamped to the current item count.
    pub fn on_focus_changed(&mut self, panel: Panel, index: usize) {
        let len = self.navigable_len(panel);
        if let Some(slot) = self.panels.get_mut(&panel) {
            slot.cursor = (len > 0).then(|| index.min(len - 1));
        }
    }

    /// Page-wide key listener
    ///
    /// A bare toggle key on the page body toggles playback. The search key
    /// focuses search from anywhere, unless search already has focus or a
    /// panel handler consumed the event.
    pub fn handle_global_key(&self, event: &KeyEvent) -> GlobalAction {
        if self.bindings.is_toggle_playback(event.key) && event.target == KeyTarget::Body {
            return GlobalAction::TogglePlayback;
        }

        if self.bindings.is_search(event.key)
            && event.target != KeyTarget::SearchInput
            && !event.default_prevented
        {
            return GlobalAction::FocusSearch;
        }

        GlobalAction::None
    }

    fn container(&self, panel: Panel) -> Option<Arc<dyn PanelContainer>> {
        self.panels
            .get(&panel)
            .and_then(|slot| slot.container.upgrade())
    }

    fn navigable_len(&self, panel: Panel) -> usize {
        self.container(panel)
            .map_or(0, |container| container.navigable_len())
    }

    fn move_cursor(&mut self, panel: Panel, delta: isize) -> KeyOutcome {
        let Some(container) = self.container(panel) else {
            return KeyOutcome::Ignored;
        };
        let len = container.navigable_len();
        if len == 0 {
            return KeyOutcome::Ignored;
        }

        let last = (len - 1) as isize;
        let pos = self
            .cursor(panel)
            .map_or(-1, |cursor| (cursor as isize).min(last));
        let index = (pos + delta).clamp(0, last) as usize;

        container.focus_item(index);
        if let Some(slot) = self.panels.get_mut(&panel) {
            slot.cursor = Some(index);
        }

        KeyOutcome::Moved { panel, index }
    }

    fn activate(&self, panel: Panel) -> KeyOutcome {
        let len = self.navigable_len(panel);
        match self.cursor(panel) {
            Some(index) if index < len => KeyOutcome::Activate { panel, index },
            _ => KeyOutcome::Ignored,
        }
    }

    fn switch_to(&mut self, from: Panel, to: Panel) -> KeyOutcome {
        let cursor = match self.container(to) {
            Some(container) if container.navigable_len() > 0 => {
                container.focus_item(0);
                Some(0)
            }
            _ => None,
        };

        if let Some(slot) = self.panels.get_mut(&to) {
            slot.cursor = cursor;
        }
        self.set_active_panel(to);

        KeyOutcome::SwitchedPanel { from, to }
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}
