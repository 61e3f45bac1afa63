//! Panels and their navigable containers

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named region of the UI that can own keyboard focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    #[default]
    Sidebar,
    Tracklist,
}

impl Panel {
    pub const ALL: [Panel; 2] = [Panel::Sidebar, Panel::Tracklist];

    /// The panel on the other side of the split
    pub fn other(self) -> Self {
        match self {
            Self::Sidebar => Self::Tracklist,
            Self::Tracklist => Self::Sidebar,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sidebar => "sidebar",
            Self::Tracklist => "tracklist",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered container backing a panel
///
/// The controller only ever holds a weak handle, so a container that has
/// been unmounted simply stops answering.
pub trait PanelContainer: Send + Sync {
    /// Number of navigable children right now
    fn navigable_len(&self) -> usize;

    /// Move host focus to the child at `index` (always `< navigable_len()`)
    fn focus_item(&self, index: usize);
}
