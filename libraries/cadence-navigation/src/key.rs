//! Keyboard surface

use crate::error::{NavigationError, Result};
use crate::panel::Panel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical key
///
/// Serialized by name (`"ArrowDown"`, `"Enter"`, `"Space"`, `"j"`), which is
/// also the format accepted in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Escape,
    Char(char),
}

impl Key {
    /// Parse a key name
    ///
    /// Accepts DOM-style names, a literal `" "` for space, and any single
    /// character.
    pub fn parse(name: &str) -> Result<Self> {
        let key = match name {
            "ArrowUp" | "Up" | "up" => Self::ArrowUp,
            "ArrowDown" | "Down" | "down" => Self::ArrowDown,
            "ArrowLeft" | "Left" | "left" => Self::ArrowLeft,
            "ArrowRight" | "Right" | "right" => Self::ArrowRight,
            "Enter" | "enter" | "Return" => Self::Enter,
            " " | "Space" | "space" => Self::Space,
            "Escape" | "escape" | "Esc" | "esc" => Self::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return Err(NavigationError::UnknownKey(name.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArrowUp => write!(f, "ArrowUp"),
            Self::ArrowDown => write!(f, "ArrowDown"),
            Self::ArrowLeft => write!(f, "ArrowLeft"),
            Self::ArrowRight => write!(f, "ArrowRight"),
            Self::Enter => write!(f, "Enter"),
            Self::Space => write!(f, "Space"),
            Self::Escape => write!(f, "Escape"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = NavigationError;

    fn try_from(name: String) -> Result<Self> {
        Self::parse(&name)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// Where keyboard focus sat when the key was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyTarget {
    /// No focused element (the page body)
    Body,
    /// The search field
    SearchInput,
    /// An item inside a panel
    Panel(Panel),
    /// Any other focusable element (buttons, text inputs)
    Other,
}

/// A key press as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub target: KeyTarget,
    /// Set once a handler has consumed the event
    pub default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: Key, target: KeyTarget) -> Self {
        Self {
            key,
            target,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
