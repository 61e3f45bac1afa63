//! Cadence - Keyboard Navigation
//!
//! Routes keyboard focus across independently registered UI panels without
//! relying on the host's native tab order.
//!
//! The controller owns which panel is active and an explicit cursor per
//! panel. Panels register a [`PanelContainer`] at mount time; the controller
//! keeps only a weak handle, so unmounting never leaves it holding a dead
//! view.
//!
//! # Example
//!
//! ```rust
//! use cadence_navigation::{Key, KeyOutcome, NavigationController, Panel, PanelContainer};
//! use std::sync::Arc;
//!
//! struct Rows(usize);
//!
//! impl PanelContainer for Rows {
//!     fn navigable_len(&self) -> usize {
//!         self.0
//!     }
//!     fn focus_item(&self, _index: usize) {}
//! }
//!
//! let mut nav = NavigationController::default();
//! let rows: Arc<dyn PanelContainer> = Arc::new(Rows(3));
//! nav.register_panel(Panel::Tracklist, &rows);
//!
//! nav.handle_panel_key(Key::Char('j'), Panel::Tracklist);
//! nav.handle_panel_key(Key::Char('j'), Panel::Tracklist);
//!
//! assert_eq!(
//!     nav.handle_panel_key(Key::Enter, Panel::Tracklist),
//!     KeyOutcome::Activate { panel: Panel::Tracklist, index: 1 }
//! );
//! ```

mod bindings;
mod controller;
mod error;
mod key;
mod panel;

pub use bindings::{KeyBindings, PanelAction};
pub use controller::{GlobalAction, KeyOutcome, NavigationConfig, NavigationController};
pub use error::{NavigationError, Result};
pub use key::{Key, KeyEvent, KeyTarget};
pub use panel::{Panel, PanelContainer};
