//! Cadence Session
//!
//! Wires the playback engine, the navigation controller and the library
//! stores into one [`Session`] and loads their shared [`SessionConfig`].
//!
//! Hosts drive a session by forwarding user input and host-audio events,
//! then calling [`Session::pump`] once per tick to collect what changed.

mod config;
mod error;
mod session;

pub use config::{SessionConfig, ENV_PREFIX};
pub use error::{Result, SessionError};
pub use session::{KeyDispatch, PumpReport, Session};
