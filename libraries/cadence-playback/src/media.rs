//! OS media-session integration
//!
//! Lock-screen and hardware-key controls. The engine publishes now-playing
//! metadata and position to the surface; the surface sends user actions back
//! through a [`MediaCommandSender`].

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

/// Now-playing metadata shown by the OS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub artwork: Option<String>,
}

/// Position snapshot for scrubbers on the OS surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionState {
    pub position: Duration,
    pub duration: Duration,
    pub playback_rate: f64,
}

/// Actions the engine binds on the OS surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaAction {
    Play,
    Pause,
    PreviousTrack,
    NextTrack,
    SeekTo,
}

impl MediaAction {
    /// Every action bound while a track is loaded
    pub const ALL: [MediaAction; 5] = [
        MediaAction::Play,
        MediaAction::Pause,
        MediaAction::PreviousTrack,
        MediaAction::NextTrack,
        MediaAction::SeekTo,
    ];
}

/// A user action triggered from the OS surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaCommand {
    Play,
    Pause,
    PreviousTrack,
    NextTrack,
    SeekTo(Duration),
}

impl MediaCommand {
    pub fn action(&self) -> MediaAction {
        match self {
            Self::Play => MediaAction::Play,
            Self::Pause => MediaAction::Pause,
            Self::PreviousTrack => MediaAction::PreviousTrack,
            Self::NextTrack => MediaAction::NextTrack,
            Self::SeekTo(_) => MediaAction::SeekTo,
        }
    }
}

/// Platform media surface
pub trait MediaSession: Send {
    fn set_metadata(&mut self, metadata: &NowPlaying);

    fn clear_metadata(&mut self);

    /// Register handlers for the given actions
    fn bind_actions(&mut self, actions: &[MediaAction]);

    /// Remove every registered handler
    fn unbind_actions(&mut self);

    fn set_position_state(&mut self, state: PositionState);
}

/// Handle the platform uses to deliver media commands to the engine
///
/// Cheap to clone. Sending never blocks; commands queue until the engine
/// drains them.
#[derive(Debug, Clone)]
pub struct MediaCommandSender {
    tx: mpsc::UnboundedSender<MediaCommand>,
}

impl MediaCommandSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<MediaCommand>) -> Self {
        Self { tx }
    }

    /// Deliver a command. Returns false once the engine is gone.
    pub fn send(&self, command: MediaCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}
