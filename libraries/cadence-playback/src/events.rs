//! Playback Events
//!
//! Event-based communication for UI synchronization. The engine queues an
//! event at every observable change and the owner drains them with
//! [`PlaybackEngine::drain_events`](crate::PlaybackEngine::drain_events).

use crate::types::TransportStatus;
use cadence_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport status changed
    StateChanged {
        /// The new transport status
        status: TransportStatus,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position update from the host timing feed
    PositionUpdate {
        position_ms: u64,
        duration_ms: u64,
    },

    /// Queue was replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Host or resolution failure; engine state was kept
    Error {
        /// Error message
        message: String,
    },

    /// Session torn down, no current track
    SessionEnded,
}
