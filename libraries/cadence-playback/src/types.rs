//! Core types for the playback engine

use cadence_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default address local files are streamed from
pub const DEFAULT_STREAM_ENDPOINT: &str = "/api/audio";

/// Transport status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportStatus {
    /// Currently playing
    Playing,

    /// Paused, or nothing loaded
    Paused,
}

impl TransportStatus {
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Snapshot of the engine for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Track being played, `None` when idle
    pub current_track: Option<Track>,

    pub status: TransportStatus,

    /// Elapsed position
    pub position: Duration,

    /// Duration reported by the host (zero until known)
    pub duration: Duration,

    /// Active queue in play order
    pub queue: Vec<Track>,

    /// Volume level (0-100)
    pub volume: u8,

    pub muted: bool,
}

impl PlaybackState {
    pub fn is_idle(&self) -> bool {
        self.current_track.is_none()
    }
}

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Address prefix for local files (default: `/api/audio`)
    pub stream_endpoint: String,

    /// Initial volume (0-100, default: 100)
    pub initial_volume: u8,

    /// Continue with the next queued track when one ends (default: true)
    pub auto_advance: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            stream_endpoint: DEFAULT_STREAM_ENDPOINT.to_string(),
            initial_volume: 100,
            auto_advance: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.stream_endpoint, "/api/audio");
        assert_eq!(config.initial_volume, 100);
        assert!(config.auto_advance);
    }
}
