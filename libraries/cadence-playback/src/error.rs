//! Error types for the playback engine

use cadence_core::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track has no playable-source reference
    #[error("Track {0} has no playable source")]
    NoPlayableSource(TrackId),

    /// Local locator could not be turned into a stream address
    #[error("Cannot resolve source {locator}: {reason}")]
    UnresolvableSource { locator: String, reason: String },

    /// Host audio element reported a failure
    #[error("Host audio error: {0}")]
    Host(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Errors from the audio streaming collaborator
#[derive(Debug, Error)]
pub enum StreamError {
    /// No audio file under that name
    #[error("Audio file not found: {0}")]
    NotFound(String),

    /// Name would resolve outside the audio directory
    #[error("Invalid audio file name: {0}")]
    InvalidName(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
