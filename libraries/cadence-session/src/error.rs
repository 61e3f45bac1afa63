//! Error types for the session layer

use cadence_library::LibraryError;
use cadence_playback::PlaybackError;
use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration could not be read or deserialized
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Library(#[from] LibraryError),
}

impl From<config::ConfigError> for SessionError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
