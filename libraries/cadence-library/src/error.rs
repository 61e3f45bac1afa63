//! Error types for library mutations

use cadence_core::{CoreError, PlaylistId, TrackId, UploadError};
use thiserror::Error;

/// Library mutation errors
///
/// Only errors detectable before a mutation is submitted surface here.
/// Collaborator failures arrive later through completion polling.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Upload rejected at the edge
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Target playlist is not in the visible collection
    #[error("Playlist not found: {0}")]
    UnknownPlaylist(PlaylistId),

    /// Target track is not in the visible collection
    #[error("Track not found: {0}")]
    UnknownTrack(TrackId),

    /// Input rejected by the domain layer
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, LibraryError>;
