//! Cadence Core
//!
//! Platform-agnostic domain types, collaborator contracts, and error handling
//! shared by the playback, navigation and library crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `PlaylistEntry`, `TrackFieldEdit`, `ImageUpload`
//! - **Collaborator Contracts**: `LibraryGateway` (persistence mutation calls)
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! Nothing in here talks to a database, a network or an audio device. Those are
//! supplied by the host through the traits in [`traits`].
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{PlayableSource, Playlist, PlaylistId, Track, TrackId};
//! use cadence_core::MembershipOutcome;
//!
//! let track = Track::new(TrackId::new("1"), "Midnight City", "M83", 243)
//!     .with_source(PlayableSource::parse("file://tracks/midnight-city.mp3"));
//!
//! let mut playlist = Playlist::new(PlaylistId::new("7"), "Drive");
//! assert_eq!(playlist.append_track(track.id.clone()), MembershipOutcome::Added { order: 1 });
//! assert_eq!(playlist.append_track(track.id.clone()), MembershipOutcome::AlreadyPresent);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::LibraryGateway;

pub use types::{
    ImageUpload, MembershipOutcome, PlayableSource, Playlist, PlaylistEntry, PlaylistId, Track,
    TrackField, TrackFieldEdit, TrackId, UploadError, DEFAULT_MAX_IMAGE_BYTES,
};
