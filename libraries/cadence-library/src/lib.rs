//! Cadence Library
//!
//! Client-side playlist and track collections with optimistic writes.
//!
//! Every mutation is visible in the read model as soon as it is submitted.
//! The collaborator call runs in the background on the Tokio runtime; its
//! completion is folded back in by `poll_completions`. Failed writes follow
//! the configured [`FailurePolicy`], and a baseline refresh drops every
//! finished entry while replaying the in-flight ones.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Playlist, PlaylistId};
//! use cadence_library::{LibraryConfig, MemoryGateway, PlaylistStore};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let baseline = vec![Playlist::new(PlaylistId::new("p1"), "Drive")];
//! let gateway = Arc::new(MemoryGateway::new(baseline.clone(), Vec::new()));
//! let mut store = PlaylistStore::new(gateway, baseline, LibraryConfig::default());
//!
//! store.remove(&PlaylistId::new("p1"));
//! assert!(store.playlists().is_empty());
//! # }
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod optimistic;
mod playlists;
mod runner;
mod tracks;

pub use config::LibraryConfig;
pub use error::{LibraryError, Result};
pub use memory::MemoryGateway;
pub use optimistic::{
    reduce, Entity, FailurePolicy, MutationStatus, MutationTicket, OptimisticAction,
    OptimisticCollection, PendingEntry,
};
pub use playlists::{PlaylistPatch, PlaylistStore, UNTITLED_PLAYLIST_NAME};
pub use runner::MutationReport;
pub use tracks::{TrackPatch, TrackStore};
