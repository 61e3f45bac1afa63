/// Collaborator contracts for Cadence
use crate::error::Result;
use crate::types::{ImageUpload, MembershipOutcome, PlaylistId, TrackFieldEdit, TrackId};
use async_trait::async_trait;

/// Persistence mutation calls
///
/// Implemented by whatever owns the backing store (an HTTP client, a database
/// layer, an in-memory fake). The optimistic library layer calls these from
/// detached tasks, so implementations must be `Send + Sync` and must not
/// assume they are awaited by the caller that issued the mutation.
///
/// Every method is expected to be idempotent enough that a retried call after
/// a transport failure does not corrupt the baseline.
#[async_trait]
pub trait LibraryGateway: Send + Sync {
    /// Create an empty playlist with a caller-chosen id
    async fn create_playlist(&self, id: &PlaylistId, name: &str) -> Result<()>;

    /// Rename a playlist
    async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<()>;

    /// Delete a playlist and its membership
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()>;

    /// Store a playlist cover image
    ///
    /// Returns the reference the cover is now reachable under.
    async fn upload_playlist_cover(&self, id: &PlaylistId, upload: &ImageUpload)
        -> Result<String>;

    /// Persist a single track field edit
    async fn update_track_field(&self, id: &TrackId, edit: &TrackFieldEdit) -> Result<()>;

    /// Store track artwork
    ///
    /// Returns the reference the artwork is now reachable under.
    async fn upload_track_image(&self, id: &TrackId, upload: &ImageUpload) -> Result<String>;

    /// Append a track to a playlist
    ///
    /// An existing (playlist, track) pair is reported as
    /// [`MembershipOutcome::AlreadyPresent`], never as an error.
    async fn add_track_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<MembershipOutcome>;
}
