//! Optimistic playlist store

use crate::{
    config::LibraryConfig,
    error::{LibraryError, Result},
    optimistic::{Entity, MutationTicket, OptimisticAction, OptimisticCollection},
    runner::{MutationReport, MutationRunner},
};
use cadence_core::{
    CoreError, ImageUpload, LibraryGateway, MembershipOutcome, Playlist, PlaylistId, TrackId,
};
use std::sync::Arc;
use tracing::debug;

/// Name given to playlists created without one
pub const UNTITLED_PLAYLIST_NAME: &str = "New";

/// Partial playlist update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistPatch {
    Rename(String),
    Cover(String),
    AppendTrack(TrackId),
}

impl Entity for Playlist {
    type Id = PlaylistId;
    type Patch = PlaylistPatch;

    fn id(&self) -> &PlaylistId {
        &self.id
    }

    fn apply_patch(&mut self, patch: &PlaylistPatch) {
        match patch {
            PlaylistPatch::Rename(name) => {
                self.name.clone_from(name);
                self.touch();
            }
            PlaylistPatch::Cover(url) => {
                self.cover_url = Some(url.clone());
                self.touch();
            }
            PlaylistPatch::AppendTrack(track_id) => {
                self.append_track(track_id.clone());
            }
        }
    }
}

/// Client-visible playlists with optimistic writes
///
/// Every mutation updates the visible collection synchronously, then issues
/// the collaborator call on the Tokio runtime and returns. Call
/// [`Self::poll_completions`] to fold finished calls back in.
pub struct PlaylistStore {
    collection: OptimisticCollection<Playlist>,
    gateway: Arc<dyn LibraryGateway>,
    runner: MutationRunner<Playlist>,
    config: LibraryConfig,
}

impl PlaylistStore {
    pub fn new(
        gateway: Arc<dyn LibraryGateway>,
        baseline: Vec<Playlist>,
        config: LibraryConfig,
    ) -> Self {
        Self {
            collection: OptimisticCollection::new(baseline, config.failure_policy),
            gateway,
            runner: MutationRunner::new(),
            config,
        }
    }

    /// Current read model
    pub fn playlists(&self) -> &[Playlist] {
        self.collection.visible()
    }

    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.collection.get(id)
    }

    pub fn collection(&self) -> &OptimisticCollection<Playlist> {
        &self.collection
    }

    /// Create an empty playlist
    ///
    /// Returns `None` when a playlist with this id is already visible.
    pub fn create(&mut self, id: PlaylistId, name: impl Into<String>) -> Option<MutationTicket> {
        if self.collection.contains(&id) {
            return None;
        }

        let name = name.into();
        let ticket = self.collection.issue_ticket();
        debug!(%ticket, playlist_id = %id, "Creating playlist");
        self.collection
            .apply_optimistic(OptimisticAction::Insert(Playlist::new(id.clone(), name.clone())), ticket);

        let gateway = Arc::clone(&self.gateway);
        self.runner.spawn(ticket, async move {
            gateway.create_playlist(&id, &name).await.map(|()| None)
        });
        Some(ticket)
    }

    /// Create a playlist with a fresh id and the default name
    pub fn create_untitled(&mut self) -> (PlaylistId, Option<MutationTicket>) {
        let id = PlaylistId::generate();
        let ticket = self.create(id.clone(), UNTITLED_PLAYLIST_NAME);
        (id, ticket)
    }

    /// Rename a playlist
    ///
    /// The name is trimmed. Empty or unchanged names and unknown ids are
    /// rejected with `None` and nothing is sent.
    pub fn rename(&mut self, id: &PlaylistId, name: &str) -> Option<MutationTicket> {
        let name = name.trim();
        let current = self.collection.get(id)?;
        if name.is_empty() || current.name == name {
            return None;
        }

        let ticket = self.collection.issue_ticket();
        debug!(%ticket, playlist_id = %id, "Renaming playlist");
        self.collection.apply_optimistic(
            OptimisticAction::Update {
                id: id.clone(),
                patch: PlaylistPatch::Rename(name.to_string()),
            },
            ticket,
        );

        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        let name = name.to_string();
        self.runner.spawn(ticket, async move {
            gateway.rename_playlist(&id, &name).await.map(|()| None)
        });
        Some(ticket)
    }

    /// Delete a playlist; `None` if it is not visible
    pub fn remove(&mut self, id: &PlaylistId) -> Option<MutationTicket> {
        if !self.collection.contains(id) {
            return None;
        }

        let ticket = self.collection.issue_ticket();
        debug!(%ticket, playlist_id = %id, "Deleting playlist");
        self.collection
            .apply_optimistic(OptimisticAction::Delete(id.clone()), ticket);

        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        self.runner.spawn(ticket, async move {
            gateway.delete_playlist(&id).await.map(|()| None)
        });
        Some(ticket)
    }

    /// Append a track to a playlist
    ///
    /// Membership is checked against the visible collection; only an
    /// actual addition reaches the collaborator.
    pub fn add_track(&mut self, playlist_id: &PlaylistId, track_id: &TrackId) -> MembershipOutcome {
        let Some(playlist) = self.collection.get(playlist_id) else {
            return MembershipOutcome::UnknownPlaylist;
        };
        if playlist.contains(track_id) {
            return MembershipOutcome::AlreadyPresent;
        }
        let order = playlist.next_order();

        let ticket = self.collection.issue_ticket();
        debug!(%ticket, %playlist_id, %track_id, order, "Adding track to playlist");
        self.collection.apply_optimistic(
            OptimisticAction::Update {
                id: playlist_id.clone(),
                patch: PlaylistPatch::AppendTrack(track_id.clone()),
            },
            ticket,
        );

        let gateway = Arc::clone(&self.gateway);
        let playlist_id = playlist_id.clone();
        let track_id = track_id.clone();
        self.runner.spawn(ticket, async move {
            gateway
                .add_track_to_playlist(&playlist_id, &track_id)
                .await
                .map(|_| None)
        });

        MembershipOutcome::Added { order }
    }

    /// Upload a cover image
    ///
    /// Size is validated before anything is sent. The cover shows up once
    /// the collaborator returns its reference.
    pub fn upload_cover(&mut self, id: &PlaylistId, upload: ImageUpload) -> Result<MutationTicket> {
        upload.validate(self.config.max_image_bytes)?;
        if !self.collection.contains(id) {
            return Err(LibraryError::UnknownPlaylist(id.clone()));
        }

        let ticket = self.collection.issue_ticket();
        debug!(%ticket, playlist_id = %id, bytes = upload.size(), "Uploading playlist cover");

        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        self.runner.spawn(ticket, async move {
            let url = gateway.upload_playlist_cover(&id, &upload).await?;
            Ok::<_, CoreError>(Some(OptimisticAction::Update {
                id,
                patch: PlaylistPatch::Cover(url),
            }))
        });
        Ok(ticket)
    }

    /// Fold finished collaborator calls into the collection
    pub fn poll_completions(&mut self) -> Vec<MutationReport> {
        self.runner.poll(&mut self.collection)
    }

    /// Replace the baseline with fresh server state
    pub fn refresh_baseline(&mut self, playlists: Vec<Playlist>) {
        self.collection.refresh_baseline(playlists);
    }
}
