//! Optimistic track metadata store

use crate::{
    config::LibraryConfig,
    error::{LibraryError, Result},
    optimistic::{Entity, MutationTicket, OptimisticAction, OptimisticCollection},
    runner::{MutationReport, MutationRunner},
};
use cadence_core::{CoreError, ImageUpload, LibraryGateway, Track, TrackFieldEdit, TrackId};
use std::sync::Arc;
use tracing::debug;

/// Partial track update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackPatch {
    Field(TrackFieldEdit),
    Image(String),
}

impl Entity for Track {
    type Id = TrackId;
    type Patch = TrackPatch;

    fn id(&self) -> &TrackId {
        &self.id
    }

    fn apply_patch(&mut self, patch: &TrackPatch) {
        match patch {
            TrackPatch::Field(edit) => self.apply_edit(edit),
            TrackPatch::Image(url) => self.image_url = Some(url.clone()),
        }
    }
}

/// Client-visible track metadata with optimistic edits
pub struct TrackStore {
    collection: OptimisticCollection<Track>,
    gateway: Arc<dyn LibraryGateway>,
    runner: MutationRunner<Track>,
    config: LibraryConfig,
}

impl TrackStore {
    pub fn new(gateway: Arc<dyn LibraryGateway>, baseline: Vec<Track>, config: LibraryConfig) -> Self {
        Self {
            collection: OptimisticCollection::new(baseline, config.failure_policy),
            gateway,
            runner: MutationRunner::new(),
            config,
        }
    }

    /// Current read model
    pub fn tracks(&self) -> &[Track] {
        self.collection.visible()
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.collection.get(id)
    }

    pub fn collection(&self) -> &OptimisticCollection<Track> {
        &self.collection
    }

    /// Edit one metadata field; `None` if the track is not visible
    pub fn update_field(&mut self, id: &TrackId, edit: TrackFieldEdit) -> Option<MutationTicket> {
        if !self.collection.contains(id) {
            return None;
        }

        let ticket = self.collection.issue_ticket();
        debug!(%ticket, track_id = %id, field = %edit.field(), "Updating track field");
        self.collection.apply_optimistic(
            OptimisticAction::Update {
                id: id.clone(),
                patch: TrackPatch::Field(edit.clone()),
            },
            ticket,
        );

        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        self.runner.spawn(ticket, async move {
            gateway.update_track_field(&id, &edit).await.map(|()| None)
        });
        Some(ticket)
    }

    /// Edit a field from an untyped `(field, value)` pair, as submitted by a form
    pub fn update_field_raw(&mut self, id: &TrackId, field: &str, value: &str) -> Result<MutationTicket> {
        let edit = TrackFieldEdit::parse(field, value)?;
        self.update_field(id, edit)
            .ok_or_else(|| LibraryError::UnknownTrack(id.clone()))
    }

    /// Upload track artwork
    ///
    /// Size is validated before anything is sent. The artwork shows up once
    /// the collaborator returns its reference.
    pub fn upload_image(&mut self, id: &TrackId, upload: ImageUpload) -> Result<MutationTicket> {
        upload.validate(self.config.max_image_bytes)?;
        if !self.collection.contains(id) {
            return Err(LibraryError::UnknownTrack(id.clone()));
        }

        let ticket = self.collection.issue_ticket();
        debug!(%ticket, track_id = %id, bytes = upload.size(), "Uploading track image");

        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        self.runner.spawn(ticket, async move {
            let url = gateway.upload_track_image(&id, &upload).await?;
            Ok::<_, CoreError>(Some(OptimisticAction::Update {
                id,
                patch: TrackPatch::Image(url),
            }))
        });
        Ok(ticket)
    }

    /// Fold finished collaborator calls into the collection
    pub fn poll_completions(&mut self) -> Vec<MutationReport> {
        self.runner.poll(&mut self.collection)
    }

    /// Replace the baseline with fresh server state
    pub fn refresh_baseline(&mut self, tracks: Vec<Track>) {
        self.collection.refresh_baseline(tracks);
    }
}
