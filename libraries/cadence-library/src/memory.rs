//! In-memory library gateway
//!
//! Backs the headless host and the tests. Can be told to fail every call or
//! to answer after a delay, which is enough to exercise rollback and
//! out-of-order completions.

use async_trait::async_trait;
use cadence_core::{
    CoreError, ImageUpload, LibraryGateway, MembershipOutcome, Playlist, PlaylistId, Result,
    Track, TrackFieldEdit, TrackId,
};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct MemoryState {
    playlists: Vec<Playlist>,
    tracks: Vec<Track>,
    failing: bool,
    latency: Duration,
    calls: usize,
}

/// Library gateway holding everything in process memory
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
}

impl MemoryGateway {
    pub fn new(playlists: Vec<Playlist>, tracks: Vec<Track>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                playlists,
                tracks,
                ..MemoryState::default()
            }),
        }
    }

    /// Make every following call fail with a network error
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Delay every following call
    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = latency;
    }

    /// Server-side playlists, as a baseline refresh would return them
    pub fn playlists(&self) -> Vec<Playlist> {
        self.lock().playlists.clone()
    }

    /// Server-side tracks, as a baseline refresh would return them
    pub fn tracks(&self) -> Vec<Track> {
        self.lock().tracks.clone()
    }

    /// Number of calls received (including failed ones)
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the call, wait out the latency and check the failure switch
    async fn enter(&self, operation: &str) -> Result<()> {
        let (latency, failing) = {
            let mut state = self.lock();
            state.calls += 1;
            (state.latency, state.failing)
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if failing {
            return Err(CoreError::network(format!("{operation} failed")));
        }
        Ok(())
    }

    fn with_playlist<R>(
        &self,
        id: &PlaylistId,
        f: impl FnOnce(&mut Playlist) -> R,
    ) -> Result<R> {
        let mut state = self.lock();
        let playlist = state
            .playlists
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CoreError::PlaylistNotFound(id.clone()))?;
        Ok(f(playlist))
    }

    fn with_track<R>(&self, id: &TrackId, f: impl FnOnce(&mut Track) -> R) -> Result<R> {
        let mut state = self.lock();
        let track = state
            .tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| CoreError::TrackNotFound(id.clone()))?;
        Ok(f(track))
    }
}

#[async_trait]
impl LibraryGateway for MemoryGateway {
    async fn create_playlist(&self, id: &PlaylistId, name: &str) -> Result<()> {
        self.enter("create_playlist").await?;

        let mut state = self.lock();
        if state.playlists.iter().any(|p| &p.id == id) {
            return Err(CoreError::invalid_input(format!(
                "playlist {id} already exists"
            )));
        }
        state.playlists.push(Playlist::new(id.clone(), name));
        Ok(())
    }

    async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<()> {
        self.enter("rename_playlist").await?;
        self.with_playlist(id, |playlist| {
            playlist.name = name.to_string();
            playlist.touch();
        })
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        self.enter("delete_playlist").await?;

        let mut state = self.lock();
        let before = state.playlists.len();
        state.playlists.retain(|p| &p.id != id);
        if state.playlists.len() == before {
            return Err(CoreError::PlaylistNotFound(id.clone()));
        }
        Ok(())
    }

    async fn upload_playlist_cover(&self, id: &PlaylistId, upload: &ImageUpload) -> Result<String> {
        self.enter("upload_playlist_cover").await?;

        let url = format!("memory://playlist-covers/{id}-{}", upload.file_name);
        self.with_playlist(id, |playlist| {
            playlist.cover_url = Some(url.clone());
            playlist.touch();
        })?;
        Ok(url)
    }

    async fn update_track_field(&self, id: &TrackId, edit: &TrackFieldEdit) -> Result<()> {
        self.enter("update_track_field").await?;
        self.with_track(id, |track| track.apply_edit(edit))
    }

    async fn upload_track_image(&self, id: &TrackId, upload: &ImageUpload) -> Result<String> {
        self.enter("upload_track_image").await?;

        let url = format!("memory://track-images/{id}-{}", upload.file_name);
        self.with_track(id, |track| track.image_url = Some(url.clone()))?;
        Ok(url)
    }

    async fn add_track_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<MembershipOutcome> {
        self.enter("add_track_to_playlist").await?;

        let mut state = self.lock();
        match state.playlists.iter_mut().find(|p| &p.id == playlist_id) {
            Some(playlist) => Ok(playlist.append_track(track_id.clone())),
            None => Ok(MembershipOutcome::UnknownPlaylist),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_track_reports_existing_membership() {
        let gateway = MemoryGateway::new(vec![Playlist::new(PlaylistId::new("p"), "P")], vec![]);
        let p = PlaylistId::new("p");
        let t = TrackId::new("t");

        assert_eq!(
            gateway.add_track_to_playlist(&p, &t).await.unwrap(),
            MembershipOutcome::Added { order: 1 }
        );
        assert_eq!(
            gateway.add_track_to_playlist(&p, &t).await.unwrap(),
            MembershipOutcome::AlreadyPresent
        );
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_gateway_rejects_without_writing() {
        let gateway = MemoryGateway::new(vec![], vec![]);
        gateway.set_failing(true);

        let err = gateway
            .create_playlist(&PlaylistId::new("p"), "P")
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Network(_)));
        assert!(gateway.playlists().is_empty());
    }
}
