//! One user session: playback, keyboard focus and library state together

use crate::{config::SessionConfig, error::Result};
use cadence_core::{
    ImageUpload, LibraryGateway, MembershipOutcome, Playlist, PlaylistId, Track, TrackFieldEdit,
    TrackId,
};
use cadence_library::{MutationReport, MutationTicket, PlaylistStore, TrackStore};
use cadence_navigation::{
    GlobalAction, KeyEvent, KeyOutcome, KeyTarget, NavigationController, Panel, PanelContainer,
};
use cadence_playback::{
    HostAudio, HostEvent, MediaCommandSender, MediaSession, PlaybackEngine, PlaybackEvent,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDispatch {
    /// Result of the panel handler (`Ignored` when the key did not target a panel)
    pub panel: KeyOutcome,
    /// Result of the page-wide listener
    pub global: GlobalAction,
}

impl KeyDispatch {
    pub fn prevent_default(&self) -> bool {
        self.panel.prevent_default() || self.global != GlobalAction::None
    }
}

/// Everything that changed since the last [`Session::pump`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PumpReport {
    pub playback: Vec<PlaybackEvent>,
    pub playlists: Vec<MutationReport>,
    pub tracks: Vec<MutationReport>,
}

impl PumpReport {
    pub fn is_empty(&self) -> bool {
        self.playback.is_empty() && self.playlists.is_empty() && self.tracks.is_empty()
    }
}

/// Composition root for one session
///
/// Owns exactly one engine, one navigation controller and one store per
/// collection. Nothing is global, so several sessions can live side by side.
pub struct Session {
    engine: PlaybackEngine,
    navigation: NavigationController,
    playlists: PlaylistStore,
    tracks: TrackStore,

    // Engine events already drained by session-initiated calls
    playback_events: Vec<PlaybackEvent>,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        host: Box<dyn HostAudio>,
        gateway: Arc<dyn LibraryGateway>,
        playlists: Vec<Playlist>,
        tracks: Vec<Track>,
    ) -> Self {
        info!(
            playlists = playlists.len(),
            tracks = tracks.len(),
            "Starting session"
        );

        Self {
            engine: PlaybackEngine::new(config.playback, host),
            navigation: NavigationController::new(config.navigation),
            playlists: PlaylistStore::new(Arc::clone(&gateway), playlists, config.library.clone()),
            tracks: TrackStore::new(gateway, tracks, config.library),
            playback_events: Vec::new(),
        }
    }

    pub fn attach_media_session(&mut self, media: Box<dyn MediaSession>) {
        self.engine.attach_media_session(media);
    }

    /// Handle for the platform to deliver media-surface commands
    pub fn media_commands(&self) -> MediaCommandSender {
        self.engine.media_commands()
    }

    pub fn register_panel(&mut self, panel: Panel, container: &Arc<dyn PanelContainer>) {
        self.navigation.register_panel(panel, container);
    }

    // ===== Playback =====

    /// Play `track`; on success the tracklist becomes the active panel
    pub fn play_track(&mut self, track: Track) -> Result<()> {
        let result = self.engine.play_track(track);
        self.absorb_engine_events();
        Ok(result?)
    }

    /// Replace the queue with `tracks` and play the one at `index`
    ///
    /// An out-of-range index leaves everything untouched.
    pub fn play_from_list(&mut self, tracks: Vec<Track>, index: usize) -> Result<()> {
        let Some(track) = tracks.get(index).cloned() else {
            debug!(index, len = tracks.len(), "Ignoring play request outside the list");
            return Ok(());
        };

        self.engine.set_queue(tracks);
        let result = self.engine.play_track(track);
        self.absorb_engine_events();
        Ok(result?)
    }

    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        self.engine.set_queue(tracks);
    }

    pub fn toggle_play_pause(&mut self) {
        self.engine.toggle_play_pause();
    }

    pub fn next(&mut self) -> Result<()> {
        let result = self.engine.play_next_track();
        self.absorb_engine_events();
        Ok(result?)
    }

    pub fn previous(&mut self) -> Result<()> {
        let result = self.engine.play_previous_track();
        self.absorb_engine_events();
        Ok(result?)
    }

    /// Take the events of a call made on the user's behalf
    ///
    /// A track change focuses the tracklist right away, so later key presses
    /// win over it. The events are still reported by the next [`Self::pump`].
    fn absorb_engine_events(&mut self) {
        let events = self.engine.drain_events();
        if events.iter().any(is_track_change) {
            self.navigation.set_active_panel(Panel::Tracklist);
        }
        self.playback_events.extend(events);
    }

    pub fn seek(&mut self, position: Duration) {
        self.engine.seek(position);
    }

    pub fn set_volume(&mut self, level: u8) {
        self.engine.set_volume(level);
    }

    pub fn toggle_mute(&mut self) {
        self.engine.toggle_mute();
    }

    /// Forward a push event from the host audio element
    pub fn on_host_event(&mut self, event: HostEvent) {
        self.engine.on_host_event(event);
    }

    // ===== Keyboard =====

    /// Route a key press: the focused panel first, then the page listener
    ///
    /// A panel that handles the key marks the event as consumed, which keeps
    /// the page listener from acting on it. A toggle from the page listener
    /// is applied to playback right away.
    pub fn handle_key(&mut self, mut event: KeyEvent) -> KeyDispatch {
        let panel = match event.target {
            KeyTarget::Panel(panel) => self.navigation.handle_panel_key(event.key, panel),
            _ => KeyOutcome::Ignored,
        };
        if panel.prevent_default() {
            event.prevent_default();
        }

        let global = self.navigation.handle_global_key(&event);
        if global == GlobalAction::TogglePlayback {
            self.engine.toggle_play_pause();
        }

        debug!(key = %event.key, ?panel, ?global, "Key dispatched");
        KeyDispatch { panel, global }
    }

    // ===== Library =====

    /// Create a playlist with the default name
    pub fn create_playlist(&mut self) -> (PlaylistId, Option<MutationTicket>) {
        self.playlists.create_untitled()
    }

    pub fn rename_playlist(&mut self, id: &PlaylistId, name: &str) -> Option<MutationTicket> {
        self.playlists.rename(id, name)
    }

    pub fn delete_playlist(&mut self, id: &PlaylistId) -> Option<MutationTicket> {
        self.playlists.remove(id)
    }

    pub fn add_track_to_playlist(
        &mut self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> MembershipOutcome {
        self.playlists.add_track(playlist_id, track_id)
    }

    pub fn upload_playlist_cover(
        &mut self,
        id: &PlaylistId,
        upload: ImageUpload,
    ) -> Result<MutationTicket> {
        Ok(self.playlists.upload_cover(id, upload)?)
    }

    pub fn update_track_field(
        &mut self,
        id: &TrackId,
        edit: TrackFieldEdit,
    ) -> Option<MutationTicket> {
        self.tracks.update_field(id, edit)
    }

    pub fn update_track_field_raw(
        &mut self,
        id: &TrackId,
        field: &str,
        value: &str,
    ) -> Result<MutationTicket> {
        Ok(self.tracks.update_field_raw(id, field, value)?)
    }

    pub fn upload_track_image(&mut self, id: &TrackId, upload: ImageUpload) -> Result<MutationTicket> {
        Ok(self.tracks.upload_image(id, upload)?)
    }

    pub fn refresh_playlists(&mut self, playlists: Vec<Playlist>) {
        self.playlists.refresh_baseline(playlists);
    }

    pub fn refresh_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks.refresh_baseline(tracks);
    }

    // ===== Event loop =====

    /// Drain everything that arrived since the last call
    ///
    /// Applies pending media-surface commands, folds finished library calls
    /// into the stores and hands back the engine's events. A track change the
    /// engine made on its own (auto-advance, media commands) moves keyboard
    /// focus to the tracklist.
    pub fn pump(&mut self) -> PumpReport {
        self.engine.drain_media_commands();

        let fresh = self.engine.drain_events();
        if fresh.iter().any(is_track_change) {
            self.navigation.set_active_panel(Panel::Tracklist);
        }

        let mut playback = std::mem::take(&mut self.playback_events);
        playback.extend(fresh);

        PumpReport {
            playback,
            playlists: self.playlists.poll_completions(),
            tracks: self.tracks.poll_completions(),
        }
    }

    /// Stop playback and release every host subscription
    ///
    /// Safe to call more than once. Pending library calls keep running and
    /// can still be folded in by [`Self::pump`].
    pub fn end(&mut self) {
        self.engine.end_session();
    }

    // ===== State Queries =====

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationController {
        &mut self.navigation
    }

    pub fn playlists(&self) -> &[Playlist] {
        self.playlists.playlists()
    }

    pub fn tracks(&self) -> &[Track] {
        self.tracks.tracks()
    }

    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.get(id)
    }

    pub fn playlist(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.get(id)
    }
}

fn is_track_change(event: &PlaybackEvent) -> bool {
    matches!(event, PlaybackEvent::TrackChanged { .. })
}
