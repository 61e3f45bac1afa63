//! Playback engine
//!
//! Single owner of "what is playing and what plays next".

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    host::{HostAudio, HostEvent},
    media::{
        MediaAction, MediaCommand, MediaCommandSender, MediaSession, NowPlaying, PositionState,
    },
    queue::Queue,
    source::resolve_source,
    types::{PlaybackConfig, PlaybackState, TransportStatus},
    volume::Volume,
};
use cadence_core::Track;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Playback engine
///
/// Owns the host audio element exclusively, plus an optional OS media
/// surface. State transitions:
///
/// ```text
/// Idle ──play_track──▶ Playing ◀──toggle──▶ Paused
///   ▲                     │                    │
///   └─────end_session─────┴────────────────────┘
/// ```
///
/// Timing comes from host push events fed through [`Self::on_host_event`].
/// The feed is subscribed on the first loaded track and unsubscribed exactly
/// when the current track becomes `None`.
pub struct PlaybackEngine {
    config: PlaybackConfig,
    host: Box<dyn HostAudio>,
    media: Option<Box<dyn MediaSession>>,

    // State
    current_track: Option<Track>,
    status: TransportStatus,
    position: Duration,
    duration: Duration,
    queue: Queue,
    volume: Volume,

    // Host wiring
    timing_subscribed: bool,
    media_bound: bool,
    media_tx: mpsc::UnboundedSender<MediaCommand>,
    media_rx: mpsc::UnboundedReceiver<MediaCommand>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackEngine {
    /// Create an idle engine driving `host`
    pub fn new(config: PlaybackConfig, mut host: Box<dyn HostAudio>) -> Self {
        let volume = Volume::new(config.initial_volume);
        host.set_volume(volume.gain());
        let (media_tx, media_rx) = mpsc::unbounded_channel();

        Self {
            config,
            host,
            media: None,
            current_track: None,
            status: TransportStatus::Paused,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            queue: Queue::new(),
            volume,
            timing_subscribed: false,
            media_bound: false,
            media_tx,
            media_rx,
            pending_events: Vec::new(),
        }
    }

    /// Attach the OS media surface
    ///
    /// If a track is already current its metadata is published immediately.
    pub fn attach_media_session(&mut self, session: Box<dyn MediaSession>) {
        self.release_media_session();
        self.media = Some(session);
        if let Some(track) = self.current_track.clone() {
            self.publish_now_playing(&track);
        }
    }

    /// Handle for the platform to deliver media-surface commands
    pub fn media_commands(&self) -> MediaCommandSender {
        MediaCommandSender::new(self.media_tx.clone())
    }

    // ===== Transport =====

    /// Make `track` current and start playing it from the beginning
    ///
    /// The source is resolved first; on failure nothing changes and the
    /// error is returned. A track already playing is interrupted.
    pub fn play_track(&mut self, track: Track) -> Result<()> {
        let source = track
            .source
            .as_ref()
            .ok_or_else(|| PlaybackError::NoPlayableSource(track.id.clone()))?;
        let src = resolve_source(source, &self.config.stream_endpoint)?;

        debug!(track_id = %track.id, src = %src, "Loading track");

        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());
        let track_id = track.id.clone();

        self.position = Duration::ZERO;
        self.duration = track.duration();

        self.host.load(&src);
        self.host.play();

        if !self.timing_subscribed {
            self.host.subscribe_timing();
            self.timing_subscribed = true;
        }

        self.publish_now_playing(&track);
        self.current_track = Some(track);
        self.set_status(TransportStatus::Playing);

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });

        Ok(())
    }

    /// Flip between playing and paused; no-op when idle
    pub fn toggle_play_pause(&mut self) {
        match self.status {
            TransportStatus::Playing => self.pause(),
            TransportStatus::Paused => self.resume(),
        }
    }

    /// Resume output; no-op when idle or already playing
    pub fn resume(&mut self) {
        if self.current_track.is_none() || self.status.is_playing() {
            return;
        }
        self.host.play();
        self.set_status(TransportStatus::Playing);
    }

    /// Pause output; no-op when idle or already paused
    pub fn pause(&mut self) {
        if self.current_track.is_none() || !self.status.is_playing() {
            return;
        }
        self.host.pause();
        self.set_status(TransportStatus::Paused);
    }

    /// Play the queue successor of the current track, wrapping around
    pub fn play_next_track(&mut self) -> Result<()> {
        let next = match &self.current_track {
            Some(current) => self.queue.successor(&current.id).cloned(),
            None => None,
        };

        match next {
            Some(track) => self.play_track(track),
            None => Ok(()),
        }
    }

    /// Play the queue predecessor of the current track, wrapping around
    pub fn play_previous_track(&mut self) -> Result<()> {
        let previous = match &self.current_track {
            Some(current) => self.queue.predecessor(&current.id).cloned(),
            None => None,
        };

        match previous {
            Some(track) => self.play_track(track),
            None => Ok(()),
        }
    }

    /// Seek within the current track, clamped to `[0, duration]`
    pub fn seek(&mut self, target: Duration) {
        if self.current_track.is_none() {
            return;
        }

        let position = target.min(self.duration);
        self.host.seek(position);
        self.position = position;
        self.push_position_update();
    }

    /// Seek to a position in seconds; negative and NaN values clamp to 0
    pub fn seek_secs(&mut self, secs: f64) {
        let position = if secs.is_nan() || secs <= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(secs.min(self.duration.as_secs_f64()))
        };
        self.seek(position);
    }

    // ===== Queue =====

    /// Replace the queue; the current track and status are untouched
    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        self.queue.set(tracks);
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    // ===== Volume =====

    /// Set volume level (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        self.host.set_volume(self.volume.gain());
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== Host feedback =====

    /// Consume a push event from the host element
    ///
    /// Events arriving while no track is loaded are ignored.
    pub fn on_host_event(&mut self, event: HostEvent) {
        if self.current_track.is_none() {
            debug!(?event, "Ignoring host event while idle");
            return;
        }

        match event {
            HostEvent::TimeUpdate(position) => {
                self.position = position;
                self.push_position_update();
            }
            HostEvent::LoadedMetadata(duration) => {
                self.duration = duration;
                self.push_position_update();
            }
            HostEvent::Ended => self.handle_track_ended(),
            HostEvent::Error(message) => {
                let error = PlaybackError::Host(message);
                warn!(%error, "Host audio reported an error");
                self.pending_events.push(PlaybackEvent::Error {
                    message: error.to_string(),
                });
            }
        }
    }

    fn handle_track_ended(&mut self) {
        self.position = self.duration;

        if self.config.auto_advance && !self.queue.is_empty() {
            if let Err(e) = self.play_next_track() {
                warn!(error = %e, "Auto-advance failed");
                self.pending_events.push(PlaybackEvent::Error {
                    message: e.to_string(),
                });
                self.set_status(TransportStatus::Paused);
            }
        } else {
            self.set_status(TransportStatus::Paused);
        }
    }

    /// Apply every media-surface command received since the last drain
    ///
    /// Commands that arrive while no handlers are bound are dropped.
    pub fn drain_media_commands(&mut self) {
        while let Ok(command) = self.media_rx.try_recv() {
            if !self.media_bound {
                debug!(?command, "Dropping media command, handlers unbound");
                continue;
            }

            let outcome = match command {
                MediaCommand::Play => {
                    self.resume();
                    Ok(())
                }
                MediaCommand::Pause => {
                    self.pause();
                    Ok(())
                }
                MediaCommand::PreviousTrack => self.play_previous_track(),
                MediaCommand::NextTrack => self.play_next_track(),
                MediaCommand::SeekTo(position) => {
                    self.seek(position);
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                warn!(error = %e, ?command, "Media command failed");
                self.pending_events.push(PlaybackEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    // ===== Lifecycle =====

    /// Return to idle and release every host subscription
    pub fn end_session(&mut self) {
        if self.current_track.is_none() && !self.timing_subscribed && !self.media_bound {
            return;
        }

        if self.status.is_playing() {
            self.host.pause();
        }
        if self.timing_subscribed {
            self.host.unsubscribe_timing();
            self.timing_subscribed = false;
        }
        self.release_media_session();

        self.current_track = None;
        self.status = TransportStatus::Paused;
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;

        info!("Playback session ended");
        self.pending_events.push(PlaybackEvent::SessionEnded);
    }

    fn release_media_session(&mut self) {
        if let Some(media) = self.media.as_mut() {
            if self.media_bound {
                media.unbind_actions();
                media.clear_metadata();
            }
        }
        self.media_bound = false;
    }

    fn publish_now_playing(&mut self, track: &Track) {
        let Some(media) = self.media.as_mut() else {
            return;
        };

        media.set_metadata(&NowPlaying {
            title: track.name.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            artwork: track.image_url.clone(),
        });

        if !self.media_bound {
            media.bind_actions(&MediaAction::ALL);
            self.media_bound = true;
        }
    }

    fn push_position_update(&mut self) {
        if self.media_bound {
            if let Some(media) = self.media.as_mut() {
                media.set_position_state(PositionState {
                    position: self.position.min(self.duration),
                    duration: self.duration,
                    playback_rate: 1.0,
                });
            }
        }

        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_ms: self.position.as_millis() as u64,
            duration_ms: self.duration.as_millis() as u64,
        });
    }

    fn set_status(&mut self, status: TransportStatus) {
        if self.status != status {
            debug!(?status, "Transport status changed");
            self.status = status;
            self.pending_events
                .push(PlaybackEvent::StateChanged { status });
        }
    }

    // ===== State Queries =====

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn status(&self) -> TransportStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.current_track.is_some() && self.status.is_playing()
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn is_timing_subscribed(&self) -> bool {
        self.timing_subscribed
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Snapshot for rendering
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            current_track: self.current_track.clone(),
            status: self.status,
            position: self.position,
            duration: self.duration,
            queue: self.queue.tracks().to_vec(),
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.end_session();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHostAudio;
    use cadence_core::{PlayableSource, TrackId};
    use mockall::predicate::eq;

    fn track(id: &str) -> Track {
        Track::new(TrackId::new(id), format!("Track {id}"), "Artist", 180)
            .with_source(PlayableSource::parse(format!("file://tracks/{id}.mp3")))
    }

    #[test]
    fn play_track_loads_plays_and_subscribes_once() {
        let mut host = MockHostAudio::new();
        host.expect_set_volume().return_const(());
        host.expect_load()
            .with(eq("/api/audio/a.mp3"))
            .times(1)
            .return_const(());
        host.expect_load()
            .with(eq("/api/audio/b.mp3"))
            .times(1)
            .return_const(());
        host.expect_play().times(2).return_const(());
        host.expect_subscribe_timing().times(1).return_const(());
        // Drop tears the session down
        host.expect_pause().times(1).return_const(());
        host.expect_unsubscribe_timing().times(1).return_const(());

        let mut engine = PlaybackEngine::new(PlaybackConfig::default(), Box::new(host));
        engine.play_track(track("a")).unwrap();
        engine.play_track(track("b")).unwrap();

        assert_eq!(engine.current_track().unwrap().id.as_str(), "b");
        assert!(engine.is_playing());
    }

    #[test]
    fn failed_resolution_leaves_host_untouched() {
        let mut host = MockHostAudio::new();
        host.expect_set_volume().return_const(());
        host.expect_load().never();
        host.expect_play().never();

        let mut engine = PlaybackEngine::new(PlaybackConfig::default(), Box::new(host));
        let unresolvable = Track::new(TrackId::new("x"), "X", "Y", 10)
            .with_source(PlayableSource::parse("file://tracks/"));

        assert!(engine.play_track(unresolvable).is_err());
        assert!(engine.current_track().is_none());
        assert!(!engine.has_pending_events());
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut host = MockHostAudio::new();
        host.expect_set_volume().return_const(());
        host.expect_load().return_const(());
        host.expect_play().return_const(());
        host.expect_subscribe_timing().return_const(());
        host.expect_seek()
            .with(eq(Duration::from_secs(180)))
            .times(1)
            .return_const(());
        host.expect_seek()
            .with(eq(Duration::ZERO))
            .times(1)
            .return_const(());
        host.expect_pause().return_const(());
        host.expect_unsubscribe_timing().return_const(());

        let mut engine = PlaybackEngine::new(PlaybackConfig::default(), Box::new(host));
        engine.play_track(track("a")).unwrap();

        engine.seek_secs(10_000.0);
        assert_eq!(engine.position(), Duration::from_secs(180));

        engine.seek_secs(f64::NAN);
        assert_eq!(engine.position(), Duration::ZERO);
    }

    #[test]
    fn mute_pushes_zero_gain() {
        let mut host = MockHostAudio::new();
        host.expect_set_volume()
            .with(eq(1.0_f32))
            .times(2)
            .return_const(());
        host.expect_set_volume()
            .with(eq(0.0_f32))
            .times(1)
            .return_const(());

        let mut engine = PlaybackEngine::new(PlaybackConfig::default(), Box::new(host));
        engine.toggle_mute();
        assert!(engine.is_muted());
        engine.toggle_mute();
        assert!(!engine.is_muted());
    }
}
