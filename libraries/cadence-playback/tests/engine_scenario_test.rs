//! Integration tests for the playback engine
//!
//! Drives the engine through a recording host and media surface and checks
//! both the engine state and the exact commands the host received.
//! No shallow tests - every test verifies observable behavior.

use cadence_core::{PlayableSource, Track, TrackId};
use cadence_playback::{
    HostAudio, HostEvent, MediaAction, MediaCommand, MediaSession, NowPlaying, PlaybackConfig,
    PlaybackEngine, PlaybackError, PlaybackEvent, PositionState, TransportStatus,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// HELPERS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum HostCall {
    Load(String),
    Play,
    Pause,
    Seek(Duration),
    Volume(f32),
    Subscribe,
    Unsubscribe,
}

#[derive(Clone, Default)]
struct RecordingHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl RecordingHost {
    fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl HostAudio for RecordingHost {
    fn load(&mut self, src: &str) {
        self.record(HostCall::Load(src.to_string()));
    }
    fn play(&mut self) {
        self.record(HostCall::Play);
    }
    fn pause(&mut self) {
        self.record(HostCall::Pause);
    }
    fn seek(&mut self, position: Duration) {
        self.record(HostCall::Seek(position));
    }
    fn set_volume(&mut self, gain: f32) {
        self.record(HostCall::Volume(gain));
    }
    fn subscribe_timing(&mut self) {
        self.record(HostCall::Subscribe);
    }
    fn unsubscribe_timing(&mut self) {
        self.record(HostCall::Unsubscribe);
    }
}

#[derive(Debug, Default)]
struct MediaLog {
    metadata: Option<NowPlaying>,
    bound: Vec<MediaAction>,
    positions: Vec<PositionState>,
}

#[derive(Clone, Default)]
struct RecordingMedia {
    log: Arc<Mutex<MediaLog>>,
}

impl MediaSession for RecordingMedia {
    fn set_metadata(&mut self, metadata: &NowPlaying) {
        self.log.lock().unwrap().metadata = Some(metadata.clone());
    }
    fn clear_metadata(&mut self) {
        self.log.lock().unwrap().metadata = None;
    }
    fn bind_actions(&mut self, actions: &[MediaAction]) {
        self.log.lock().unwrap().bound = actions.to_vec();
    }
    fn unbind_actions(&mut self) {
        self.log.lock().unwrap().bound.clear();
    }
    fn set_position_state(&mut self, state: PositionState) {
        self.log.lock().unwrap().positions.push(state);
    }
}

fn track(id: &str) -> Track {
    Track::new(TrackId::new(id), format!("Track {id}"), "Test Artist", 180)
        .with_album("Test Album")
        .with_source(PlayableSource::parse(format!("file://tracks/{id}.mp3")))
}

fn engine_with(config: PlaybackConfig) -> (PlaybackEngine, RecordingHost, RecordingMedia) {
    let host = RecordingHost::default();
    let media = RecordingMedia::default();
    let mut engine = PlaybackEngine::new(config, Box::new(host.clone()));
    engine.attach_media_session(Box::new(media.clone()));
    (engine, host, media)
}

fn engine() -> (PlaybackEngine, RecordingHost, RecordingMedia) {
    engine_with(PlaybackConfig::default())
}

fn current_id(engine: &PlaybackEngine) -> Option<String> {
    engine.current_track().map(|t| t.id.as_str().to_string())
}

// ============================================================================
// TRANSPORT
// ============================================================================

#[test]
fn play_track_issues_load_then_play_and_subscribes() {
    let (mut engine, host, _media) = engine();
    host.clear();

    engine.play_track(track("a")).unwrap();

    assert_eq!(
        host.calls(),
        vec![
            HostCall::Load("/api/audio/a.mp3".to_string()),
            HostCall::Play,
            HostCall::Subscribe,
        ]
    );
    assert_eq!(engine.status(), TransportStatus::Playing);
    assert_eq!(engine.position(), Duration::ZERO);
    assert!(engine.is_timing_subscribed());
}

#[test]
fn remote_sources_are_loaded_verbatim() {
    let (mut engine, host, _media) = engine();
    host.clear();

    let remote = Track::new(TrackId::new("r"), "Remote", "Artist", 100)
        .with_source(PlayableSource::parse("https://cdn.example.com/r.mp3"));
    engine.play_track(remote).unwrap();

    assert_eq!(
        host.calls().first(),
        Some(&HostCall::Load("https://cdn.example.com/r.mp3".to_string()))
    );
}

#[test]
fn track_without_source_is_rejected_and_state_kept() {
    let (mut engine, _host, _media) = engine();
    engine.play_track(track("a")).unwrap();
    engine.drain_events();

    let result = engine.play_track(Track::new(TrackId::new("ghost"), "Ghost", "None", 10));

    assert!(matches!(result, Err(PlaybackError::NoPlayableSource(_))));
    assert_eq!(current_id(&engine).as_deref(), Some("a"));
    assert!(engine.drain_events().is_empty());
}

#[test]
fn playing_a_new_track_resets_position() {
    let (mut engine, _host, _media) = engine();
    engine.play_track(track("a")).unwrap();
    engine.on_host_event(HostEvent::TimeUpdate(Duration::from_secs(42)));
    assert_eq!(engine.position(), Duration::from_secs(42));

    engine.play_track(track("b")).unwrap();
    assert_eq!(engine.position(), Duration::ZERO);
}

#[test]
fn toggle_without_track_is_noop() {
    let (mut engine, host, _media) = engine();
    host.clear();

    engine.toggle_play_pause();

    assert!(host.calls().is_empty());
    assert!(engine.drain_events().is_empty());
    assert_eq!(engine.status(), TransportStatus::Paused);
}

#[test]
fn toggle_pauses_and_resumes_host() {
    let (mut engine, host, _media) = engine();
    engine.play_track(track("a")).unwrap();
    host.clear();

    engine.toggle_play_pause();
    engine.toggle_play_pause();

    assert_eq!(host.calls(), vec![HostCall::Pause, HostCall::Play]);
    assert!(engine.is_playing());
}

// ============================================================================
// QUEUE NAVIGATION
// ============================================================================

#[test]
fn next_from_middle_then_wraps_to_start() {
    let (mut engine, _host, _media) = engine();
    engine.set_queue(vec![track("a"), track("b"), track("c")]);
    engine.play_track(track("b")).unwrap();

    engine.play_next_track().unwrap();
    assert_eq!(current_id(&engine).as_deref(), Some("c"));

    engine.play_next_track().unwrap();
    assert_eq!(current_id(&engine).as_deref(), Some("a"));
}

#[test]
fn previous_from_first_wraps_to_last() {
    let (mut engine, _host, _media) = engine();
    engine.set_queue(vec![track("a"), track("b"), track("c")]);
    engine.play_track(track("a")).unwrap();

    engine.play_previous_track().unwrap();
    assert_eq!(current_id(&engine).as_deref(), Some("c"));
}

#[test]
fn next_with_empty_queue_is_noop() {
    let (mut engine, host, _media) = engine();
    engine.play_track(track("a")).unwrap();
    engine.drain_events();
    host.clear();

    engine.play_next_track().unwrap();
    engine.play_previous_track().unwrap();

    assert_eq!(current_id(&engine).as_deref(), Some("a"));
    assert!(host.calls().is_empty());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn next_when_current_not_in_queue_starts_at_first() {
    let (mut engine, _host, _media) = engine();
    engine.play_track(track("outsider")).unwrap();
    engine.set_queue(vec![track("a"), track("b"), track("c")]);

    engine.play_next_track().unwrap();
    assert_eq!(current_id(&engine).as_deref(), Some("a"));
}

#[test]
fn set_queue_keeps_current_track_and_status() {
    let (mut engine, _host, _media) = engine();
    engine.play_track(track("a")).unwrap();
    engine.toggle_play_pause();

    engine.set_queue(vec![track("x"), track("y")]);

    assert_eq!(current_id(&engine).as_deref(), Some("a"));
    assert_eq!(engine.status(), TransportStatus::Paused);
    assert_eq!(engine.queue().len(), 2);
}

// ============================================================================
// TIMING FEED
// ============================================================================

#[test]
fn timing_events_while_idle_are_ignored() {
    let (mut engine, _host, _media) = engine();

    engine.on_host_event(HostEvent::TimeUpdate(Duration::from_secs(5)));
    engine.on_host_event(HostEvent::LoadedMetadata(Duration::from_secs(99)));

    assert_eq!(engine.position(), Duration::ZERO);
    assert_eq!(engine.duration(), Duration::ZERO);
    assert!(engine.drain_events().is_empty());
}

#[test]
fn metadata_updates_duration_and_position_state() {
    let (mut engine, _host, media) = engine();
    engine.play_track(track("a")).unwrap();

    engine.on_host_event(HostEvent::LoadedMetadata(Duration::from_secs(200)));
    engine.on_host_event(HostEvent::TimeUpdate(Duration::from_secs(30)));

    assert_eq!(engine.duration(), Duration::from_secs(200));
    let log = media.log.lock().unwrap();
    let last = log.positions.last().unwrap();
    assert_eq!(last.position, Duration::from_secs(30));
    assert_eq!(last.duration, Duration::from_secs(200));
}

#[test]
fn ended_advances_through_queue() {
    let (mut engine, _host, _media) = engine();
    engine.set_queue(vec![track("a"), track("b")]);
    engine.play_track(track("a")).unwrap();

    engine.on_host_event(HostEvent::Ended);

    assert_eq!(current_id(&engine).as_deref(), Some("b"));
    assert!(engine.is_playing());
}

#[test]
fn ended_without_auto_advance_pauses() {
    let (mut engine, _host, _media) = engine_with(PlaybackConfig {
        auto_advance: false,
        ..PlaybackConfig::default()
    });
    engine.set_queue(vec![track("a"), track("b")]);
    engine.play_track(track("a")).unwrap();

    engine.on_host_event(HostEvent::Ended);

    assert_eq!(current_id(&engine).as_deref(), Some("a"));
    assert_eq!(engine.status(), TransportStatus::Paused);
}

#[test]
fn host_error_is_surfaced_without_losing_state() {
    let (mut engine, _host, _media) = engine();
    engine.play_track(track("a")).unwrap();
    engine.drain_events();

    engine.on_host_event(HostEvent::Error("decode failed".to_string()));

    assert_eq!(
        engine.drain_events(),
        vec![PlaybackEvent::Error {
            message: "Host audio error: decode failed".to_string()
        }]
    );
    assert!(engine.is_playing());
}

// ============================================================================
// MEDIA SESSION
// ============================================================================

#[test]
fn media_surface_gets_metadata_and_handlers() {
    let (mut engine, _host, media) = engine();
    engine.play_track(track("a").with_image("/covers/a.png")).unwrap();

    let log = media.log.lock().unwrap();
    assert_eq!(
        log.metadata,
        Some(NowPlaying {
            title: "Track a".to_string(),
            artist: "Test Artist".to_string(),
            album: Some("Test Album".to_string()),
            artwork: Some("/covers/a.png".to_string()),
        })
    );
    assert_eq!(log.bound, MediaAction::ALL.to_vec());
}

#[test]
fn media_commands_drive_the_engine() {
    let (mut engine, _host, _media) = engine();
    let remote = engine.media_commands();
    engine.set_queue(vec![track("a"), track("b"), track("c")]);
    engine.play_track(track("a")).unwrap();

    remote.send(MediaCommand::Pause);
    remote.send(MediaCommand::Pause);
    engine.drain_media_commands();
    assert_eq!(engine.status(), TransportStatus::Paused);

    remote.send(MediaCommand::NextTrack);
    remote.send(MediaCommand::SeekTo(Duration::from_secs(60)));
    engine.drain_media_commands();
    assert_eq!(current_id(&engine).as_deref(), Some("b"));
    assert_eq!(engine.position(), Duration::from_secs(60));

    remote.send(MediaCommand::PreviousTrack);
    remote.send(MediaCommand::PreviousTrack);
    engine.drain_media_commands();
    assert_eq!(current_id(&engine).as_deref(), Some("c"));
}

#[test]
fn media_commands_after_session_end_are_dropped() {
    let (mut engine, _host, _media) = engine();
    let remote = engine.media_commands();
    engine.set_queue(vec![track("a"), track("b")]);
    engine.play_track(track("a")).unwrap();
    engine.end_session();

    remote.send(MediaCommand::NextTrack);
    remote.send(MediaCommand::Play);
    engine.drain_media_commands();

    assert!(engine.current_track().is_none());
    assert!(!engine.is_playing());
}

// ============================================================================
// SESSION LIFECYCLE
// ============================================================================

#[test]
fn end_session_releases_host_and_media() {
    let (mut engine, host, media) = engine();
    engine.play_track(track("a")).unwrap();
    host.clear();

    engine.end_session();

    assert_eq!(host.calls(), vec![HostCall::Pause, HostCall::Unsubscribe]);
    assert!(!engine.is_timing_subscribed());
    assert!(engine.snapshot().is_idle());

    let log = media.log.lock().unwrap();
    assert!(log.metadata.is_none());
    assert!(log.bound.is_empty());
    drop(log);

    assert_eq!(engine.drain_events().last(), Some(&PlaybackEvent::SessionEnded));
}

#[test]
fn dropping_the_engine_unsubscribes_timing() {
    let (mut engine, host, _media) = engine();
    engine.play_track(track("a")).unwrap();
    host.clear();

    drop(engine);

    assert!(host.calls().contains(&HostCall::Unsubscribe));
}

#[test]
fn replaying_after_end_resubscribes() {
    let (mut engine, host, _media) = engine();
    engine.play_track(track("a")).unwrap();
    engine.end_session();
    host.clear();

    engine.play_track(track("b")).unwrap();

    assert!(host.calls().contains(&HostCall::Subscribe));
    assert!(engine.is_timing_subscribed());
}

// ============================================================================
// VOLUME
// ============================================================================

#[test]
fn volume_changes_push_gain_and_emit_events() {
    let (mut engine, host, _media) = engine();
    host.clear();

    engine.set_volume(0);
    engine.set_volume(50);
    engine.set_volume(100);
    engine.toggle_mute();

    assert_eq!(
        host.calls(),
        vec![
            HostCall::Volume(0.0),
            HostCall::Volume(0.5),
            HostCall::Volume(1.0),
            HostCall::Volume(0.0)
        ]
    );
    assert_eq!(
        engine.drain_events().last(),
        Some(&PlaybackEvent::VolumeChanged {
            level: 100,
            is_muted: true
        })
    );
}
