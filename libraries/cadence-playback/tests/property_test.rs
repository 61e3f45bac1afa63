//! Property-based tests for the playback engine
//!
//! Uses proptest to verify queue navigation and transport invariants across
//! random queues and starting points.

use cadence_core::{PlayableSource, Track, TrackId};
use cadence_playback::{HostAudio, HostEvent, PlaybackConfig, PlaybackEngine};
use proptest::prelude::*;
use std::time::Duration;

// ===== Helpers =====

struct NullHost;

impl HostAudio for NullHost {
    fn load(&mut self, _src: &str) {}
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn seek(&mut self, _position: Duration) {}
    fn set_volume(&mut self, _gain: f32) {}
    fn subscribe_timing(&mut self) {}
    fn unsubscribe_timing(&mut self) {}
}

fn queue_of(len: usize) -> Vec<Track> {
    (0..len)
        .map(|i| {
            Track::new(TrackId::new(format!("t{i}")), format!("Track {i}"), "Artist", 200)
                .with_source(PlayableSource::parse(format!("file://tracks/t{i}.mp3")))
        })
        .collect()
}

fn engine_at(len: usize, start: usize) -> PlaybackEngine {
    let tracks = queue_of(len);
    let mut engine = PlaybackEngine::new(PlaybackConfig::default(), Box::new(NullHost));
    engine.set_queue(tracks.clone());
    engine.play_track(tracks[start].clone()).unwrap();
    engine
}

fn current(engine: &PlaybackEngine) -> TrackId {
    engine.current_track().unwrap().id.clone()
}

fn queue_and_start() -> impl Strategy<Value = (usize, usize)> {
    (1usize..30).prop_flat_map(|len| (Just(len), 0..len))
}

// ===== Property Tests =====

proptest! {
    /// Property: calling next `len` times returns to the starting track
    #[test]
    fn next_cycles_through_whole_queue((len, start) in queue_and_start()) {
        let mut engine = engine_at(len, start);
        let origin = current(&engine);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..len {
            engine.play_next_track().unwrap();
            seen.insert(current(&engine));
        }

        prop_assert_eq!(current(&engine), origin);
        prop_assert_eq!(seen.len(), len, "every queued track is visited once");
    }

    /// Property: previous undoes next
    #[test]
    fn previous_after_next_returns_to_origin((len, start) in queue_and_start()) {
        let mut engine = engine_at(len, start);
        let origin = current(&engine);

        engine.play_next_track().unwrap();
        engine.play_previous_track().unwrap();

        prop_assert_eq!(current(&engine), origin);
    }

    /// Property: toggling twice restores the transport status
    #[test]
    fn toggle_is_self_inverse(
        (len, start) in queue_and_start(),
        paused_first in any::<bool>(),
    ) {
        let mut engine = engine_at(len, start);
        if paused_first {
            engine.toggle_play_pause();
        }
        let before = engine.status();

        engine.toggle_play_pause();
        prop_assert_ne!(engine.status(), before);
        engine.toggle_play_pause();

        prop_assert_eq!(engine.status(), before);
    }

    /// Property: seeking never leaves the [0, duration] window
    #[test]
    fn seek_stays_within_track(secs in prop::num::f64::ANY, duration_secs in 1u64..600) {
        let mut engine = engine_at(1, 0);
        engine.on_host_event(HostEvent::LoadedMetadata(Duration::from_secs(duration_secs)));

        engine.seek_secs(secs);

        prop_assert!(engine.position() <= Duration::from_secs(duration_secs));
    }
}
