//! Cadence - Playback Engine
//!
//! Host-agnostic playback coordination for Cadence.
//!
//! This crate provides:
//! - Transport control (play track, toggle, resume/pause, seek)
//! - A wraparound play queue (next/previous by track identity)
//! - Volume control (linear, 0-100%, mute)
//! - Source resolution (`file://` locators to stream addresses)
//! - OS media-session integration (now-playing metadata, remote commands)
//! - A local audio streamer for the stream endpoint
//!
//! # Architecture
//!
//! The engine never decodes audio. It drives a [`HostAudio`] element with
//! fire-and-forget commands and learns about progress from [`HostEvent`]s the
//! host pushes back. Observers drain [`PlaybackEvent`]s.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{PlayableSource, Track, TrackId};
//! use cadence_playback::{HostAudio, PlaybackConfig, PlaybackEngine, PlaybackEvent};
//! use std::time::Duration;
//!
//! struct Silent;
//!
//! impl HostAudio for Silent {
//!     fn load(&mut self, _src: &str) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: Duration) {}
//!     fn set_volume(&mut self, _gain: f32) {}
//!     fn subscribe_timing(&mut self) {}
//!     fn unsubscribe_timing(&mut self) {}
//! }
//!
//! let mut engine = PlaybackEngine::new(PlaybackConfig::default(), Box::new(Silent));
//! let track = Track::new(TrackId::new("1"), "Intro", "The xx", 127)
//!     .with_source(PlayableSource::parse("file://tracks/intro.mp3"));
//!
//! engine.set_queue(vec![track.clone()]);
//! engine.play_track(track).unwrap();
//! assert!(engine.is_playing());
//!
//! engine.toggle_play_pause();
//! assert!(!engine.is_playing());
//!
//! let events = engine.drain_events();
//! assert!(events
//!     .iter()
//!     .any(|e| matches!(e, PlaybackEvent::TrackChanged { .. })));
//! ```

mod engine;
mod error;
pub mod events;
pub mod host;
pub mod media;
mod queue;
mod source;
pub mod stream;
pub mod types;
mod volume;

// Public exports
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result, StreamError};
pub use events::PlaybackEvent;
pub use host::{HostAudio, HostEvent};
pub use media::{
    MediaAction, MediaCommand, MediaCommandSender, MediaSession, NowPlaying, PositionState,
};
pub use source::resolve_source;
pub use stream::{AudioBytes, AudioStreamer, LocalAudioDirectory, AUDIO_CONTENT_TYPE};
pub use types::{PlaybackConfig, PlaybackState, TransportStatus, DEFAULT_STREAM_ENDPOINT};
