//! Host audio element abstraction
//!
//! Decoding and output belong to the host platform (a browser `<audio>`
//! element, a native player widget). The engine only issues transport
//! commands and listens to the element's push events.

use std::time::Duration;

/// Transport surface of the host media element
///
/// Commands are fire-and-forget: the element reports progress and failure
/// through [`HostEvent`]s fed back into the engine, never through return
/// values.
#[cfg_attr(test, mockall::automock)]
pub trait HostAudio: Send {
    /// Assign a new source. Assigning while playing stops the old source.
    fn load(&mut self, src: &str);

    /// Start or resume output
    fn play(&mut self);

    /// Pause output, keeping position
    fn pause(&mut self);

    /// Move the playhead
    fn seek(&mut self, position: Duration);

    /// Apply a linear output gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32);

    /// Start delivering timing events
    fn subscribe_timing(&mut self);

    /// Stop delivering timing events
    fn unsubscribe_timing(&mut self);
}

/// Push events emitted by the host element
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Playhead moved
    TimeUpdate(Duration),

    /// Duration of the loaded source became known
    LoadedMetadata(Duration),

    /// Source played to the end
    Ended,

    /// Element failed to load or play the source
    Error(String),
}
