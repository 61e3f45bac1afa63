//! Play queue with wraparound navigation

use cadence_core::{Track, TrackId};
use tracing::warn;

/// Ordered list of playable tracks
///
/// The queue never tracks a cursor of its own. Successor and predecessor are
/// derived from the identity of the current track, so replacing the queue
/// while a track plays keeps next/previous meaningful.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue wholesale
    ///
    /// Tracks without a playable source are dropped.
    pub fn set(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks
            .into_iter()
            .filter(|track| {
                if track.is_playable() {
                    true
                } else {
                    warn!(track_id = %track.id, "Dropping track without playable source from queue");
                    false
                }
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index of the track with the given identity
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| &track.id == id)
    }

    /// Track after `current`, wrapping to the first
    ///
    /// A current track absent from the queue counts as index -1, so the
    /// successor is the first element.
    pub fn successor(&self, current: &TrackId) -> Option<&Track> {
        self.step(current, 1)
    }

    /// Track before `current`, wrapping to the last
    pub fn predecessor(&self, current: &TrackId) -> Option<&Track> {
        self.step(current, -1)
    }

    fn step(&self, current: &TrackId, delta: isize) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }

        let len = self.tracks.len() as isize;
        let index = self
            .position_of(current)
            .map_or(-1, |i| i as isize);

        let target = (index + delta).rem_euclid(len) as usize;
        self.tracks.get(target)
    }
}
