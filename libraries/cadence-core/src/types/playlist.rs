/// Playlist domain types
use crate::types::{PlaylistId, Track, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A track's position inside a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub track_id: TrackId,
    /// 1-based position
    pub order: u32,
}

/// Result of adding a track to a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MembershipOutcome {
    /// Track appended at the given position
    Added { order: u32 },
    /// The pair already existed; nothing changed
    AlreadyPresent,
    /// The playlist does not exist
    UnknownPlaylist,
}

impl MembershipOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// Playlist
///
/// Membership order is dense and strictly increasing from 1, and a track
/// appears at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Cover artwork reference
    #[serde(default)]
    pub cover_url: Option<String>,

    /// Ordered membership
    #[serde(default)]
    pub entries: Vec<PlaylistEntry>,

    /// When the playlist was created
    pub created_at: DateTime<Utc>,

    /// When the playlist was last modified
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            cover_url: None,
            entries: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the track is already a member
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.entries.iter().any(|entry| &entry.track_id == track_id)
    }

    /// Position the next appended track would get
    pub fn next_order(&self) -> u32 {
        self.entries
            .iter()
            .map(|entry| entry.order)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Append a track at the end of the playlist
    ///
    /// Adding a track that is already present is not an error; it reports
    /// [`MembershipOutcome::AlreadyPresent`] and leaves the playlist untouched.
    pub fn append_track(&mut self, track_id: TrackId) -> MembershipOutcome {
        if self.contains(&track_id) {
            return MembershipOutcome::AlreadyPresent;
        }

        let order = self.next_order();
        self.entries.push(PlaylistEntry { track_id, order });
        self.touch();
        MembershipOutcome::Added { order }
    }

    /// Track ids in playlist order
    pub fn track_ids(&self) -> Vec<TrackId> {
        let mut entries: Vec<&PlaylistEntry> = self.entries.iter().collect();
        entries.sort_by_key(|entry| entry.order);
        entries.into_iter().map(|e| e.track_id.clone()).collect()
    }

    pub fn track_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of member durations; members the lookup cannot resolve count as zero
    pub fn total_duration<'a>(&self, lookup: impl Fn(&TrackId) -> Option<&'a Track>) -> Duration {
        self.entries
            .iter()
            .filter_map(|entry| lookup(&entry.track_id))
            .map(Track::duration)
            .sum()
    }

    /// Mark the playlist as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
