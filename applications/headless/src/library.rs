//! JSON library file
//!
//! ```json
//! {
//!   "tracks": [
//!     { "id": "1", "name": "Intro", "artist": "The xx", "duration_secs": 128,
//!       "source": "file://intro.mp3" }
//!   ],
//!   "playlists": [
//!     { "id": "p1", "name": "Night", "tracks": ["1"] }
//!   ]
//! }
//! ```

use anyhow::{bail, Context};
use cadence_core::{Playlist, PlaylistId, Track, TrackId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LibraryFile {
    #[serde(default)]
    tracks: Vec<Track>,
    #[serde(default)]
    playlists: Vec<PlaylistFile>,
}

#[derive(Debug, Deserialize)]
struct PlaylistFile {
    id: PlaylistId,
    name: String,
    #[serde(default)]
    cover_url: Option<String>,
    #[serde(default)]
    tracks: Vec<TrackId>,
}

/// Tracks and playlists loaded at startup
#[derive(Debug, Default)]
pub struct Library {
    pub tracks: Vec<Track>,
    pub playlists: Vec<Playlist>,
}

impl Library {
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading library file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing library file {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let file: LibraryFile = serde_json::from_str(raw)?;

        let known: HashSet<&TrackId> = file.tracks.iter().map(|t| &t.id).collect();
        let mut playlists = Vec::with_capacity(file.playlists.len());

        for entry in file.playlists {
            let mut playlist = Playlist::new(entry.id, entry.name);
            playlist.cover_url = entry.cover_url;
            for track_id in entry.tracks {
                if !known.contains(&track_id) {
                    bail!("playlist {} references unknown track {}", playlist.id, track_id);
                }
                playlist.append_track(track_id);
            }
            playlists.push(playlist);
        }

        Ok(Self {
            tracks: file.tracks,
            playlists,
        })
    }

    /// Tracks of a playlist in membership order
    pub fn playlist_tracks(tracks: &[Track], playlist: &Playlist) -> Vec<Track> {
        playlist
            .track_ids()
            .iter()
            .filter_map(|id| tracks.iter().find(|t| &t.id == id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "tracks": [
            { "id": "1", "name": "Intro", "artist": "The xx", "duration_secs": 128,
              "source": "file://intro.mp3" },
            { "id": "2", "name": "Crystalised", "artist": "The xx", "duration_secs": 201 }
        ],
        "playlists": [
            { "id": "p1", "name": "Night", "tracks": ["2", "1", "2"] }
        ]
    }"#;

    #[test]
    fn playlists_keep_file_order_without_duplicates() {
        let library = Library::parse(SAMPLE).unwrap();

        let playlist = &library.playlists[0];
        assert_eq!(playlist.track_ids(), vec![TrackId::new("2"), TrackId::new("1")]);

        let ordered = Library::playlist_tracks(&library.tracks, playlist);
        assert_eq!(ordered[0].name, "Crystalised");
        assert!(ordered[1].is_playable());
    }

    #[test]
    fn unknown_track_reference_is_rejected() {
        let raw = r#"{ "playlists": [ { "id": "p", "name": "P", "tracks": ["nope"] } ] }"#;
        let err = Library::parse(raw).unwrap_err();
        assert!(err.to_string().contains("unknown track nope"));
    }

    #[tokio::test]
    async fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let library = Library::load(&path).await.unwrap();
        assert_eq!(library.tracks.len(), 2);
    }
}
