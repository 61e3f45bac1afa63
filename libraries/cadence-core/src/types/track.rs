/// Track domain type
use crate::types::{TrackFieldEdit, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const LOCAL_SCHEME: &str = "file://";

/// Where the audio bytes for a track come from
///
/// Serialized as the raw locator string, so `"file://tracks/a.mp3"` and
/// `"https://cdn.example.com/a.mp3"` round-trip through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlayableSource {
    /// Directly streamable locator (used as-is by the host)
    Remote(String),

    /// Local file, served through the streaming collaborator.
    /// Holds the path part of the `file://` locator.
    LocalFile(String),
}

impl PlayableSource {
    /// Classify a raw locator
    pub fn parse(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        match locator.strip_prefix(LOCAL_SCHEME) {
            Some(path) => Self::LocalFile(path.to_string()),
            None => Self::Remote(locator),
        }
    }

    /// The original locator string
    pub fn locator(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::LocalFile(path) => format!("{LOCAL_SCHEME}{path}"),
        }
    }

    /// Last path segment of a local locator
    ///
    /// Returns `None` for remote sources and for local locators that end in a
    /// separator (there is no file name to key the stream on).
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Remote(_) => None,
            Self::LocalFile(path) => path.rsplit('/').next().filter(|name| !name.is_empty()),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::LocalFile(_))
    }
}

impl From<String> for PlayableSource {
    fn from(locator: String) -> Self {
        Self::parse(locator)
    }
}

impl From<PlayableSource> for String {
    fn from(source: PlayableSource) -> Self {
        source.locator()
    }
}

/// Audio track
///
/// Immutable for the lifetime of a session except through the optimistic
/// library layer, which applies [`TrackFieldEdit`]s to copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Display title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Genre
    #[serde(default)]
    pub genre: Option<String>,

    /// Duration in whole seconds
    pub duration_secs: u32,

    /// Tempo in beats per minute
    #[serde(default)]
    pub tempo: Option<u32>,

    /// Musical key (free text, e.g. "F#m")
    #[serde(default)]
    pub key: Option<String>,

    /// Artwork reference
    #[serde(default)]
    pub image_url: Option<String>,

    /// Playable-source reference; a track without one cannot be queued
    #[serde(default)]
    pub source: Option<PlayableSource>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: TrackId,
        name: impl Into<String>,
        artist: impl Into<String>,
        duration_secs: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            artist: artist.into(),
            album: None,
            genre: None,
            duration_secs,
            tempo: None,
            key: None,
            image_url: None,
            source: None,
        }
    }

    /// Attach a playable source
    #[must_use]
    pub fn with_source(mut self, source: PlayableSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach an album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Attach artwork
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    /// Whether the track can be placed in a playback queue
    pub fn is_playable(&self) -> bool {
        self.source.is_some()
    }

    /// Apply a validated field edit in place
    pub fn apply_edit(&mut self, edit: &TrackFieldEdit) {
        match edit {
            TrackFieldEdit::Name(name) => self.name.clone_from(name),
            TrackFieldEdit::Artist(artist) => self.artist.clone_from(artist),
            TrackFieldEdit::Album(album) => self.album = Some(album.clone()),
            TrackFieldEdit::Genre(genre) => self.genre = Some(genre.clone()),
            TrackFieldEdit::Tempo(bpm) => self.tempo = Some(*bpm),
            TrackFieldEdit::Key(key) => self.key = Some(key.clone()),
        }
    }

    /// Duration formatted as `m:ss`
    pub fn display_duration(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }
}
