/// Editable track fields
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of track fields a user may edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackField {
    Name,
    Artist,
    Album,
    Genre,
    Tempo,
    Key,
}

impl TrackField {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Genre => "genre",
            Self::Tempo => "tempo",
            Self::Key => "key",
        }
    }

    /// Parse a field tag. `bpm` is accepted as an alias for `tempo`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "artist" => Some(Self::Artist),
            "album" => Some(Self::Album),
            "genre" => Some(Self::Genre),
            "tempo" | "bpm" => Some(Self::Tempo),
            "key" => Some(Self::Key),
            _ => None,
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated edit to a single track field
///
/// Tempo is numeric; every other field is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum TrackFieldEdit {
    Name(String),
    Artist(String),
    Album(String),
    Genre(String),
    Tempo(u32),
    Key(String),
}

impl TrackFieldEdit {
    /// Build an edit from an untyped `(field, value)` pair
    ///
    /// Rejects unknown field tags and tempo values that are not a
    /// non-negative integer.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let field = TrackField::parse(field.trim())
            .ok_or_else(|| CoreError::UnknownField(field.to_string()))?;

        Ok(match field {
            TrackField::Name => Self::Name(value.to_string()),
            TrackField::Artist => Self::Artist(value.to_string()),
            TrackField::Album => Self::Album(value.to_string()),
            TrackField::Genre => Self::Genre(value.to_string()),
            TrackField::Key => Self::Key(value.to_string()),
            TrackField::Tempo => {
                let bpm = value.trim().parse::<u32>().map_err(|_| {
                    CoreError::invalid_field("tempo", "tempo should be a valid number")
                })?;
                Self::Tempo(bpm)
            }
        })
    }

    /// Which field this edit targets
    pub fn field(&self) -> TrackField {
        match self {
            Self::Name(_) => TrackField::Name,
            Self::Artist(_) => TrackField::Artist,
            Self::Album(_) => TrackField::Album,
            Self::Genre(_) => TrackField::Genre,
            Self::Tempo(_) => TrackField::Tempo,
            Self::Key(_) => TrackField::Key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_free_text_fields() {
        assert_eq!(
            TrackFieldEdit::parse("artist", "Boards of Canada").unwrap(),
            TrackFieldEdit::Artist("Boards of Canada".to_string())
        );
        assert_eq!(
            TrackFieldEdit::parse("key", "C#m").unwrap().field(),
            TrackField::Key
        );
    }

    #[test]
    fn tempo_must_be_numeric() {
        assert_eq!(
            TrackFieldEdit::parse("bpm", " 124 ").unwrap(),
            TrackFieldEdit::Tempo(124)
        );

        let err = TrackFieldEdit::parse("tempo", "fast").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFieldValue { .. }));

        let err = TrackFieldEdit::parse("tempo", "-3").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFieldValue { .. }));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = TrackFieldEdit::parse("audio_url", "file://x.mp3").unwrap_err();
        assert!(matches!(err, CoreError::UnknownField(f) if f == "audio_url"));
    }

    #[test]
    fn edit_serializes_as_tagged_value() {
        let json = serde_json::to_value(TrackFieldEdit::Tempo(90)).unwrap();
        assert_eq!(json, serde_json::json!({ "field": "tempo", "value": 90 }));
    }
}
