/// Domain types for Cadence
mod edit;
mod ids;
mod playlist;
mod track;
mod upload;

pub use edit::{TrackField, TrackFieldEdit};
pub use ids::{PlaylistId, TrackId};
pub use playlist::{MembershipOutcome, Playlist, PlaylistEntry};
pub use track::{PlayableSource, Track};
pub use upload::{ImageUpload, UploadError, DEFAULT_MAX_IMAGE_BYTES};
