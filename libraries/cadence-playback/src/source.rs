//! Playable-source resolution

use crate::error::{PlaybackError, Result};
use cadence_core::PlayableSource;

/// Turn a track's source reference into an address the host element can load
///
/// Remote locators pass through unchanged. Local `file://` locators are
/// keyed by their last path segment and served from `stream_endpoint`.
pub fn resolve_source(source: &PlayableSource, stream_endpoint: &str) -> Result<String> {
    match source {
        PlayableSource::Remote(url) => Ok(url.clone()),
        PlayableSource::LocalFile(_) => {
            let file_name = source
                .file_name()
                .ok_or_else(|| PlaybackError::UnresolvableSource {
                    locator: source.locator(),
                    reason: "locator has no file name".to_string(),
                })?;

            Ok(format!(
                "{}/{}",
                stream_endpoint.trim_end_matches('/'),
                urlencoding::encode(file_name)
            ))
        }
    }
}

mod urlencoding {
    /// Percent-encode a single path segment (spaces as `%20`)
    ///
    /// Only `A-Z a-z 0-9 * - . _` stay literal, so `~ ! ' ( )` are escaped
    /// where a browser's `encodeURIComponent` would keep them. Both forms
    /// decode to the same file name.
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes())
            .collect::<String>()
            .replace('+', "%20")
    }
}
