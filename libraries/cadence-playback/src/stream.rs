//! Audio byte source for local files
//!
//! Local tracks are addressed by file name through the stream endpoint; the
//! streamer maps a name back to bytes.

use crate::error::StreamError;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Content type served for local audio files
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Audio payload returned by a streamer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBytes {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Resolves a local file name to audio bytes
#[async_trait]
pub trait AudioStreamer: Send + Sync {
    /// Open the named file
    ///
    /// Returns [`StreamError::NotFound`] when no such file exists.
    async fn open(&self, file_name: &str) -> Result<AudioBytes, StreamError>;
}

/// Serves audio files from a single directory
#[derive(Debug, Clone)]
pub struct LocalAudioDirectory {
    root: PathBuf,
}

impl LocalAudioDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate a requested name (prevent directory traversal)
    fn resolve(&self, file_name: &str) -> Result<PathBuf, StreamError> {
        let requested = Path::new(file_name);
        let mut components = requested.components();

        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(requested)),
            _ => Err(StreamError::InvalidName(file_name.to_string())),
        }
    }
}

#[async_trait]
impl AudioStreamer for LocalAudioDirectory {
    async fn open(&self, file_name: &str) -> Result<AudioBytes, StreamError> {
        let path = self.resolve(file_name)?;
        debug!(path = %path.display(), "Opening audio file");

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(AudioBytes {
                content_type: AUDIO_CONTENT_TYPE.to_string(),
                data,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StreamError::NotFound(file_name.to_string()))
            }
            Err(e) => Err(StreamError::Io(e)),
        }
    }
}
