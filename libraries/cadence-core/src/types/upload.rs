/// Image uploads validated at the edge
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default ceiling for cover and artwork uploads (5 MiB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Upload rejected before reaching any collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File size exceeds {}MB limit", .limit / (1024 * 1024))]
    TooLarge { size: usize, limit: usize },

    #[error("Upload is empty")]
    Empty,
}

/// An image file picked by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Check the upload against a byte ceiling
    pub fn validate(&self, limit: usize) -> Result<(), UploadError> {
        if self.bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if self.size() > limit {
            return Err(UploadError::TooLarge {
                size: self.size(),
                limit,
            });
        }
        Ok(())
    }
}
