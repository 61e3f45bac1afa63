//! Library store configuration

use crate::optimistic::FailurePolicy;
use cadence_core::DEFAULT_MAX_IMAGE_BYTES;
use serde::{Deserialize, Serialize};

/// Configuration shared by the playlist and track stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Upload ceiling for covers and artwork (default: 5 MiB)
    pub max_image_bytes: usize,

    /// What happens to optimistic changes whose write failed (default: retain)
    pub failure_policy: FailurePolicy,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            failure_policy: FailurePolicy::Retain,
        }
    }
}
