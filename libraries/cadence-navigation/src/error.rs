//! Error types for navigation

use thiserror::Error;

/// Navigation errors
///
/// Key handling itself never fails; these only arise when parsing keys and
/// bindings from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Key name not recognised
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;
