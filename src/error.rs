/// Error types for nestwatch
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.
///
/// The analysis core itself never returns errors: it degrades to safe
/// defaults instead (see the intelligence module). These variants cover the
/// ambient surfaces around it - settings files, frame loading, the CLI.

use thiserror::Error;

/// Main error type for nestwatch operations
#[derive(Error, Debug)]
pub enum WatchError {
    /// I/O errors (frame files, settings file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Settings file could not be located or opened
    #[error("Preference store error: {0}")]
    Preferences(String),

    /// A sensitivity value that is not one of the recognized levels
    #[error("Invalid sensitivity: {0}")]
    InvalidSensitivity(String),

    /// A frame payload that cannot be used
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for nestwatch operations
pub type Result<T> = std::result::Result<T, WatchError>;

/// Convert WatchError to a user-friendly error message
impl WatchError {
    pub fn user_message(&self) -> String {
        match self {
            WatchError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            WatchError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            WatchError::Preferences(msg) => {
                format!("Settings issue: {}", msg)
            }
            WatchError::InvalidSensitivity(value) => {
                format!(
                    "'{}' is not a sensitivity level. Use low, medium, high or maximum",
                    value
                )
            }
            WatchError::InvalidFrame(reason) => {
                format!("Invalid frame: {}", reason)
            }
            WatchError::Generic(msg) => msg.clone(),
        }
    }
}
