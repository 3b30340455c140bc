//! Error types for the element core.

use serde::{Deserialize, Serialize};

/// Error type for playback sessions, triggers, and the hosting shell.
///
/// Programming errors (lifecycle misuse, unregistered trigger names, unknown
/// sequence instructions) fail fast and are never retried. Malformed
/// customization input is not represented here at all; it degrades to "no
/// effect" at the parsing layer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum IconError {
    /// The playback session is already connected to a backend.
    #[error("Already connected player!")]
    AlreadyConnected,

    /// A control operation requires a connected backend.
    #[error("Not connected player!")]
    NotConnected,

    /// The trigger attribute names a trigger nobody registered.
    #[error("Can't use unregistered trigger: {name}")]
    UnregisteredTrigger { name: String },

    /// The sequence definition contains an unknown instruction.
    #[error("Invalid sequence action: {action}")]
    InvalidSequenceAction { action: String },

    /// Icon data could not be loaded.
    #[error("Icon load failed: {reason}")]
    IconLoadFailed { reason: String },

    /// The backend factory failed to produce an instance.
    #[error("Backend error: {reason}")]
    BackendError { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl IconError {
    /// Whether this error is caller misuse rather than an environmental
    /// failure. Programming errors should surface to the host application
    /// instead of being swallowed.
    #[inline]
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyConnected
                | Self::NotConnected
                | Self::UnregisteredTrigger { .. }
                | Self::InvalidSequenceAction { .. }
        )
    }

    /// Get error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::AlreadyConnected | Self::NotConnected => "lifecycle",
            Self::UnregisteredTrigger { .. } | Self::InvalidSequenceAction { .. } => "trigger",
            Self::IconLoadFailed { .. } => "loading",
            Self::BackendError { .. } => "backend",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for IconError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
