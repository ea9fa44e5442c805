//! Error types for port operations.

/// Durable storage errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O failed - includes operation name for tracing.
    #[error("Storage I/O error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Key is not usable by this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    /// Create an Io error with operation context.
    pub fn io(operation: &'static str, message: impl ToString) -> Self {
        Self::Io {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::serialization(e)
    }
}

/// A subscriber refused or failed to handle an event.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ListenerError {
    #[error("Listener failed: {0}")]
    Failed(String),
    #[error("Listener panicked: {0}")]
    Panicked(String),
}

impl ListenerError {
    pub fn failed(message: impl ToString) -> Self {
        Self::Failed(message.to_string())
    }
}
