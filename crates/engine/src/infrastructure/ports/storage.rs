//! Durable key-value storage port.

use super::StorageError;

/// Whole-blob storage keyed by a short name.
///
/// The engine writes one blob per save; backends only need to store and
/// return strings.
#[cfg_attr(test, mockall::automock)]
pub trait StoragePort: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key`
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
