//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Durable storage (file, in-memory, or anything key-value)
//! - The NPC memory collaborator
//! - Clock/Random (injected so tests control time and draws)

mod error;
mod memory;
mod storage;
mod testing;

pub use error::{ListenerError, StorageError};
pub use memory::MemoryPort;
pub use storage::StoragePort;
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use memory::MockMemoryPort;
#[cfg(test)]
pub use storage::MockStoragePort;
