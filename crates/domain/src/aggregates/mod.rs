//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome enums from mutations

pub mod conversation;
pub mod personality;

pub use conversation::{ConversationInstance, ConversationMessage, ConversationStatus};
pub use personality::{derive_personality, PersonalityRecord};
