//! NpcSocial Engine library.
//!
//! Persistent NPC personalities and emergent multi-party dialogue.
//!
//! ## Structure
//!
//! - `stores/` - In-memory state owned by one engine instance
//! - `use_cases/` - One module per component, operating on the state
//! - `infrastructure/` - Ports and their adapters (storage, clock, event bus)
//! - `app` - The [`SocialEngine`] composition root

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Shared fixtures for unit and end-to-end tests.
#[cfg(test)]
pub mod test_fixtures;

/// End-to-end scenarios through `SocialEngine`.
#[cfg(test)]
mod e2e_tests;

pub use app::SocialEngine;
