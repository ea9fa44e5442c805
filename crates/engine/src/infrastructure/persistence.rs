//! Versioned save blob.
//!
//! The whole social state (personality map, registration order, completed
//! conversation history) is one JSON document under one storage key.
//! Failures never propagate: a bad read yields empty state, a bad write is
//! logged and the in-memory state stays authoritative.

use std::collections::BTreeMap;
use std::sync::Arc;

use npcsocial_domain::{ConversationInstance, NpcId, PersonalityRecord};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{StorageError, StoragePort};

/// Blob version written by this build
pub const SAVE_VERSION: u32 = 2;

fn legacy_version() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveState {
    #[serde(default = "legacy_version")]
    pub version: u32,
    pub personalities: BTreeMap<NpcId, PersonalityRecord>,
    /// Registered NPCs in registration order
    pub registration_order: Vec<NpcId>,
    /// Completed conversations, oldest first
    pub conversation_history: Vec<ConversationInstance>,
}

impl Default for SaveState {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            personalities: BTreeMap::new(),
            registration_order: Vec::new(),
            conversation_history: Vec::new(),
        }
    }
}

impl SaveState {
    /// Bring an older blob up to [`SAVE_VERSION`] and repair dangling ids.
    ///
    /// Version 1 had no registration order; registered records are ordered by
    /// id instead.
    pub fn migrate(mut self, history_limit: usize) -> Self {
        if self.version < SAVE_VERSION {
            tracing::info!(from = self.version, to = SAVE_VERSION, "Migrating save blob");
            self.registration_order = self
                .personalities
                .values()
                .filter(|record| record.is_registered())
                .map(|record| record.npc_id().clone())
                .collect();
            for record in self.personalities.values_mut() {
                record.stamp_version();
            }
            self.version = SAVE_VERSION;
        } else if self.version > SAVE_VERSION {
            tracing::warn!(
                version = self.version,
                supported = SAVE_VERSION,
                "Save blob is newer than this build, loading what is understood"
            );
        }

        let personalities = &self.personalities;
        let mut seen = std::collections::BTreeSet::new();
        self.registration_order
            .retain(|id| personalities.contains_key(id) && seen.insert(id.clone()));
        for record in self.personalities.values() {
            if record.is_registered() && !seen.contains(record.npc_id()) {
                seen.insert(record.npc_id().clone());
                self.registration_order.push(record.npc_id().clone());
            }
        }

        if self.conversation_history.len() > history_limit {
            let excess = self.conversation_history.len() - history_limit;
            self.conversation_history.drain(..excess);
        }

        self
    }
}

/// Reads and writes [`SaveState`] through a [`StoragePort`]
pub struct Persistence {
    storage: Arc<dyn StoragePort>,
    key: String,
    history_limit: usize,
}

impl Persistence {
    pub fn new(
        storage: Arc<dyn StoragePort>,
        key: impl Into<String>,
        history_limit: usize,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
            history_limit,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load and migrate. Any failure yields empty state.
    pub fn load(&self) -> SaveState {
        match self.try_load() {
            Ok(Some(state)) => {
                tracing::debug!(
                    key = %self.key,
                    npcs = state.personalities.len(),
                    history = state.conversation_history.len(),
                    "Loaded social state"
                );
                state
            }
            Ok(None) => {
                tracing::debug!(key = %self.key, "No saved social state, starting empty");
                SaveState::default()
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Failed to load social state, starting empty"
                );
                SaveState::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<SaveState>, StorageError> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(None);
        };
        let state: SaveState = serde_json::from_str(&raw)?;
        Ok(Some(state.migrate(self.history_limit)))
    }

    /// Serialize and store. Failures are logged and swallowed.
    pub fn save(&self, state: &SaveState) {
        if let Err(e) = self.try_save(state) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist social state");
        }
    }

    pub fn try_save(&self, state: &SaveState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        self.storage.write(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockStoragePort;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::Utc;
    use npcsocial_domain::{ModifierDelta, NpcProfile, PersonalityType};

    fn registered(id: &str) -> PersonalityRecord {
        let mut record = PersonalityRecord::new(NpcId::new(id), PersonalityType::Professional);
        record.register(NpcProfile::new(id), Utc::now());
        record
    }

    #[test]
    fn test_round_trip_through_storage() {
        let persistence = Persistence::new(Arc::new(InMemoryStorage::new()), "slot", 50);
        let mut record = registered("Sal");
        record.apply_modifiers(&ModifierDelta::new().trust(0.3), Utc::now());

        let mut state = SaveState::default();
        state.registration_order.push(record.npc_id().clone());
        state.personalities.insert(record.npc_id().clone(), record);

        persistence.save(&state);
        assert_eq!(persistence.load(), state);
    }

    #[test]
    fn test_missing_blob_is_empty_state() {
        let persistence = Persistence::new(Arc::new(InMemoryStorage::new()), "slot", 50);
        assert_eq!(persistence.load(), SaveState::default());
    }

    #[test]
    fn test_malformed_blob_is_empty_state() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.write("slot", "{not json").expect("write");
        let persistence = Persistence::new(storage, "slot", 50);
        assert_eq!(persistence.load(), SaveState::default());
    }

    #[test]
    fn test_read_failure_is_empty_state() {
        let mut storage = MockStoragePort::new();
        storage
            .expect_read()
            .returning(|_| Err(StorageError::io("read", "permission denied")));
        let persistence = Persistence::new(Arc::new(storage), "slot", 50);
        assert_eq!(persistence.load(), SaveState::default());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut storage = MockStoragePort::new();
        storage
            .expect_write()
            .times(1)
            .returning(|_, _| Err(StorageError::io("write", "disk full")));
        let persistence = Persistence::new(Arc::new(storage), "slot", 50);

        persistence.save(&SaveState::default());
    }

    #[test]
    fn test_version_one_blob_migrates() {
        let blob = r#"{
            "personalities": {
                "Zed": {"npc_id": "Zed", "profile": {"name": "Zed"}},
                "Amy": {"npc_id": "Amy", "profile": {"name": "Amy"}},
                "Lazy": {"npc_id": "Lazy"}
            }
        }"#;
        let storage = Arc::new(InMemoryStorage::new());
        storage.write("slot", blob).expect("write");
        let state = Persistence::new(storage, "slot", 50).load();

        assert_eq!(state.version, SAVE_VERSION);
        assert_eq!(
            state.registration_order,
            vec![NpcId::new("Amy"), NpcId::new("Zed")]
        );
        assert!(state
            .personalities
            .values()
            .all(|r| r.version() == PersonalityRecord::CURRENT_VERSION));
    }

    #[test]
    fn test_dangling_order_entries_dropped() {
        let mut state = SaveState::default();
        state.registration_order = vec![NpcId::new("Ghost"), NpcId::new("Sal"), NpcId::new("Sal")];
        state
            .personalities
            .insert(NpcId::new("Sal"), registered("Sal"));

        let migrated = state.migrate(50);
        assert_eq!(migrated.registration_order, vec![NpcId::new("Sal")]);
    }
}
