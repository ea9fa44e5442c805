//! In-memory state owned by one engine instance.
//!
//! - `PersonalityStore` - personality records and registration order
//! - `ConversationStore` - active conversations and completed history
//!
//! Use cases mutate a [`SocialState`] and raise events on it; the engine
//! persists and publishes once the call returns.

pub mod conversation;
pub mod personality;

pub use conversation::ConversationStore;
pub use personality::{PersonalityStore, DEFAULT_ARCHETYPE};

use npcsocial_domain::SocialEvent;

use crate::infrastructure::persistence::{SaveState, SAVE_VERSION};

#[derive(Debug)]
pub struct SocialState {
    pub personalities: PersonalityStore,
    pub conversations: ConversationStore,
    raised: Vec<SocialEvent>,
    dirty: bool,
}

impl SocialState {
    pub fn new(history_limit: usize) -> Self {
        Self {
            personalities: PersonalityStore::new(),
            conversations: ConversationStore::new(history_limit),
            raised: Vec::new(),
            dirty: false,
        }
    }

    pub fn from_save(save: SaveState, history_limit: usize) -> Self {
        Self {
            personalities: PersonalityStore::from_parts(
                save.personalities,
                save.registration_order,
            ),
            conversations: ConversationStore::with_history(
                history_limit,
                save.conversation_history,
            ),
            raised: Vec::new(),
            dirty: false,
        }
    }

    /// Persisted part of the state. Active conversations are not saved.
    pub fn to_save(&self) -> SaveState {
        SaveState {
            version: SAVE_VERSION,
            personalities: self.personalities.records().clone(),
            registration_order: self.personalities.registration_order().to_vec(),
            conversation_history: self.conversations.history().cloned().collect(),
        }
    }

    /// Queue an event for listeners; implies a mutation
    pub fn raise(&mut self, event: SocialEvent) {
        self.raised.push(event);
        self.dirty = true;
    }

    /// Record a mutation that has no event of its own
    pub fn touch(&mut self) {
        self.dirty = true;
    }

    /// Drain raised events and the dirty flag
    pub fn take_changes(&mut self) -> (bool, Vec<SocialEvent>) {
        let dirty = std::mem::take(&mut self.dirty);
        (dirty, std::mem::take(&mut self.raised))
    }

    pub fn clear(&mut self) {
        self.personalities.clear();
        self.conversations.clear();
        self.touch();
    }
}
