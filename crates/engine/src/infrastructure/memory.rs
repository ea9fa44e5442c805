//! In-memory NPC memory journal.
//!
//! Stands in for the game's memory subsystem in the demo binary and tests.
//! Heard gossip is also remembered as a neutral event, so it can be passed on.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use npcsocial_domain::{MemorableEvent, NpcId, NpcMemory, Sentiment};

use crate::infrastructure::ports::{ClockPort, MemoryPort};

/// A piece of gossip an NPC was told
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeardGossip {
    pub source_id: NpcId,
    pub description: String,
}

#[derive(Default)]
struct Journal {
    memories: BTreeMap<NpcId, NpcMemory>,
    gossip: BTreeMap<NpcId, Vec<HeardGossip>>,
}

pub struct MemoryJournal {
    journal: Mutex<Journal>,
    clock: Arc<dyn ClockPort>,
}

impl MemoryJournal {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            journal: Mutex::new(Journal::default()),
            clock,
        }
    }

    fn journal(&self) -> MutexGuard<'_, Journal> {
        self.journal.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record something `npc_id` witnessed, stamped now
    pub fn record_event(
        &self,
        npc_id: &NpcId,
        description: impl Into<String>,
        sentiment: Sentiment,
    ) {
        let event = MemorableEvent::new(description, sentiment, self.clock.now());
        self.journal()
            .memories
            .entry(npc_id.clone())
            .or_default()
            .memorable_events
            .push(event);
    }

    /// Gossip `npc_id` has been told, oldest first
    pub fn heard_gossip(&self, npc_id: &NpcId) -> Vec<HeardGossip> {
        self.journal()
            .gossip
            .get(npc_id)
            .cloned()
            .unwrap_or_default()
    }
}

impl MemoryPort for MemoryJournal {
    fn get_memory(&self, npc_id: &NpcId) -> NpcMemory {
        self.journal()
            .memories
            .get(npc_id)
            .cloned()
            .unwrap_or_default()
    }

    fn add_gossip(&self, target_id: &NpcId, source_id: &NpcId, description: &str) {
        let now = self.clock.now();
        let mut journal = self.journal();
        journal
            .gossip
            .entry(target_id.clone())
            .or_default()
            .push(HeardGossip {
                source_id: source_id.clone(),
                description: description.to_string(),
            });
        journal
            .memories
            .entry(target_id.clone())
            .or_default()
            .memorable_events
            .push(MemorableEvent::new(description, Sentiment::Neutral, now));
    }
}
