//! Personality records keyed by NPC id.

use std::collections::BTreeMap;

use npcsocial_domain::{NpcId, PersonalityRecord, PersonalityType};

/// Archetype given to NPCs that were never registered with one
pub const DEFAULT_ARCHETYPE: PersonalityType = PersonalityType::Professional;

/// Every known record plus the order NPCs were registered in.
///
/// Records created lazily by a lookup are not registered and therefore never
/// appear in [`PersonalityStore::registered`].
#[derive(Debug, Default)]
pub struct PersonalityStore {
    records: BTreeMap<NpcId, PersonalityRecord>,
    registration_order: Vec<NpcId>,
}

impl PersonalityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from a loaded snapshot. Order entries without a record are dropped.
    pub fn from_parts(records: BTreeMap<NpcId, PersonalityRecord>, order: Vec<NpcId>) -> Self {
        let registration_order = order
            .into_iter()
            .filter(|id| records.contains_key(id))
            .collect();
        Self {
            records,
            registration_order,
        }
    }

    pub fn get(&self, npc_id: &NpcId) -> Option<&PersonalityRecord> {
        self.records.get(npc_id)
    }

    pub fn get_mut(&mut self, npc_id: &NpcId) -> Option<&mut PersonalityRecord> {
        self.records.get_mut(npc_id)
    }

    pub fn contains(&self, npc_id: &NpcId) -> bool {
        self.records.contains_key(npc_id)
    }

    /// Existing record, or a fresh default one. The flag is true when created.
    pub fn get_or_create(&mut self, npc_id: &NpcId) -> (&mut PersonalityRecord, bool) {
        let created = !self.records.contains_key(npc_id);
        if created {
            tracing::debug!(
                npc_id = %npc_id,
                archetype = %DEFAULT_ARCHETYPE,
                "Creating default personality record"
            );
        }
        let record = self
            .records
            .entry(npc_id.clone())
            .or_insert_with(|| PersonalityRecord::new(npc_id.clone(), DEFAULT_ARCHETYPE));
        (record, created)
    }

    /// Append to the registration order. Returns false if already registered.
    pub fn mark_registered(&mut self, npc_id: &NpcId) -> bool {
        if self.registration_order.contains(npc_id) {
            return false;
        }
        self.registration_order.push(npc_id.clone());
        true
    }

    /// Registered records in registration order
    pub fn registered(&self) -> impl Iterator<Item = &PersonalityRecord> {
        self.registration_order
            .iter()
            .filter_map(|id| self.records.get(id))
    }

    pub fn registration_order(&self) -> &[NpcId] {
        &self.registration_order
    }

    pub fn records(&self) -> &BTreeMap<NpcId, PersonalityRecord> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.registration_order.clear();
    }
}
