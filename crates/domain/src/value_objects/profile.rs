//! Registration facts about an NPC
//!
//! Faction, stances, allies and rivals are owned by the wider game. They are
//! copied onto the personality record at registration and only ever read by
//! interrupt and role logic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::DomainError;
use crate::ids::NpcId;
use crate::value_objects::PersonalityType;

/// Lowest and highest stance on the five-point topic scale
pub const STANCE_MIN: u8 = 1;
pub const STANCE_MAX: u8 = 5;

/// Static facts supplied by `register_npc`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcProfile {
    pub name: String,
    /// Archetype to use as the base personality, if the caller has one in mind
    pub personality: Option<PersonalityType>,
    pub faction: Option<String>,
    /// topic -> stance on a 1..=5 scale
    pub stances: BTreeMap<String, u8>,
    pub allies: BTreeSet<NpcId>,
    /// Rival faction names
    pub rivals: BTreeSet<String>,
    /// Speaks up about topics they hold a stance on
    pub opinionated: bool,
    /// Only active NPCs are considered as interrupters
    pub active: bool,
}

impl Default for NpcProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            personality: None,
            faction: None,
            stances: BTreeMap::new(),
            allies: BTreeSet::new(),
            rivals: BTreeSet::new(),
            opinionated: false,
            active: true,
        }
    }
}

impl NpcProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_personality(mut self, personality: PersonalityType) -> Self {
        self.personality = Some(personality);
        self
    }

    pub fn with_faction(mut self, faction: impl Into<String>) -> Self {
        self.faction = Some(faction.into());
        self
    }

    pub fn with_stance(mut self, topic: impl Into<String>, stance: u8) -> Self {
        self.stances.insert(topic.into(), stance);
        self
    }

    pub fn with_ally(mut self, ally: impl Into<NpcId>) -> Self {
        self.allies.insert(ally.into());
        self
    }

    pub fn with_rival(mut self, faction: impl Into<String>) -> Self {
        self.rivals.insert(faction.into());
        self
    }

    pub fn opinionated(mut self) -> Self {
        self.opinionated = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn stance_on(&self, topic: &str) -> Option<u8> {
        self.stances.get(topic).copied()
    }

    pub fn is_rival_of(&self, faction: &str) -> bool {
        self.rivals.contains(faction)
    }

    pub fn is_ally_of(&self, npc_id: &NpcId) -> bool {
        self.allies.contains(npc_id)
    }

    /// Reject stances off the five-point scale
    pub fn validate(&self) -> Result<(), DomainError> {
        for (topic, stance) in &self.stances {
            if !(STANCE_MIN..=STANCE_MAX).contains(stance) {
                return Err(DomainError::validation(format!(
                    "stance on '{}' must be between {} and {}, got {}",
                    topic, STANCE_MIN, STANCE_MAX, stance
                )));
            }
        }
        Ok(())
    }
}
