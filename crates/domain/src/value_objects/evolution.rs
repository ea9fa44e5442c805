//! Bounded personality evolution history
//!
//! Diagnostics and UI only. No rule reads the log back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::value_objects::{PersonalityType, RelationshipStage};

/// What changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvolutionKind {
    StageChange {
        from: RelationshipStage,
        to: RelationshipStage,
    },
    BreakingPoint {
        name: String,
        trait_name: String,
        event_type: String,
    },
    ArchetypeChange {
        from: PersonalityType,
        to: PersonalityType,
    },
    PersonalityShift {
        from: PersonalityType,
        to: PersonalityType,
    },
}

impl EvolutionKind {
    pub fn label(&self) -> &'static str {
        match self {
            EvolutionKind::StageChange { .. } => "stage_change",
            EvolutionKind::BreakingPoint { .. } => "breaking_point",
            EvolutionKind::ArchetypeChange { .. } => "archetype_change",
            EvolutionKind::PersonalityShift { .. } => "personality_shift",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionEntry {
    #[serde(flatten)]
    pub kind: EvolutionKind,
    pub timestamp: DateTime<Utc>,
}

/// Most-recent-first history capped at [`EvolutionLog::CAPACITY`] entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EvolutionLog {
    entries: VecDeque<EvolutionEntry>,
}

impl EvolutionLog {
    pub const CAPACITY: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an entry, dropping the oldest on overflow
    pub fn record(&mut self, kind: EvolutionKind, timestamp: DateTime<Utc>) {
        self.entries.push_front(EvolutionEntry { kind, timestamp });
        self.entries.truncate(Self::CAPACITY);
    }

    pub fn latest(&self) -> Option<&EvolutionEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvolutionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Trim a deserialized log that predates the cap
    pub fn enforce_capacity(&mut self) {
        self.entries.truncate(Self::CAPACITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_log_is_most_recent_first_and_capped() {
        let start = Utc::now();
        let mut log = EvolutionLog::new();
        for i in 0..(EvolutionLog::CAPACITY as i64 + 7) {
            log.record(
                EvolutionKind::StageChange {
                    from: RelationshipStage::Stranger,
                    to: RelationshipStage::Acquaintance,
                },
                start + Duration::seconds(i),
            );
        }

        assert_eq!(log.len(), EvolutionLog::CAPACITY);
        let newest = log.latest().expect("entry");
        assert_eq!(
            newest.timestamp,
            start + Duration::seconds(EvolutionLog::CAPACITY as i64 + 6)
        );
        let oldest = log.iter().last().expect("entry");
        assert_eq!(oldest.timestamp, start + Duration::seconds(7));
    }

    #[test]
    fn test_entry_serializes_with_kind_tag() {
        let mut log = EvolutionLog::new();
        log.record(
            EvolutionKind::BreakingPoint {
                name: "Saved From Cops".into(),
                trait_name: "indebted".into(),
                event_type: "saved_from_cops".into(),
            },
            Utc::now(),
        );
        let json = serde_json::to_value(&log).expect("serialize");
        assert_eq!(json[0]["kind"], "breaking_point");
        assert_eq!(json[0]["trait_name"], "indebted");
    }
}
