//! What an NPC remembers witnessing
//!
//! Owned by the memory collaborator; this crate only reads it to source gossip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the NPC felt about a remembered event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorableEvent {
    pub description: String,
    #[serde(default)]
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
}

impl MemorableEvent {
    pub fn new(
        description: impl Into<String>,
        sentiment: Sentiment,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            description: description.into(),
            sentiment,
            timestamp,
        }
    }
}

/// Snapshot of one NPC's memory as handed out by the collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NpcMemory {
    pub memorable_events: Vec<MemorableEvent>,
}

impl NpcMemory {
    /// Latest event by timestamp. Ties go to the one stored last.
    pub fn most_recent(&self) -> Option<&MemorableEvent> {
        self.memorable_events
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.timestamp.cmp(&b.timestamp).then(ia.cmp(ib)))
            .map(|(_, event)| event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_most_recent_picks_latest_timestamp() {
        let now = Utc::now();
        let memory = NpcMemory {
            memorable_events: vec![
                MemorableEvent::new("late", Sentiment::Negative, now + Duration::seconds(10)),
                MemorableEvent::new("early", Sentiment::Positive, now),
            ],
        };
        assert_eq!(memory.most_recent().map(|e| e.description.as_str()), Some("late"));
    }

    #[test]
    fn test_empty_memory_has_nothing_recent() {
        assert!(NpcMemory::default().most_recent().is_none());
    }
}
