//! Domain Events
//!
//! `SocialEvent` is what listeners on the engine's event bus receive. The
//! `personality_events` and `conversation_events` submodules hold the return
//! types of aggregate mutations.

pub mod conversation_events;
pub mod personality_events;

pub use conversation_events::*;
pub use personality_events::*;

use serde::{Deserialize, Serialize};

use crate::value_objects::{MoodType, PersonalityType, RelationshipStage};
use crate::{ConversationId, NpcId};

/// Notification fanned out to subscribers after a state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SocialEvent {
    NpcRegistered {
        npc_id: NpcId,
        name: String,
    },
    StageChange {
        npc_id: NpcId,
        from: RelationshipStage,
        to: RelationshipStage,
    },
    BreakingPoint {
        npc_id: NpcId,
        name: String,
        trait_name: String,
        event_type: String,
        message: String,
    },
    PersonalityShifted {
        npc_id: NpcId,
        from: PersonalityType,
        to: PersonalityType,
    },
    MoodChanged {
        npc_id: NpcId,
        mood: MoodType,
        intensity: f32,
    },
    ConversationStarted {
        conversation_id: ConversationId,
        template_name: String,
        participants: Vec<NpcId>,
    },
    ConversationEnded {
        conversation_id: ConversationId,
        template_name: String,
    },
    StateReset,
}

impl SocialEvent {
    /// Get the event type name for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            SocialEvent::NpcRegistered { .. } => "npc_registered",
            SocialEvent::StageChange { .. } => "stage_change",
            SocialEvent::BreakingPoint { .. } => "breaking_point",
            SocialEvent::PersonalityShifted { .. } => "personality_shifted",
            SocialEvent::MoodChanged { .. } => "mood_changed",
            SocialEvent::ConversationStarted { .. } => "conversation_started",
            SocialEvent::ConversationEnded { .. } => "conversation_ended",
            SocialEvent::StateReset => "state_reset",
        }
    }

    /// NPC the event is about, if any
    pub fn npc_id(&self) -> Option<&NpcId> {
        match self {
            SocialEvent::NpcRegistered { npc_id, .. }
            | SocialEvent::StageChange { npc_id, .. }
            | SocialEvent::BreakingPoint { npc_id, .. }
            | SocialEvent::PersonalityShifted { npc_id, .. }
            | SocialEvent::MoodChanged { npc_id, .. } => Some(npc_id),
            SocialEvent::ConversationStarted { .. }
            | SocialEvent::ConversationEnded { .. }
            | SocialEvent::StateReset => None,
        }
    }
}
