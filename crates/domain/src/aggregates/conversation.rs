//! ConversationInstance aggregate - one multi-NPC scripted exchange
//!
//! Created fully populated by the orchestrator. The only mutation is marking
//! messages delivered; the last mark completes the instance, after which it
//! is frozen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::events::DeliveryOutcome;
use crate::{ConversationId, NpcId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    #[default]
    Active,
    Completed,
}

/// One line of a conversation, as handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub npc_id: NpcId,
    pub npc_name: String,
    pub text: String,
    pub role: String,
    /// Suggested delay before showing this line, from conversation start
    #[serde(default)]
    pub scheduled_delay_ms: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub delivered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationInstance {
    id: ConversationId,
    template_name: String,
    participants: Vec<NpcId>,
    /// role name -> assigned NPC
    roles: BTreeMap<String, NpcId>,
    messages: Vec<ConversationMessage>,
    #[serde(default)]
    status: ConversationStatus,
    started_at: DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl ConversationInstance {
    pub fn new(
        id: ConversationId,
        template_name: impl Into<String>,
        participants: Vec<NpcId>,
        roles: BTreeMap<String, NpcId>,
        messages: Vec<ConversationMessage>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            template_name: template_name.into(),
            participants,
            roles,
            messages,
            status: ConversationStatus::Active,
            started_at,
            completed_at: None,
        }
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn participants(&self) -> &[NpcId] {
        &self.participants
    }

    pub fn roles(&self) -> &BTreeMap<String, NpcId> {
        &self.roles
    }

    pub fn role(&self, name: &str) -> Option<&NpcId> {
        self.roles.get(name)
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == ConversationStatus::Completed
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn undelivered(&self) -> usize {
        self.messages.iter().filter(|m| !m.delivered).count()
    }

    /// Mark message `index` as shown. Completes the conversation when it was
    /// the last undelivered one. Re-marking a delivered message is harmless.
    pub fn mark_delivered(&mut self, index: usize, now: DateTime<Utc>) -> DeliveryOutcome {
        if self.is_completed() {
            return DeliveryOutcome::AlreadyCompleted;
        }
        let len = self.messages.len();
        let Some(message) = self.messages.get_mut(index) else {
            return DeliveryOutcome::MessageNotFound { index, len };
        };
        message.delivered = true;

        match self.undelivered() {
            0 => {
                self.status = ConversationStatus::Completed;
                self.completed_at = Some(now);
                DeliveryOutcome::Completed
            }
            remaining => DeliveryOutcome::Delivered { remaining },
        }
    }
}
