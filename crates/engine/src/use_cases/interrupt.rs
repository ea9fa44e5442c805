//! Interrupt detection and line generation.
//!
//! Listeners are scanned in registration order and the first one whose rule
//! both matches and wins its roll interrupts. Earlier registrants therefore
//! get first chance.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use npcsocial_domain::catalog::{first_matching_rule, interrupt_phrases, render_interrupt_line};
use npcsocial_domain::{InterruptContext, InterruptType, NpcId, PersonalityRecord};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::stores::personality::DEFAULT_ARCHETYPE;
use crate::stores::SocialState;

/// Who interrupts whom, and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterruptDescriptor {
    pub kind: InterruptType,
    pub interrupter: NpcId,
    pub speaker: NpcId,
    /// Name of the rule that fired
    pub trigger: String,
    pub context: InterruptContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterruptMessage {
    pub npc_id: NpcId,
    pub npc_name: String,
    pub message: String,
    pub kind: InterruptType,
    pub timestamp: DateTime<Utc>,
}

pub struct InterruptUseCases {
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl InterruptUseCases {
    pub fn new(clock: Arc<dyn ClockPort>, random: Arc<dyn RandomPort>) -> Self {
        Self { clock, random }
    }

    /// Decide whether anyone cuts in on `speaker`.
    ///
    /// A speaker with no record yet is judged as a default one, without
    /// creating it.
    pub fn check(
        &self,
        state: &SocialState,
        speaker: &NpcId,
        context: &InterruptContext,
    ) -> Option<InterruptDescriptor> {
        let speaker_record = state
            .personalities
            .get(speaker)
            .map(Cow::Borrowed)
            .unwrap_or_else(|| {
                Cow::Owned(PersonalityRecord::new(speaker.clone(), DEFAULT_ARCHETYPE))
            });

        for listener in state.personalities.registered() {
            if listener.npc_id() == speaker || !listener.is_active() {
                continue;
            }
            let Some(rule) = first_matching_rule(&speaker_record, listener, context) else {
                continue;
            };
            let roll = self.random.gen_unit();
            if roll >= rule.probability {
                tracing::trace!(
                    interrupter = %listener.npc_id(),
                    rule = rule.name,
                    roll,
                    "Interrupt rule matched but roll failed"
                );
                continue;
            }

            tracing::debug!(
                speaker = %speaker,
                interrupter = %listener.npc_id(),
                rule = rule.name,
                kind = %rule.kind,
                "Interrupt triggered"
            );
            return Some(InterruptDescriptor {
                kind: rule.kind,
                interrupter: listener.npc_id().clone(),
                speaker: speaker.clone(),
                trigger: rule.name.to_string(),
                context: context.clone(),
            });
        }
        None
    }

    /// Render the interrupting line for a descriptor from [`Self::check`]
    pub fn generate(
        &self,
        state: &SocialState,
        descriptor: &InterruptDescriptor,
    ) -> InterruptMessage {
        let name_of = |id: &NpcId| {
            state
                .personalities
                .get(id)
                .map(|r| r.display_name().to_string())
                .unwrap_or_else(|| id.to_string())
        };
        let speaker_name = name_of(&descriptor.speaker);
        let interrupter_name = name_of(&descriptor.interrupter);

        let phrases = interrupt_phrases(descriptor.kind);
        let template = phrases
            .get(self.random.gen_index(phrases.len()))
            .copied()
            .unwrap_or_default();

        InterruptMessage {
            npc_id: descriptor.interrupter.clone(),
            npc_name: interrupter_name.clone(),
            message: render_interrupt_line(template, &speaker_name, &interrupter_name),
            kind: descriptor.kind,
            timestamp: self.clock.now(),
        }
    }
}
