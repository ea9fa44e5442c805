//! Gossip and cross-references.
//!
//! Gossip is how witnessed events spread: the source retells its most recent
//! memory and the target is recorded as having heard it.

use std::sync::Arc;

use npcsocial_domain::catalog::{cross_reference_phrases, gossip_phrases};
use npcsocial_domain::{CrossReferenceType, NpcId, Sentiment};
use serde::{Deserialize, Serialize};

use super::conversation::ConversationContext;
use crate::infrastructure::ports::{MemoryPort, RandomPort};
use crate::stores::SocialState;

/// A two-line quoted exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GossipExchange {
    pub source_id: NpcId,
    pub target_id: NpcId,
    pub sentiment: Sentiment,
    pub source_line: String,
    pub target_line: String,
    /// `Source: "line"` and `Target: "line"`, newline separated
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossReference {
    pub speaker_id: NpcId,
    pub referenced_id: NpcId,
    pub kind: CrossReferenceType,
    pub line: String,
}

pub struct GossipUseCases {
    memory: Arc<dyn MemoryPort>,
    random: Arc<dyn RandomPort>,
}

impl GossipUseCases {
    pub fn new(memory: Arc<dyn MemoryPort>, random: Arc<dyn RandomPort>) -> Self {
        Self { memory, random }
    }

    /// `None` when the source remembers nothing worth passing on
    pub fn generate_gossip(
        &self,
        state: &SocialState,
        source_id: &NpcId,
        target_id: &NpcId,
        context: &ConversationContext,
    ) -> Option<GossipExchange> {
        let memory = self.memory.get_memory(source_id);
        let Some(event) = memory.most_recent() else {
            tracing::debug!(source = %source_id, "No memory to gossip about");
            return None;
        };

        let phrases = gossip_phrases(event.sentiment);
        let phrase = phrases.get(self.random.gen_index(phrases.len()))?;
        let source_line = phrase.opener.replace("{event}", &event.description);
        let target_line = phrase.reply.to_string();

        let source_name = display_name(state, source_id);
        let target_name = display_name(state, target_id);
        let text = format!(
            "{}: \"{}\"\n{}: \"{}\"",
            source_name, source_line, target_name, target_line
        );

        self.memory
            .add_gossip(target_id, source_id, &event.description);
        tracing::debug!(
            source = %source_id,
            target = %target_id,
            sentiment = %event.sentiment,
            context = ?context,
            "Gossip passed on"
        );

        Some(GossipExchange {
            source_id: source_id.clone(),
            target_id: target_id.clone(),
            sentiment: event.sentiment,
            source_line,
            target_line,
            text,
        })
    }

    pub fn generate_cross_reference(
        &self,
        state: &SocialState,
        speaker_id: &NpcId,
        referenced_id: &NpcId,
        kind: CrossReferenceType,
    ) -> CrossReference {
        let phrases = cross_reference_phrases(kind);
        let template = phrases
            .get(self.random.gen_index(phrases.len()))
            .copied()
            .unwrap_or("{name}");

        CrossReference {
            speaker_id: speaker_id.clone(),
            referenced_id: referenced_id.clone(),
            kind,
            line: template.replace("{name}", &display_name(state, referenced_id)),
        }
    }
}

fn display_name(state: &SocialState, npc_id: &NpcId) -> String {
    state
        .personalities
        .get(npc_id)
        .map(|record| record.display_name().to_string())
        .unwrap_or_else(|| npc_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::ScriptedRandom;
    use crate::infrastructure::ports::MockMemoryPort;
    use crate::test_fixtures::{epoch, register, state};
    use mockall::predicate::eq;
    use npcsocial_domain::{MemorableEvent, NpcMemory, NpcProfile};

    fn memory_of(events: Vec<MemorableEvent>) -> NpcMemory {
        NpcMemory {
            memorable_events: events,
        }
    }

    #[test]
    fn test_no_memory_no_gossip() {
        let mut memory = MockMemoryPort::new();
        memory.expect_get_memory().returning(|_| NpcMemory::default());
        memory.expect_add_gossip().never();

        let gossip = GossipUseCases::new(Arc::new(memory), Arc::new(ScriptedRandom::constant(0.0)));
        let result = gossip.generate_gossip(
            &state(),
            &NpcId::new("Sal"),
            &NpcId::new("Rico"),
            &ConversationContext::new(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_gossip_uses_most_recent_memory_and_records_it() {
        let mut memory = MockMemoryPort::new();
        memory.expect_get_memory().returning(|_| {
            memory_of(vec![
                MemorableEvent::new("the shipment arrived", Sentiment::Positive, epoch()),
                MemorableEvent::new(
                    "the cops raided the docks",
                    Sentiment::Negative,
                    epoch() + chrono::Duration::hours(1),
                ),
            ])
        });
        memory
            .expect_add_gossip()
            .with(
                eq(NpcId::new("Rico")),
                eq(NpcId::new("Sal")),
                eq("the cops raided the docks"),
            )
            .times(1)
            .return_const(());

        let mut state = state();
        register(&mut state, "Sal", NpcProfile::new("Sally"));
        register(&mut state, "Rico", NpcProfile::new("Rico"));

        let gossip = GossipUseCases::new(Arc::new(memory), Arc::new(ScriptedRandom::constant(0.0)));
        let exchange = gossip
            .generate_gossip(
                &state,
                &NpcId::new("Sal"),
                &NpcId::new("Rico"),
                &ConversationContext::new(),
            )
            .expect("gossip");

        assert_eq!(exchange.sentiment, Sentiment::Negative);
        assert!(exchange.source_line.contains("the cops raided the docks"));
        assert!(exchange.text.starts_with("Sally: \""));
        assert!(exchange.text.contains("\nRico: \""));
    }

    #[test]
    fn test_cross_reference_names_referenced_npc() {
        let mut memory = MockMemoryPort::new();
        memory.expect_get_memory().never();
        let mut state = state();
        register(&mut state, "Vin", NpcProfile::new("Vinnie"));

        let gossip = GossipUseCases::new(Arc::new(memory), Arc::new(ScriptedRandom::constant(0.5)));
        let reference = gossip.generate_cross_reference(
            &state,
            &NpcId::new("Sal"),
            &NpcId::new("Vin"),
            CrossReferenceType::Warning,
        );
        assert!(reference.line.contains("Vinnie"));
        assert!(!reference.line.contains('{'));
    }
}
