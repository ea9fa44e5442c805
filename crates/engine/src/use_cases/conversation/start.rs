//! Start conversation use case.
//!
//! Fills a template's roles from the participant list, renders every line
//! and staggers delivery delays. The presentation layer owns the timers.

use std::collections::BTreeMap;
use std::sync::Arc;

use npcsocial_domain::catalog::{find_template, role_score};
use npcsocial_domain::{
    ConversationId, ConversationInstance, ConversationMessage, ConversationTemplate, NpcId,
    SocialEvent,
};

use super::template::{ConversationContext, TemplateVars};
use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::stores::SocialState;

/// Line pacing for generated conversations
#[derive(Debug, Clone)]
pub struct Pacing {
    pub spacing_ms: u64,
    pub jitter_ms: u64,
}

pub struct StartConversation {
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    pacing: Pacing,
    filler: String,
}

impl StartConversation {
    pub fn new(
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        pacing: Pacing,
        filler: impl Into<String>,
    ) -> Self {
        Self {
            clock,
            random,
            pacing,
            filler: filler.into(),
        }
    }

    /// Start `template_name` with `participants`.
    ///
    /// Returns `None` for an unknown template or too few participants.
    pub fn execute(
        &self,
        state: &mut SocialState,
        template_name: &str,
        participants: &[NpcId],
        context: &ConversationContext,
    ) -> Option<ConversationInstance> {
        let Some(template) = find_template(template_name) else {
            tracing::warn!(template = template_name, "Unknown conversation template");
            return None;
        };
        if participants.is_empty() || participants.len() < template.min_participants {
            tracing::warn!(
                template = template_name,
                participants = participants.len(),
                required = template.min_participants,
                "Not enough participants for conversation"
            );
            return None;
        }

        for id in participants {
            if !state.personalities.contains(id) {
                state.personalities.get_or_create(id);
                state.touch();
            }
        }

        let roles = self.assign_roles(state, template, participants);
        let messages = self.render_messages(state, template, &roles, context);

        let now = self.clock.now();
        let instance = ConversationInstance::new(
            ConversationId::from_uuid(self.random.gen_uuid()),
            template.name,
            participants.to_vec(),
            roles,
            messages,
            now,
        );

        tracing::info!(
            conversation_id = %instance.id(),
            template = template.name,
            messages = instance.messages().len(),
            "Conversation started"
        );
        state.raise(SocialEvent::ConversationStarted {
            conversation_id: instance.id(),
            template_name: template.name.to_string(),
            participants: participants.to_vec(),
        });
        state.conversations.start(instance.clone());
        Some(instance)
    }

    /// Every role gets an NPC. Once the pool runs dry, roles reuse a random
    /// participant.
    fn assign_roles(
        &self,
        state: &SocialState,
        template: &ConversationTemplate,
        participants: &[NpcId],
    ) -> BTreeMap<String, NpcId> {
        let mut available: Vec<&NpcId> = participants.iter().collect();
        let mut roles = BTreeMap::new();

        for role in template.roles() {
            let chosen = if available.is_empty() {
                participants[self.random.gen_index(participants.len())].clone()
            } else {
                let mut best: Option<(usize, f64)> = None;
                for (i, id) in available.iter().enumerate() {
                    let fit = state
                        .personalities
                        .get(id)
                        .map_or(0.0, |record| role_score(role, record));
                    let score = fit + self.random.gen_unit();
                    if best.is_none_or(|(_, top)| score > top) {
                        best = Some((i, score));
                    }
                }
                let index = best.map_or(0, |(i, _)| i);
                available.remove(index).clone()
            };
            tracing::debug!(role, npc_id = %chosen, "Role assigned");
            roles.insert(role.to_string(), chosen);
        }
        roles
    }

    fn render_messages(
        &self,
        state: &SocialState,
        template: &ConversationTemplate,
        roles: &BTreeMap<String, NpcId>,
        context: &ConversationContext,
    ) -> Vec<ConversationMessage> {
        let display_name = |id: &NpcId| {
            state
                .personalities
                .get(id)
                .map(|r| r.display_name().to_string())
                .unwrap_or_else(|| id.to_string())
        };

        let vars = roles
            .iter()
            .fold(TemplateVars::new(context, &self.filler), |vars, (role, id)| {
                vars.with_role(role.as_str(), display_name(id))
            });

        let now = self.clock.now();
        let jitter_max = i32::try_from(self.pacing.jitter_ms).unwrap_or(i32::MAX);

        template
            .exchanges
            .iter()
            .enumerate()
            .filter_map(|(index, exchange)| {
                let npc_id = roles.get(exchange.role)?.clone();
                let jitter = u64::try_from(self.random.gen_range(0, jitter_max)).unwrap_or(0);
                Some(ConversationMessage {
                    npc_name: display_name(&npc_id),
                    npc_id,
                    text: vars.render(exchange.template),
                    role: exchange.role.to_string(),
                    scheduled_delay_ms: index as u64 * self.pacing.spacing_ms + jitter,
                    timestamp: now,
                    delivered: false,
                })
            })
            .collect()
    }
}
