//! Dialogue style lookup, greetings and acceptance rolls.

use std::sync::Arc;

use npcsocial_domain::catalog::{greeting_override, resolve_style};
use npcsocial_domain::{acceptance_probability, AcceptContext, AcceptanceBounds, NpcId, StyleSet};

use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::stores::SocialState;

pub struct DialogueUseCases {
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    bounds: AcceptanceBounds,
}

impl DialogueUseCases {
    pub fn new(
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        bounds: AcceptanceBounds,
    ) -> Self {
        Self {
            clock,
            random,
            bounds: bounds.sanitized(),
        }
    }

    /// Style set for the NPC's current personality and stage, with fallback
    pub fn style(&self, state: &mut SocialState, npc_id: &NpcId) -> &'static StyleSet {
        let created = !state.personalities.contains(npc_id);
        let (record, _) = state.personalities.get_or_create(npc_id);
        let style = resolve_style(
            record.current_personality(),
            record.base_personality(),
            record.stage(),
        );
        if created {
            state.touch();
        }
        style
    }

    /// Mood override first, otherwise a random greeting from the style set
    pub fn greeting(&self, state: &mut SocialState, npc_id: &NpcId) -> String {
        let now = self.clock.now();
        let created = !state.personalities.contains(npc_id);
        let (record, _) = state.personalities.get_or_create(npc_id);
        let before = *record.stored_mood();
        let mood = record.mood_at(now);
        if created || before != mood {
            state.touch();
        }

        if let Some(forced) = greeting_override(&mood) {
            return forced.to_string();
        }
        let greetings = self.style(state, npc_id).greetings;
        greetings
            .get(self.random.gen_index(greetings.len()))
            .map(|g| g.to_string())
            .unwrap_or_default()
    }

    /// Probability in the configured bounds, without rolling
    pub fn acceptance_chance(
        &self,
        state: &mut SocialState,
        npc_id: &NpcId,
        context: &AcceptContext,
    ) -> f32 {
        let now = self.clock.now();
        let created = !state.personalities.contains(npc_id);
        let (record, _) = state.personalities.get_or_create(npc_id);
        let before = *record.stored_mood();
        let mood = record.mood_at(now);
        let chance = acceptance_probability(
            record.modifiers(),
            mood.current,
            record.stage(),
            context,
            self.bounds,
        );
        if created || before != mood {
            state.touch();
        }
        chance
    }

    /// Roll against [`Self::acceptance_chance`]
    pub fn would_accept(
        &self,
        state: &mut SocialState,
        npc_id: &NpcId,
        context: &AcceptContext,
    ) -> bool {
        let chance = self.acceptance_chance(state, npc_id, context);
        let roll = self.random.gen_unit();
        let accepted = roll < f64::from(chance);
        tracing::debug!(npc_id = %npc_id, chance, roll, accepted, "Acceptance rolled");
        accepted
    }
}
