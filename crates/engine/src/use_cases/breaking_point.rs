//! Breaking point evaluation.
//!
//! A reported event fires the first rule for its type whose trait the NPC
//! does not already hold. Each rule fires at most once per NPC.

use std::collections::BTreeMap;
use std::sync::Arc;

use npcsocial_domain::catalog::rules_for;
use npcsocial_domain::{BreakingPointApplied, BreakingPointOutcome, NpcId, SocialEvent};

use crate::infrastructure::ports::ClockPort;
use crate::stores::SocialState;
use crate::use_cases::personality::{raise_shift, raise_stage};

/// Free-form details about the reported event, carried into logs only
pub type EventContext = BTreeMap<String, String>;

pub struct CheckBreakingPoint {
    clock: Arc<dyn ClockPort>,
}

impl CheckBreakingPoint {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }

    pub fn execute(
        &self,
        state: &mut SocialState,
        npc_id: &NpcId,
        event_type: &str,
        context: &EventContext,
    ) -> BreakingPointOutcome {
        let now = self.clock.now();
        let created = !state.personalities.contains(npc_id);
        let (record, _) = state.personalities.get_or_create(npc_id);
        let applied = rules_for(event_type).find_map(|rule| record.apply_breaking_point(rule, now));
        if created {
            state.touch();
        }

        let Some(applied) = applied else {
            tracing::debug!(npc_id = %npc_id, event_type, "No breaking point triggered");
            return BreakingPointOutcome::NotTriggered;
        };

        let BreakingPointApplied {
            name,
            trait_name,
            message,
            shift_from_modifiers,
            stage,
        } = applied;

        tracing::info!(
            npc_id = %npc_id,
            event_type,
            breaking_point = %name,
            trait_name = %trait_name,
            context = ?context,
            "Breaking point triggered"
        );

        state.raise(SocialEvent::BreakingPoint {
            npc_id: npc_id.clone(),
            name: name.clone(),
            trait_name,
            event_type: event_type.to_string(),
            message: message.clone(),
        });
        raise_shift(state, npc_id, shift_from_modifiers);
        if let Some(transition) = stage {
            raise_stage(state, npc_id, transition);
        }

        BreakingPointOutcome::Triggered { name, message }
    }
}
