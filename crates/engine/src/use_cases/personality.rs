//! Personality store operations.
//!
//! Lookup with lazy defaults, registration, archetype, stage and modifier
//! changes. Every mutation raises the matching events on the state.

use std::sync::Arc;

use npcsocial_domain::{
    ModifierDelta, NpcId, NpcProfile, PersonalityRecord, PersonalityShift, PersonalityType,
    RelationshipStage, SocialEvent, StageTransition,
};
use npcsocial_domain::value_objects::{STANCE_MAX, STANCE_MIN};

use crate::infrastructure::ports::ClockPort;
use crate::stores::SocialState;

pub struct PersonalityUseCases {
    clock: Arc<dyn ClockPort>,
}

impl PersonalityUseCases {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }

    /// Record for `npc_id`, created with defaults if absent
    pub fn get<'a>(&self, state: &'a mut SocialState, npc_id: &NpcId) -> &'a PersonalityRecord {
        if !state.personalities.contains(npc_id) {
            state.touch();
        }
        let (record, _) = state.personalities.get_or_create(npc_id);
        record
    }

    /// Register or re-register an NPC.
    ///
    /// Stances off the 1..=5 scale are dropped with a warning. Re-registration
    /// replaces the profile but keeps the NPC's place in registration order.
    pub fn register(&self, state: &mut SocialState, npc_id: &NpcId, mut profile: NpcProfile) {
        if let Err(e) = profile.validate() {
            tracing::warn!(npc_id = %npc_id, error = %e, "Dropping invalid stances from profile");
            profile
                .stances
                .retain(|_, stance| (STANCE_MIN..=STANCE_MAX).contains(stance));
        }

        let now = self.clock.now();
        let name = profile.name.clone();
        let (record, _) = state.personalities.get_or_create(npc_id);
        let shift = record.register(profile, now).and_then(|update| update.shift());
        let newly_registered = state.personalities.mark_registered(npc_id);

        tracing::info!(npc_id = %npc_id, name = %name, newly_registered, "NPC registered");
        state.raise(SocialEvent::NpcRegistered {
            npc_id: npc_id.clone(),
            name,
        });
        raise_shift(state, npc_id, shift);
    }

    /// Toggle interrupt eligibility. Unregistered NPCs are left untouched.
    pub fn set_active(&self, state: &mut SocialState, npc_id: &NpcId, active: bool) -> bool {
        let changed = state
            .personalities
            .get_mut(npc_id)
            .is_some_and(|record| record.set_active(active));
        if changed {
            tracing::debug!(npc_id = %npc_id, active, "NPC activity changed");
            state.touch();
        }
        changed
    }

    pub fn set_base_archetype(
        &self,
        state: &mut SocialState,
        npc_id: &NpcId,
        archetype: PersonalityType,
    ) {
        let now = self.clock.now();
        let (record, _) = state.personalities.get_or_create(npc_id);
        let update = record.set_base_personality(archetype, now);
        state.touch();
        raise_shift(state, npc_id, update.shift());
    }

    /// Explicit stage transition; only an actual change is logged and published
    pub fn set_stage(
        &self,
        state: &mut SocialState,
        npc_id: &NpcId,
        stage: RelationshipStage,
    ) -> StageTransition {
        let now = self.clock.now();
        let (record, _) = state.personalities.get_or_create(npc_id);
        let transition = record.set_stage(stage, now);
        state.touch();
        raise_stage(state, npc_id, transition);
        transition
    }

    /// Add then clamp each supplied axis, then recompute the current archetype
    pub fn apply_modifiers(
        &self,
        state: &mut SocialState,
        npc_id: &NpcId,
        delta: &ModifierDelta,
    ) -> Option<PersonalityShift> {
        let now = self.clock.now();
        let (record, _) = state.personalities.get_or_create(npc_id);
        let shift = record.apply_modifiers(delta, now);
        state.touch();
        raise_shift(state, npc_id, shift);
        shift
    }
}

pub(crate) fn raise_stage(
    state: &mut SocialState,
    npc_id: &NpcId,
    transition: StageTransition,
) {
    if let StageTransition::Changed { from, to, shift } = transition {
        tracing::info!(npc_id = %npc_id, from = %from, to = %to, "Relationship stage changed");
        state.raise(SocialEvent::StageChange {
            npc_id: npc_id.clone(),
            from,
            to,
        });
        raise_shift(state, npc_id, shift);
    }
}

pub(crate) fn raise_shift(
    state: &mut SocialState,
    npc_id: &NpcId,
    shift: Option<PersonalityShift>,
) {
    if let Some(PersonalityShift { from, to }) = shift {
        tracing::info!(npc_id = %npc_id, from = %from, to = %to, "Personality shifted");
        state.raise(SocialEvent::PersonalityShifted {
            npc_id: npc_id.clone(),
            from,
            to,
        });
    }
}
