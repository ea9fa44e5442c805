//! PersonalityRecord aggregate - one per NPC
//!
//! # Layers
//!
//! - **Permanent**: base archetype, modifiers, stage, traits
//! - **Derived**: current archetype, recomputed after every modifier, stage or
//!   base change (see [`derive_personality`])
//! - **Temporary**: mood, collapsed to neutral lazily on read
//!
//! Mutations return outcome enums from `crate::events` so the engine can decide
//! what to publish. Records are never deleted individually.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

use crate::catalog::BreakingPoint;
use crate::events::{ArchetypeUpdate, BreakingPointApplied, PersonalityShift, StageTransition};
use crate::value_objects::{
    EvolutionKind, EvolutionLog, ModifierDelta, MoodState, NpcProfile, PersonalityModifiers,
    PersonalityType, RelationshipStage,
};
use crate::NpcId;

/// Derive the current archetype.
///
/// Rules run top to bottom and a later match overwrites an earlier one:
///
/// 1. base archetype
/// 2. warmth > 0.5 → Friendly, else warmth < -0.5 → Cold
/// 3. aggression > 0.6 → Aggressive
/// 4. trust > 0.6 and warmth > 0.3 → Loyal
/// 5. stage Enemy → Aggressive
pub fn derive_personality(
    base: PersonalityType,
    modifiers: &PersonalityModifiers,
    stage: RelationshipStage,
) -> PersonalityType {
    let mut current = base;

    if modifiers.warmth() > 0.5 {
        current = PersonalityType::Friendly;
    } else if modifiers.warmth() < -0.5 {
        current = PersonalityType::Cold;
    }

    if modifiers.aggression() > 0.6 {
        current = PersonalityType::Aggressive;
    }

    if modifiers.trust() > 0.6 && modifiers.warmth() > 0.3 {
        current = PersonalityType::Loyal;
    }

    if stage == RelationshipStage::Enemy {
        current = PersonalityType::Aggressive;
    }

    current
}

/// Persistent social state of a single NPC
///
/// # Invariants
///
/// - every modifier axis stays in [-1, 1] (enforced by `PersonalityModifiers`)
/// - `current` always equals `derive_personality(base, modifiers, stage)`
/// - each trait is held at most once
/// - the evolution log never exceeds `EvolutionLog::CAPACITY` entries
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalityRecord {
    npc_id: NpcId,
    base: PersonalityType,
    current: PersonalityType,
    modifiers: PersonalityModifiers,
    mood: MoodState,
    stage: RelationshipStage,
    traits: BTreeSet<String>,
    evolution_log: EvolutionLog,
    profile: Option<NpcProfile>,
    version: u32,
}

impl PersonalityRecord {
    /// Schema version written by this build
    pub const CURRENT_VERSION: u32 = 2;

    // =========================================================================
    // Constructor
    // =========================================================================

    /// Fresh record: neutral mood, zeroed modifiers, Stranger stage
    pub fn new(npc_id: NpcId, base: PersonalityType) -> Self {
        Self {
            npc_id,
            base,
            current: base,
            modifiers: PersonalityModifiers::default(),
            mood: MoodState::neutral(),
            stage: RelationshipStage::default(),
            traits: BTreeSet::new(),
            evolution_log: EvolutionLog::new(),
            profile: None,
            version: Self::CURRENT_VERSION,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn npc_id(&self) -> &NpcId {
        &self.npc_id
    }

    pub fn base_personality(&self) -> PersonalityType {
        self.base
    }

    pub fn current_personality(&self) -> PersonalityType {
        self.current
    }

    pub fn modifiers(&self) -> &PersonalityModifiers {
        &self.modifiers
    }

    pub fn stage(&self) -> RelationshipStage {
        self.stage
    }

    pub fn traits(&self) -> &BTreeSet<String> {
        &self.traits
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }

    pub fn evolution_log(&self) -> &EvolutionLog {
        &self.evolution_log
    }

    pub fn profile(&self) -> Option<&NpcProfile> {
        self.profile.as_ref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Stored mood without the expiry check. Use [`Self::mood_at`] for reads
    /// that should honour expiry.
    pub fn stored_mood(&self) -> &MoodState {
        &self.mood
    }

    /// Registered display name, or the raw id for unregistered NPCs
    pub fn display_name(&self) -> &str {
        match &self.profile {
            Some(profile) if !profile.name.trim().is_empty() => profile.name.as_str(),
            _ => self.npc_id.as_str(),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.profile.is_some()
    }

    /// Registered and not switched off
    pub fn is_active(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.active)
    }

    pub fn faction(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.faction.as_deref())
    }

    /// e.g. "Friendly (Business)"
    pub fn summary(&self) -> String {
        format!("{} ({})", self.current, self.stage)
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Attach registration facts. A supplied personality replaces the base.
    pub fn register(&mut self, profile: NpcProfile, now: DateTime<Utc>) -> Option<ArchetypeUpdate> {
        let personality = profile.personality;
        self.profile = Some(profile);
        personality.map(|archetype| self.set_base_personality(archetype, now))
    }

    /// Returns true if the flag changed. Unregistered records have no flag.
    pub fn set_active(&mut self, active: bool) -> bool {
        match self.profile.as_mut() {
            Some(profile) if profile.active != active => {
                profile.active = active;
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Permanent layer
    // =========================================================================

    pub fn set_base_personality(
        &mut self,
        archetype: PersonalityType,
        now: DateTime<Utc>,
    ) -> ArchetypeUpdate {
        if self.base == archetype {
            return ArchetypeUpdate::Unchanged { archetype };
        }
        let from = self.base;
        self.base = archetype;
        self.evolution_log.record(
            EvolutionKind::ArchetypeChange {
                from,
                to: archetype,
            },
            now,
        );
        let shift = self.recompute(now);
        ArchetypeUpdate::Changed {
            from,
            to: archetype,
            shift,
        }
    }

    /// Explicit stage transition. A no-op when the stage is unchanged.
    pub fn set_stage(&mut self, stage: RelationshipStage, now: DateTime<Utc>) -> StageTransition {
        if self.stage == stage {
            return StageTransition::Unchanged { stage };
        }
        let from = self.stage;
        self.stage = stage;
        self.evolution_log
            .record(EvolutionKind::StageChange { from, to: stage }, now);
        let shift = self.recompute(now);
        StageTransition::Changed {
            from,
            to: stage,
            shift,
        }
    }

    /// Add then clamp each supplied axis, then recompute the current archetype
    pub fn apply_modifiers(
        &mut self,
        delta: &ModifierDelta,
        now: DateTime<Utc>,
    ) -> Option<PersonalityShift> {
        self.modifiers.apply(delta);
        self.recompute(now)
    }

    /// Idempotent. Returns false if the trait was already held.
    pub fn grant_trait(&mut self, name: impl Into<String>) -> bool {
        self.traits.insert(name.into())
    }

    /// Fire `rule` unless its trait is already held
    pub fn apply_breaking_point(
        &mut self,
        rule: &BreakingPoint,
        now: DateTime<Utc>,
    ) -> Option<BreakingPointApplied> {
        if self.has_trait(rule.new_trait) {
            return None;
        }

        let shift_from_modifiers = self.apply_modifiers(&rule.effect, now);
        self.grant_trait(rule.new_trait);
        let stage = rule
            .stage_change
            .map(|stage| self.set_stage(stage, now))
            .filter(StageTransition::is_changed);

        self.evolution_log.record(
            EvolutionKind::BreakingPoint {
                name: rule.name.to_string(),
                trait_name: rule.new_trait.to_string(),
                event_type: rule.trigger.to_string(),
            },
            now,
        );

        Some(BreakingPointApplied {
            name: rule.name.to_string(),
            trait_name: rule.new_trait.to_string(),
            message: rule.message.to_string(),
            shift_from_modifiers,
            stage,
        })
    }

    fn recompute(&mut self, now: DateTime<Utc>) -> Option<PersonalityShift> {
        let next = derive_personality(self.base, &self.modifiers, self.stage);
        if next == self.current {
            return None;
        }
        let from = self.current;
        self.current = next;
        self.evolution_log
            .record(EvolutionKind::PersonalityShift { from, to: next }, now);
        Some(PersonalityShift { from, to: next })
    }

    // =========================================================================
    // Temporary layer
    // =========================================================================

    pub fn set_mood(&mut self, mood: MoodState) {
        self.mood = mood;
    }

    /// Explicit reset, needed for moods with no expiry
    pub fn clear_mood(&mut self) {
        self.mood = MoodState::neutral();
    }

    /// Current mood. An expired mood is overwritten with neutral before return.
    pub fn mood_at(&mut self, now: DateTime<Utc>) -> MoodState {
        if self.mood.is_expired(now) {
            self.mood = MoodState::neutral();
        }
        self.mood
    }

    // =========================================================================
    // Versioning
    // =========================================================================

    /// Mark the record as written by this build
    pub fn stamp_version(&mut self) {
        self.version = Self::CURRENT_VERSION;
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

fn legacy_version() -> u32 {
    1
}

/// Stored shape. Missing fields default so older blobs still load.
#[derive(Serialize, Deserialize)]
struct PersonalityRecordWireFormat {
    npc_id: NpcId,
    #[serde(default)]
    base_personality: PersonalityType,
    #[serde(default)]
    current_personality: PersonalityType,
    #[serde(default)]
    modifiers: PersonalityModifiers,
    #[serde(default)]
    mood: MoodState,
    #[serde(default)]
    stage: RelationshipStage,
    #[serde(default)]
    traits: BTreeSet<String>,
    #[serde(default)]
    evolution_log: EvolutionLog,
    #[serde(default)]
    profile: Option<NpcProfile>,
    #[serde(default = "legacy_version")]
    version: u32,
}

impl Serialize for PersonalityRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = PersonalityRecordWireFormat {
            npc_id: self.npc_id.clone(),
            base_personality: self.base,
            current_personality: self.current,
            modifiers: self.modifiers,
            mood: self.mood,
            stage: self.stage,
            traits: self.traits.clone(),
            evolution_log: self.evolution_log.clone(),
            profile: self.profile.clone(),
            version: self.version,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PersonalityRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = PersonalityRecordWireFormat::deserialize(deserializer)?;

        let modifiers = wire.modifiers.normalized();
        let mut evolution_log = wire.evolution_log;
        evolution_log.enforce_capacity();

        // The stored label is only a cache of the derivation
        let current = derive_personality(wire.base_personality, &modifiers, wire.stage);

        Ok(PersonalityRecord {
            npc_id: wire.npc_id,
            base: wire.base_personality,
            current,
            modifiers,
            mood: wire.mood,
            stage: wire.stage,
            traits: wire.traits,
            evolution_log,
            profile: wire.profile,
            version: wire.version,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BREAKING_POINTS;
    use crate::value_objects::MoodType;
    use chrono::{Duration, TimeZone};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid date")
    }

    fn record() -> PersonalityRecord {
        PersonalityRecord::new(NpcId::new("Vinnie"), PersonalityType::Professional)
    }

    mod recomputation {
        use super::*;

        #[test]
        fn enemy_stage_beats_loyal() {
            let mut r = record();
            r.apply_modifiers(
                &ModifierDelta::new().aggression(0.9).trust(0.9).warmth(0.9),
                fixed_time(),
            );
            assert_eq!(r.current_personality(), PersonalityType::Loyal);

            r.set_stage(RelationshipStage::Enemy, fixed_time());
            assert_eq!(r.current_personality(), PersonalityType::Aggressive);
        }

        #[test]
        fn loyal_beats_aggression() {
            let mut mods = PersonalityModifiers::default();
            mods.apply(&ModifierDelta::new().aggression(0.9).trust(0.7).warmth(0.4));
            assert_eq!(
                derive_personality(PersonalityType::Cautious, &mods, RelationshipStage::Friend),
                PersonalityType::Loyal
            );
        }

        #[test]
        fn aggression_beats_warmth() {
            let mut mods = PersonalityModifiers::default();
            mods.apply(&ModifierDelta::new().aggression(0.7).warmth(0.8));
            assert_eq!(
                derive_personality(PersonalityType::Mentor, &mods, RelationshipStage::Stranger),
                PersonalityType::Aggressive
            );
        }

        #[test]
        fn thresholds_are_strict() {
            let mut mods = PersonalityModifiers::default();
            mods.apply(&ModifierDelta::new().warmth(0.5));
            assert_eq!(
                derive_personality(PersonalityType::Mentor, &mods, RelationshipStage::Stranger),
                PersonalityType::Mentor
            );
            mods.apply(&ModifierDelta::new().warmth(-1.1));
            assert_eq!(
                derive_personality(PersonalityType::Mentor, &mods, RelationshipStage::Stranger),
                PersonalityType::Cold
            );
        }

        #[test]
        fn shift_is_logged() {
            let mut r = record();
            let shift = r.apply_modifiers(&ModifierDelta::new().warmth(0.6), fixed_time());
            assert_eq!(
                shift,
                Some(PersonalityShift {
                    from: PersonalityType::Professional,
                    to: PersonalityType::Friendly,
                })
            );
            assert_eq!(
                r.evolution_log().latest().map(|e| e.kind.label()),
                Some("personality_shift")
            );
        }
    }

    mod stage {
        use super::*;

        #[test]
        fn same_stage_is_not_logged() {
            let mut r = record();
            let outcome = r.set_stage(RelationshipStage::Stranger, fixed_time());
            assert_eq!(
                outcome,
                StageTransition::Unchanged {
                    stage: RelationshipStage::Stranger
                }
            );
            assert!(r.evolution_log().is_empty());
        }

        #[test]
        fn stage_can_move_backwards() {
            let mut r = record();
            r.set_stage(RelationshipStage::Trusted, fixed_time());
            let outcome = r.set_stage(RelationshipStage::Acquaintance, fixed_time());
            assert!(outcome.is_changed());
            assert_eq!(r.stage(), RelationshipStage::Acquaintance);
            assert_eq!(r.evolution_log().len(), 2);
        }
    }

    mod mood {
        use super::*;

        #[test]
        fn expired_mood_collapses_on_read() {
            let mut r = record();
            r.set_mood(MoodState::lasting(
                MoodType::Angry,
                0.8,
                fixed_time(),
                Some(Duration::milliseconds(1000)),
            ));

            let before = r.mood_at(fixed_time() + Duration::milliseconds(999));
            assert_eq!(before.current, MoodType::Angry);

            let after = r.mood_at(fixed_time() + Duration::milliseconds(1001));
            assert_eq!(after, MoodState::neutral());
            assert_eq!(*r.stored_mood(), MoodState::neutral());
        }

        #[test]
        fn clear_mood_resets_permanent_mood() {
            let mut r = record();
            r.set_mood(MoodState::lasting(MoodType::Betrayed, 1.0, fixed_time(), None));
            r.clear_mood();
            assert!(r.mood_at(fixed_time()).is_neutral());
        }
    }

    mod breaking_points {
        use super::*;

        fn rule(trait_name: &str) -> &'static BreakingPoint {
            BREAKING_POINTS
                .iter()
                .find(|r| r.new_trait == trait_name)
                .expect("catalog entry")
        }

        #[test]
        fn fires_once() {
            let mut r = record();
            let applied = r
                .apply_breaking_point(rule("indebted"), fixed_time())
                .expect("fires");
            assert_eq!(applied.trait_name, "indebted");
            assert_eq!(r.stage(), RelationshipStage::Friend);
            assert!(r.has_trait("indebted"));

            assert!(r.apply_breaking_point(rule("indebted"), fixed_time()).is_none());
            assert_eq!(r.traits().len(), 1);
        }

        #[test]
        fn breaking_point_is_latest_log_entry() {
            let mut r = record();
            r.apply_breaking_point(rule("vengeful"), fixed_time());
            assert_eq!(
                r.evolution_log().latest().map(|e| e.kind.label()),
                Some("breaking_point")
            );
            assert_eq!(r.current_personality(), PersonalityType::Aggressive);
        }
    }

    mod registration {
        use super::*;

        #[test]
        fn profile_personality_replaces_base() {
            let mut r = record();
            let update = r.register(
                NpcProfile::new("Big Vinnie").with_personality(PersonalityType::Mentor),
                fixed_time(),
            );
            assert!(matches!(update, Some(ArchetypeUpdate::Changed { .. })));
            assert_eq!(r.base_personality(), PersonalityType::Mentor);
            assert_eq!(r.current_personality(), PersonalityType::Mentor);
            assert_eq!(r.display_name(), "Big Vinnie");
            assert!(r.is_active());
        }

        #[test]
        fn unregistered_falls_back_to_id() {
            let r = record();
            assert_eq!(r.display_name(), "Vinnie");
            assert!(!r.is_active());
            assert_eq!(r.summary(), "Professional (Stranger)");
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn round_trip_preserves_state() {
            let mut r = record();
            r.register(NpcProfile::new("Vinnie").with_faction("docks"), fixed_time());
            r.apply_modifiers(&ModifierDelta::new().trust(0.4).warmth(-0.2), fixed_time());
            r.set_stage(RelationshipStage::Business, fixed_time());
            r.grant_trait("indebted");
            r.set_mood(MoodState::lasting(MoodType::Grateful, 0.9, fixed_time(), None));

            let json = serde_json::to_string(&r).expect("serialize");
            let back: PersonalityRecord = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, r);
        }

        #[test]
        fn legacy_blob_defaults_missing_fields() {
            let back: PersonalityRecord =
                serde_json::from_str(r#"{"npc_id":"Old","stage":"friend"}"#).expect("deserialize");
            assert_eq!(back.version(), 1);
            assert_eq!(back.base_personality(), PersonalityType::Professional);
            assert_eq!(back.stage(), RelationshipStage::Friend);
            assert!(back.stored_mood().is_neutral());
        }
    }
}
