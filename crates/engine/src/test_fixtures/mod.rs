//! Test fixtures loader and common test helpers.
//!
//! Save blobs live under `test_data/`; crews and engines are built in code.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{crew, TestEngine};
//!
//! #[test]
//! fn test_skeptic_distrusts() {
//!     let mut harness = TestEngine::new();
//!     crew::reliability_pair(&mut harness.engine);
//!     // ... test logic
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use npcsocial_domain::{NpcId, NpcProfile};

use crate::infrastructure::clock::{FixedClock, ManualClock, ScriptedRandom};
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::memory::MemoryJournal;
use crate::infrastructure::ports::ClockPort;
use crate::infrastructure::storage::InMemoryStorage;
use crate::stores::SocialState;
use crate::use_cases::PersonalityUseCases;
use crate::SocialEngine;

// =============================================================================
// Fixture Loading
// =============================================================================

/// Read a raw fixture file from `test_data/`.
///
/// # Panics
///
/// Panics if the fixture file cannot be read.
pub fn load_fixture(path: &str) -> String {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path);
    std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}

// =============================================================================
// Time and state
// =============================================================================

/// 2024-06-01T12:00:00Z
pub fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_717_243_200, 0).expect("valid timestamp")
}

pub fn fixed_clock() -> Arc<dyn ClockPort> {
    Arc::new(FixedClock(epoch()))
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(epoch()))
}

pub fn state() -> SocialState {
    SocialState::new(50)
}

/// Register directly against a bare state
pub fn register(state: &mut SocialState, id: &str, profile: NpcProfile) {
    PersonalityUseCases::new(fixed_clock()).register(state, &NpcId::new(id), profile);
}

// =============================================================================
// Engine harness
// =============================================================================

/// An engine on in-memory storage with a controllable clock
pub struct TestEngine {
    pub engine: SocialEngine,
    pub storage: Arc<InMemoryStorage>,
    pub memory: Arc<MemoryJournal>,
    pub clock: Arc<ManualClock>,
}

impl TestEngine {
    pub fn new() -> Self {
        Self::with_random(ScriptedRandom::constant(0.5))
    }

    pub fn with_random(random: ScriptedRandom) -> Self {
        let storage = Arc::new(InMemoryStorage::new());
        let clock = manual_clock();
        Self::on_storage(storage, clock, random)
    }

    /// Engine over existing storage, e.g. to simulate a restart
    pub fn on_storage(
        storage: Arc<InMemoryStorage>,
        clock: Arc<ManualClock>,
        random: ScriptedRandom,
    ) -> Self {
        let memory = Arc::new(MemoryJournal::new(clock.clone()));
        let engine = SocialEngine::with_ports(
            EngineConfig::default(),
            storage.clone(),
            memory.clone(),
            clock.clone(),
            Arc::new(random),
        );
        Self {
            engine,
            storage,
            memory,
            clock,
        }
    }

    /// A second engine over the same storage and clock
    pub fn restart(&self) -> Self {
        Self::on_storage(
            self.storage.clone(),
            self.clock.clone(),
            ScriptedRandom::constant(0.5),
        )
    }
}

impl Default for TestEngine {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Crew Fixtures
// =============================================================================

/// Pre-built NPC setups.
pub mod crew {
    use super::*;
    use npcsocial_domain::{ModifierDelta, PersonalityType};

    /// Skeptic1 (trust -0.4) and Defender1 (warmth +0.5)
    pub fn reliability_pair(engine: &mut SocialEngine) -> Vec<NpcId> {
        let skeptic = NpcId::new("Skeptic1");
        let defender = NpcId::new("Defender1");
        engine.register_npc(skeptic.clone(), NpcProfile::new("Skeptic1"));
        engine.register_npc(defender.clone(), NpcProfile::new("Defender1"));
        engine.apply_modifiers(&skeptic, &ModifierDelta::new().trust(-0.4));
        engine.apply_modifiers(&defender, &ModifierDelta::new().warmth(0.5));
        vec![skeptic, defender]
    }

    /// Two dock workers and a rival from uptown who never lets them talk
    pub fn rival_factions(engine: &mut SocialEngine) {
        engine.register_npc(
            "Vinnie",
            NpcProfile::new("Vinnie")
                .with_personality(PersonalityType::Charismatic)
                .with_faction("docks")
                .with_stance("smuggling", 5),
        );
        engine.register_npc(
            "Marco",
            NpcProfile::new("Marco")
                .with_personality(PersonalityType::Aggressive)
                .with_faction("uptown")
                .with_rival("docks")
                .with_stance("smuggling", 1),
        );
        engine.register_npc(
            "Lena",
            NpcProfile::new("Lena")
                .with_faction("docks")
                .with_ally("Vinnie")
                .with_stance("smuggling", 4),
        );
    }
}
