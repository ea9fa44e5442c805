//! Value objects - Immutable objects defined by their attributes

mod acceptance;
mod evolution;
mod memory;
mod mood;
mod personality;
mod profile;
mod relationship;

pub use acceptance::{
    acceptance_probability, AcceptContext, AcceptanceBounds, HIGH_RISK_THRESHOLD,
    HIGH_VALUE_THRESHOLD,
};
pub use evolution::{EvolutionEntry, EvolutionKind, EvolutionLog};
pub use memory::{MemorableEvent, NpcMemory, Sentiment};
pub use mood::{MoodState, MoodType};
pub use personality::{ModifierAxis, ModifierDelta, PersonalityModifiers, PersonalityType};
pub use profile::{NpcProfile, STANCE_MAX, STANCE_MIN};
pub use relationship::RelationshipStage;
