//! Pure domain model for NPC social simulation
//!
//! No I/O and no randomness: every random choice is made by the engine.

extern crate self as npcsocial_domain;

pub mod aggregates;
pub mod catalog;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    derive_personality, ConversationInstance, ConversationMessage, ConversationStatus,
    PersonalityRecord,
};
pub use catalog::{
    BreakingPoint, ConversationTemplate, CrossReferenceType, Exchange, InterruptContext,
    InterruptRule, InterruptType, StyleSet,
};
pub use error::DomainError;
pub use events::{
    ArchetypeUpdate, BreakingPointApplied, BreakingPointOutcome, DeliveryOutcome,
    PersonalityShift, SocialEvent, StageTransition,
};
pub use ids::{ConversationId, NpcId};
pub use value_objects::{
    acceptance_probability, AcceptContext, AcceptanceBounds, EvolutionEntry, EvolutionKind,
    EvolutionLog, MemorableEvent, ModifierAxis, ModifierDelta, MoodState, MoodType, NpcMemory,
    NpcProfile, PersonalityModifiers, PersonalityType, RelationshipStage, Sentiment,
};
