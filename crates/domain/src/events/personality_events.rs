//! Personality-related mutation outcomes
//!
//! Returned by `PersonalityRecord` mutations so the caller can decide what to
//! log and which listeners to notify.

use crate::value_objects::{PersonalityType, RelationshipStage};

/// The derived personality label moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalityShift {
    pub from: PersonalityType,
    pub to: PersonalityType,
}

/// Outcome of setting the relationship stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTransition {
    /// Stage differs from before; logged
    Changed {
        from: RelationshipStage,
        to: RelationshipStage,
        shift: Option<PersonalityShift>,
    },
    /// Same stage requested, nothing recorded
    Unchanged { stage: RelationshipStage },
}

impl StageTransition {
    pub fn is_changed(&self) -> bool {
        matches!(self, StageTransition::Changed { .. })
    }

    pub fn shift(&self) -> Option<PersonalityShift> {
        match self {
            StageTransition::Changed { shift, .. } => *shift,
            StageTransition::Unchanged { .. } => None,
        }
    }
}

/// Outcome of replacing the base archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchetypeUpdate {
    Changed {
        from: PersonalityType,
        to: PersonalityType,
        shift: Option<PersonalityShift>,
    },
    Unchanged { archetype: PersonalityType },
}

impl ArchetypeUpdate {
    pub fn shift(&self) -> Option<PersonalityShift> {
        match self {
            ArchetypeUpdate::Changed { shift, .. } => *shift,
            ArchetypeUpdate::Unchanged { .. } => None,
        }
    }
}

/// Everything a fired breaking point changed on the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakingPointApplied {
    pub name: String,
    pub trait_name: String,
    pub message: String,
    pub shift_from_modifiers: Option<PersonalityShift>,
    pub stage: Option<StageTransition>,
}

/// Result of checking an event against the breaking point catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakingPointOutcome {
    /// A rule fired; its trait is now permanent
    Triggered { name: String, message: String },
    /// No rule matches, or every matching rule's trait is already held
    NotTriggered,
}

impl BreakingPointOutcome {
    pub fn occurred(&self) -> bool {
        matches!(self, BreakingPointOutcome::Triggered { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            BreakingPointOutcome::Triggered { name, .. } => Some(name),
            BreakingPointOutcome::NotTriggered => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            BreakingPointOutcome::Triggered { message, .. } => Some(message),
            BreakingPointOutcome::NotTriggered => None,
        }
    }
}
