//! Personality archetypes and the six modifier axes
//!
//! - `PersonalityType`: the discrete label used for dialogue-style lookup
//! - `PersonalityModifiers`: six scalar axes, each held in [-1, 1]
//! - `ModifierDelta`: a partial set of additive adjustments

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Discrete personality archetype.
///
/// An NPC carries two of these: an immutable base assigned at creation and a
/// current label derived from its modifiers and relationship stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityType {
    /// Business first, polite, measured
    #[default]
    Professional,
    /// Warm and open
    Friendly,
    /// Confrontational, quick to threaten
    Aggressive,
    /// Careful, slow to commit
    Cautious,
    /// Talker, natural leader
    Charismatic,
    /// Distant and transactional
    Cold,
    /// Sticks with their people
    Loyal,
    /// Always looking for an angle
    Opportunistic,
    /// Teaches, patient with newcomers
    Mentor,
    /// Hard to read, mood swings
    Unpredictable,
}

impl PersonalityType {
    /// Get all archetypes in catalog order
    pub fn all() -> &'static [PersonalityType] {
        &[
            PersonalityType::Professional,
            PersonalityType::Friendly,
            PersonalityType::Aggressive,
            PersonalityType::Cautious,
            PersonalityType::Charismatic,
            PersonalityType::Cold,
            PersonalityType::Loyal,
            PersonalityType::Opportunistic,
            PersonalityType::Mentor,
            PersonalityType::Unpredictable,
        ]
    }

    /// Get a display name for the archetype
    pub fn display_name(&self) -> &'static str {
        match self {
            PersonalityType::Professional => "Professional",
            PersonalityType::Friendly => "Friendly",
            PersonalityType::Aggressive => "Aggressive",
            PersonalityType::Cautious => "Cautious",
            PersonalityType::Charismatic => "Charismatic",
            PersonalityType::Cold => "Cold",
            PersonalityType::Loyal => "Loyal",
            PersonalityType::Opportunistic => "Opportunistic",
            PersonalityType::Mentor => "Mentor",
            PersonalityType::Unpredictable => "Unpredictable",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for PersonalityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(PersonalityType::Professional),
            "friendly" => Ok(PersonalityType::Friendly),
            "aggressive" => Ok(PersonalityType::Aggressive),
            "cautious" => Ok(PersonalityType::Cautious),
            "charismatic" => Ok(PersonalityType::Charismatic),
            "cold" => Ok(PersonalityType::Cold),
            "loyal" => Ok(PersonalityType::Loyal),
            "opportunistic" => Ok(PersonalityType::Opportunistic),
            "mentor" => Ok(PersonalityType::Mentor),
            "unpredictable" => Ok(PersonalityType::Unpredictable),
            _ => Err(DomainError::parse(format!("Unknown personality: {}", s))),
        }
    }
}

/// One of the six modifier axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierAxis {
    Warmth,
    Trust,
    Aggression,
    Patience,
    Formality,
    Openness,
}

impl ModifierAxis {
    pub fn all() -> &'static [ModifierAxis] {
        &[
            ModifierAxis::Warmth,
            ModifierAxis::Trust,
            ModifierAxis::Aggression,
            ModifierAxis::Patience,
            ModifierAxis::Formality,
            ModifierAxis::Openness,
        ]
    }
}

/// Six independent personality axes, each clamped to [-1, 1].
///
/// Fields are private so the clamp cannot be bypassed: the only write path is
/// [`PersonalityModifiers::apply`], which adds then clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersonalityModifiers {
    warmth: f32,
    trust: f32,
    aggression: f32,
    patience: f32,
    formality: f32,
    openness: f32,
}

impl PersonalityModifiers {
    pub const MIN: f32 = -1.0;
    pub const MAX: f32 = 1.0;

    pub fn warmth(&self) -> f32 {
        self.warmth
    }

    pub fn trust(&self) -> f32 {
        self.trust
    }

    pub fn aggression(&self) -> f32 {
        self.aggression
    }

    pub fn patience(&self) -> f32 {
        self.patience
    }

    pub fn formality(&self) -> f32 {
        self.formality
    }

    pub fn openness(&self) -> f32 {
        self.openness
    }

    pub fn get(&self, axis: ModifierAxis) -> f32 {
        match axis {
            ModifierAxis::Warmth => self.warmth,
            ModifierAxis::Trust => self.trust,
            ModifierAxis::Aggression => self.aggression,
            ModifierAxis::Patience => self.patience,
            ModifierAxis::Formality => self.formality,
            ModifierAxis::Openness => self.openness,
        }
    }

    fn slot(&mut self, axis: ModifierAxis) -> &mut f32 {
        match axis {
            ModifierAxis::Warmth => &mut self.warmth,
            ModifierAxis::Trust => &mut self.trust,
            ModifierAxis::Aggression => &mut self.aggression,
            ModifierAxis::Patience => &mut self.patience,
            ModifierAxis::Formality => &mut self.formality,
            ModifierAxis::Openness => &mut self.openness,
        }
    }

    /// Add every supplied delta to its axis, then clamp.
    pub fn apply(&mut self, delta: &ModifierDelta) {
        for (axis, amount) in delta.entries() {
            let slot = self.slot(axis);
            let next = *slot + amount;
            // NaN deltas leave the axis untouched
            if next.is_finite() {
                *slot = next.clamp(Self::MIN, Self::MAX);
            }
        }
    }

    /// Re-clamp every axis. Used after deserializing hand-edited save blobs.
    pub fn normalized(mut self) -> Self {
        for axis in ModifierAxis::all() {
            let slot = self.slot(*axis);
            *slot = if slot.is_finite() {
                slot.clamp(Self::MIN, Self::MAX)
            } else {
                0.0
            };
        }
        self
    }
}

/// Partial map of additive modifier adjustments.
///
/// Absent axes are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModifierDelta {
    pub warmth: Option<f32>,
    pub trust: Option<f32>,
    pub aggression: Option<f32>,
    pub patience: Option<f32>,
    pub formality: Option<f32>,
    pub openness: Option<f32>,
}

impl ModifierDelta {
    /// No adjustment on any axis; usable in const tables
    pub const NONE: ModifierDelta = ModifierDelta {
        warmth: None,
        trust: None,
        aggression: None,
        patience: None,
        formality: None,
        openness: None,
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, axis: ModifierAxis, amount: f32) -> Self {
        let slot = match axis {
            ModifierAxis::Warmth => &mut self.warmth,
            ModifierAxis::Trust => &mut self.trust,
            ModifierAxis::Aggression => &mut self.aggression,
            ModifierAxis::Patience => &mut self.patience,
            ModifierAxis::Formality => &mut self.formality,
            ModifierAxis::Openness => &mut self.openness,
        };
        *slot = Some(slot.unwrap_or(0.0) + amount);
        self
    }

    pub fn warmth(self, amount: f32) -> Self {
        self.with(ModifierAxis::Warmth, amount)
    }

    pub fn trust(self, amount: f32) -> Self {
        self.with(ModifierAxis::Trust, amount)
    }

    pub fn aggression(self, amount: f32) -> Self {
        self.with(ModifierAxis::Aggression, amount)
    }

    pub fn patience(self, amount: f32) -> Self {
        self.with(ModifierAxis::Patience, amount)
    }

    pub fn formality(self, amount: f32) -> Self {
        self.with(ModifierAxis::Formality, amount)
    }

    pub fn openness(self, amount: f32) -> Self {
        self.with(ModifierAxis::Openness, amount)
    }

    /// Supplied (axis, amount) pairs in axis order
    pub fn entries(&self) -> impl Iterator<Item = (ModifierAxis, f32)> + '_ {
        ModifierAxis::all().iter().filter_map(move |axis| {
            let value = match axis {
                ModifierAxis::Warmth => self.warmth,
                ModifierAxis::Trust => self.trust,
                ModifierAxis::Aggression => self.aggression,
                ModifierAxis::Patience => self.patience,
                ModifierAxis::Formality => self.formality,
                ModifierAxis::Openness => self.openness,
            };
            value.map(|v| (*axis, v))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}
