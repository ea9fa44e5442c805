//! Relationship stage between an NPC and the player

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// How close the NPC is to the player.
///
/// Stages are not ordered by the engine: an NPC can go from Trusted straight to
/// Enemy. Every transition is an explicit call; nothing infers a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStage {
    /// No established relationship
    #[default]
    Stranger,
    /// Familiar face
    Acquaintance,
    /// Working relationship, strictly transactional
    Business,
    /// Personal warmth
    Friend,
    /// Would take a risk for the player
    Trusted,
    /// Actively opposed
    Enemy,
}

impl RelationshipStage {
    /// Get all stages for UI dropdowns
    pub fn all() -> &'static [RelationshipStage] {
        &[
            RelationshipStage::Stranger,
            RelationshipStage::Acquaintance,
            RelationshipStage::Business,
            RelationshipStage::Friend,
            RelationshipStage::Trusted,
            RelationshipStage::Enemy,
        ]
    }

    /// Get a display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationshipStage::Stranger => "Stranger",
            RelationshipStage::Acquaintance => "Acquaintance",
            RelationshipStage::Business => "Business",
            RelationshipStage::Friend => "Friend",
            RelationshipStage::Trusted => "Trusted",
            RelationshipStage::Enemy => "Enemy",
        }
    }

    /// Additive adjustment to the chance of accepting a proposal
    pub fn acceptance_delta(&self) -> f32 {
        match self {
            RelationshipStage::Trusted => 0.3,
            RelationshipStage::Friend => 0.2,
            RelationshipStage::Enemy => -0.4,
            RelationshipStage::Stranger
            | RelationshipStage::Acquaintance
            | RelationshipStage::Business => 0.0,
        }
    }
}

impl fmt::Display for RelationshipStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for RelationshipStage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stranger" => Ok(RelationshipStage::Stranger),
            "acquaintance" => Ok(RelationshipStage::Acquaintance),
            "business" => Ok(RelationshipStage::Business),
            "friend" => Ok(RelationshipStage::Friend),
            "trusted" => Ok(RelationshipStage::Trusted),
            "enemy" => Ok(RelationshipStage::Enemy),
            _ => Err(DomainError::parse(format!("Unknown relationship stage: {}", s))),
        }
    }
}
