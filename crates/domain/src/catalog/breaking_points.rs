//! One-time permanent personality shifts
//!
//! Rules are checked in declaration order. Several rules may share a trigger;
//! the first one whose trait the NPC does not yet hold is the one that fires.

use crate::value_objects::{ModifierDelta, RelationshipStage};

/// A named, non-repeatable reaction to a gameplay event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakingPoint {
    pub name: &'static str,
    /// Event type string that can fire this rule
    pub trigger: &'static str,
    pub effect: ModifierDelta,
    /// Granted at most once per NPC
    pub new_trait: &'static str,
    pub stage_change: Option<RelationshipStage>,
    pub message: &'static str,
}

pub const BREAKING_POINTS: &[BreakingPoint] = &[
    BreakingPoint {
        name: "Saved From Cops",
        trigger: "saved_from_cops",
        effect: ModifierDelta {
            trust: Some(0.4),
            warmth: Some(0.3),
            ..ModifierDelta::NONE
        },
        new_trait: "indebted",
        stage_change: Some(RelationshipStage::Friend),
        message: "You kept them out of a cell. They won't forget it.",
    },
    BreakingPoint {
        name: "Burned Once",
        trigger: "deal_betrayed",
        effect: ModifierDelta {
            trust: Some(-0.5),
            warmth: Some(-0.3),
            ..ModifierDelta::NONE
        },
        new_trait: "bitter",
        stage_change: None,
        message: "Something went cold behind their eyes. They'll count the cash twice from now on.",
    },
    BreakingPoint {
        name: "Sworn Vengeance",
        trigger: "deal_betrayed",
        effect: ModifierDelta {
            trust: Some(-0.5),
            aggression: Some(0.5),
            ..ModifierDelta::NONE
        },
        new_trait: "vengeful",
        stage_change: Some(RelationshipStage::Enemy),
        message: "Twice is a pattern. They want you to pay for it.",
    },
    BreakingPoint {
        name: "Big Score",
        trigger: "big_score",
        effect: ModifierDelta {
            warmth: Some(0.2),
            trust: Some(0.2),
            openness: Some(0.2),
            ..ModifierDelta::NONE
        },
        new_trait: "prosperous_partner",
        stage_change: None,
        message: "Nothing builds a friendship like a full bag.",
    },
    BreakingPoint {
        name: "Helped Escape",
        trigger: "helped_escape",
        effect: ModifierDelta {
            trust: Some(0.5),
            warmth: Some(0.2),
            ..ModifierDelta::NONE
        },
        new_trait: "ride_or_die",
        stage_change: Some(RelationshipStage::Trusted),
        message: "You went back for them. That settles it.",
    },
    BreakingPoint {
        name: "Lost Faith",
        trigger: "multiple_failures",
        effect: ModifierDelta {
            trust: Some(-0.3),
            patience: Some(-0.4),
            ..ModifierDelta::NONE
        },
        new_trait: "doubtful",
        stage_change: None,
        message: "They've stopped expecting you to get it right.",
    },
    BreakingPoint {
        name: "Fair Share",
        trigger: "shared_profits",
        effect: ModifierDelta {
            trust: Some(0.3),
            warmth: Some(0.2),
            ..ModifierDelta::NONE
        },
        new_trait: "respects_fairness",
        stage_change: None,
        message: "An even split. They noticed.",
    },
];

/// Rules listening for `event_type`, in declaration order
pub fn rules_for(event_type: &str) -> impl Iterator<Item = &'static BreakingPoint> + '_ {
    BREAKING_POINTS
        .iter()
        .filter(move |rule| rule.trigger == event_type)
}
