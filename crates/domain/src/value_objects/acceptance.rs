//! Weighted chance that an NPC says yes to a proposal

use serde::{Deserialize, Serialize};

use crate::value_objects::{MoodType, PersonalityModifiers, RelationshipStage};

/// Risk above which a proposal is penalised
pub const HIGH_RISK_THRESHOLD: f32 = 0.7;
/// Value above which a proposal gets a bonus
pub const HIGH_VALUE_THRESHOLD: f64 = 1000.0;

const BASE_CHANCE: f32 = 0.5;
const TRUST_WEIGHT: f32 = 0.2;
const WARMTH_WEIGHT: f32 = 0.1;
const HIGH_RISK_DELTA: f32 = -0.2;
const HIGH_VALUE_DELTA: f32 = 0.1;

/// What is being proposed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AcceptContext {
    /// 0.0 - 1.0
    pub risk_level: Option<f32>,
    pub value_to_npc: Option<f64>,
}

impl AcceptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risk(mut self, risk: f32) -> Self {
        self.risk_level = Some(risk);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value_to_npc = Some(value);
        self
    }
}

/// Floor and ceiling on the acceptance chance.
///
/// Neither bound may reach 0 or 1 or the decision becomes fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceBounds {
    pub min: f32,
    pub max: f32,
}

impl AcceptanceBounds {
    pub const DEFAULT: AcceptanceBounds = AcceptanceBounds { min: 0.1, max: 0.95 };

    /// Returns the default bounds if the pair is unusable
    pub fn sanitized(self) -> Self {
        let usable = self.min.is_finite()
            && self.max.is_finite()
            && self.min > 0.0
            && self.max < 1.0
            && self.min <= self.max;
        if usable {
            self
        } else {
            Self::DEFAULT
        }
    }

    pub fn clamp(&self, p: f32) -> f32 {
        if p.is_nan() {
            return self.min;
        }
        p.clamp(self.min, self.max)
    }
}

impl Default for AcceptanceBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Probability in `bounds` that the NPC accepts
pub fn acceptance_probability(
    modifiers: &PersonalityModifiers,
    mood: MoodType,
    stage: RelationshipStage,
    context: &AcceptContext,
    bounds: AcceptanceBounds,
) -> f32 {
    let mut p = BASE_CHANCE
        + modifiers.trust() * TRUST_WEIGHT
        + modifiers.warmth() * WARMTH_WEIGHT
        + mood.acceptance_delta()
        + stage.acceptance_delta();

    if context.risk_level.is_some_and(|r| r > HIGH_RISK_THRESHOLD) {
        p += HIGH_RISK_DELTA;
    }
    if context.value_to_npc.is_some_and(|v| v > HIGH_VALUE_THRESHOLD) {
        p += HIGH_VALUE_DELTA;
    }

    bounds.sanitized().clamp(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ModifierDelta;

    fn mods(trust: f32, warmth: f32) -> PersonalityModifiers {
        let mut m = PersonalityModifiers::default();
        m.apply(&ModifierDelta::new().trust(trust).warmth(warmth));
        m
    }

    #[test]
    fn test_neutral_stranger_is_a_coin_flip() {
        let p = acceptance_probability(
            &PersonalityModifiers::default(),
            MoodType::Neutral,
            RelationshipStage::Stranger,
            &AcceptContext::new(),
            AcceptanceBounds::DEFAULT,
        );
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_best_case_clamped_to_ceiling() {
        let p = acceptance_probability(
            &mods(1.0, 1.0),
            MoodType::Grateful,
            RelationshipStage::Trusted,
            &AcceptContext::new().with_value(5000.0),
            AcceptanceBounds::DEFAULT,
        );
        assert_eq!(p, 0.95);
    }

    #[test]
    fn test_worst_case_clamped_to_floor() {
        let p = acceptance_probability(
            &mods(-1.0, -1.0),
            MoodType::Betrayed,
            RelationshipStage::Enemy,
            &AcceptContext::new().with_risk(0.9),
            AcceptanceBounds::DEFAULT,
        );
        assert_eq!(p, 0.1);
    }

    #[test]
    fn test_context_thresholds_are_strict() {
        let at_threshold = acceptance_probability(
            &PersonalityModifiers::default(),
            MoodType::Neutral,
            RelationshipStage::Stranger,
            &AcceptContext::new().with_risk(0.7).with_value(1000.0),
            AcceptanceBounds::DEFAULT,
        );
        assert!((at_threshold - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_bounds_fall_back_to_default() {
        let bounds = AcceptanceBounds { min: 0.0, max: 1.0 }.sanitized();
        assert_eq!(bounds, AcceptanceBounds::DEFAULT);
    }
}
