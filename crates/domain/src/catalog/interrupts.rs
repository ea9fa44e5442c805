//! Interrupt trigger rules and phrase sets
//!
//! Rules are evaluated in declaration order against a (speaker, listener)
//! pair. Only the first rule whose condition holds gets a roll.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregates::PersonalityRecord;

/// Stance gap on the five-point scale that counts as disagreement
pub const STANCE_DISAGREEMENT: u8 = 2;

/// What the current speaker is talking about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InterruptContext {
    pub topic: Option<String>,
    /// The line being spoken, passed through for the presentation layer
    pub line: Option<String>,
}

impl InterruptContext {
    pub fn about(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            line: None,
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptType {
    FactionConflict,
    Debate,
    Agreement,
    Generic,
}

impl fmt::Display for InterruptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterruptType::FactionConflict => "faction_conflict",
            InterruptType::Debate => "debate",
            InterruptType::Agreement => "agreement",
            InterruptType::Generic => "generic",
        };
        write!(f, "{}", name)
    }
}

/// `condition(speaker, listener, context)`
pub type InterruptCondition = fn(&PersonalityRecord, &PersonalityRecord, &InterruptContext) -> bool;

#[derive(Clone, Copy)]
pub struct InterruptRule {
    pub name: &'static str,
    pub condition: InterruptCondition,
    /// Chance of firing once the condition holds
    pub probability: f64,
    pub kind: InterruptType,
}

impl fmt::Debug for InterruptRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterruptRule")
            .field("name", &self.name)
            .field("probability", &self.probability)
            .field("kind", &self.kind)
            .finish()
    }
}

fn faction_rivalry(
    speaker: &PersonalityRecord,
    listener: &PersonalityRecord,
    _: &InterruptContext,
) -> bool {
    match (speaker.faction(), listener.profile()) {
        (Some(faction), Some(profile)) => profile.is_rival_of(faction),
        _ => false,
    }
}

fn topic_disagreement(
    speaker: &PersonalityRecord,
    listener: &PersonalityRecord,
    context: &InterruptContext,
) -> bool {
    let Some(topic) = context.topic.as_deref() else {
        return false;
    };
    let stance = |record: &PersonalityRecord| record.profile().and_then(|p| p.stance_on(topic));
    match (stance(speaker), stance(listener)) {
        (Some(a), Some(b)) => a.abs_diff(b) >= STANCE_DISAGREEMENT,
        _ => false,
    }
}

fn strong_opinion(
    _: &PersonalityRecord,
    listener: &PersonalityRecord,
    context: &InterruptContext,
) -> bool {
    let Some(topic) = context.topic.as_deref() else {
        return false;
    };
    listener
        .profile()
        .is_some_and(|p| p.opinionated && p.stance_on(topic).is_some())
}

fn friendly_support(
    speaker: &PersonalityRecord,
    listener: &PersonalityRecord,
    _: &InterruptContext,
) -> bool {
    match (speaker.profile(), listener.profile()) {
        (Some(s), Some(l)) => s.is_ally_of(listener.npc_id()) && l.is_ally_of(speaker.npc_id()),
        _ => false,
    }
}

pub const INTERRUPT_RULES: &[InterruptRule] = &[
    InterruptRule {
        name: "faction_rivalry",
        condition: faction_rivalry,
        probability: 0.6,
        kind: InterruptType::FactionConflict,
    },
    InterruptRule {
        name: "topic_disagreement",
        condition: topic_disagreement,
        probability: 0.4,
        kind: InterruptType::Debate,
    },
    InterruptRule {
        name: "strong_opinion",
        condition: strong_opinion,
        probability: 0.3,
        kind: InterruptType::Generic,
    },
    InterruptRule {
        name: "friendly_support",
        condition: friendly_support,
        probability: 0.25,
        kind: InterruptType::Agreement,
    },
];

/// First rule whose condition holds for this pair
pub fn first_matching_rule(
    speaker: &PersonalityRecord,
    listener: &PersonalityRecord,
    context: &InterruptContext,
) -> Option<&'static InterruptRule> {
    INTERRUPT_RULES
        .iter()
        .find(|rule| (rule.condition)(speaker, listener, context))
}

/// Phrase set per interrupt type; `{speaker}` and `{interrupter}` are display names
pub fn interrupt_phrases(kind: InterruptType) -> &'static [&'static str] {
    match kind {
        InterruptType::FactionConflict => &[
            "Nobody asked your crew's opinion, {speaker}.",
            "{speaker}, your people have done enough damage around here.",
            "Funny hearing that from one of your lot, {speaker}.",
        ],
        InterruptType::Debate => &[
            "Hold on, {speaker}, that's not how I see it.",
            "No, no. {speaker} has this completely backwards.",
            "With respect, {speaker}, you're wrong about that.",
        ],
        InterruptType::Agreement => &[
            "{speaker}'s right, listen to them.",
            "I'm with {speaker} on this one.",
            "Exactly what I was going to say, {speaker}.",
        ],
        InterruptType::Generic => &[
            "Mind if I cut in?",
            "Sorry, {speaker}, I have to say something here.",
            "{interrupter} has an opinion on that, and here it is.",
        ],
    }
}

pub fn render_interrupt_line(template: &str, speaker: &str, interrupter: &str) -> String {
    template
        .replace("{speaker}", speaker)
        .replace("{interrupter}", interrupter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{NpcProfile, PersonalityType};
    use crate::NpcId;
    use chrono::Utc;

    fn registered(id: &str, profile: NpcProfile) -> PersonalityRecord {
        let mut record = PersonalityRecord::new(NpcId::new(id), PersonalityType::Professional);
        record.register(profile, Utc::now());
        record
    }

    #[test]
    fn test_faction_rivalry_checked_first() {
        let speaker = registered(
            "Sal",
            NpcProfile::new("Sal").with_faction("docks").with_ally("Rico"),
        );
        let listener = registered(
            "Rico",
            NpcProfile::new("Rico").with_rival("docks").with_ally("Sal"),
        );
        let rule = first_matching_rule(&speaker, &listener, &InterruptContext::default())
            .expect("rule");
        assert_eq!(rule.name, "faction_rivalry");
    }

    #[test]
    fn test_stance_gap_of_two_is_debate() {
        let speaker = registered("Sal", NpcProfile::new("Sal").with_stance("cops", 1));
        let listener = registered("Rico", NpcProfile::new("Rico").with_stance("cops", 3));
        let rule = first_matching_rule(&speaker, &listener, &InterruptContext::about("cops"))
            .expect("rule");
        assert_eq!(rule.kind, InterruptType::Debate);

        let mild = registered("Rico", NpcProfile::new("Rico").with_stance("cops", 2));
        assert!(first_matching_rule(&speaker, &mild, &InterruptContext::about("cops")).is_none());
    }

    #[test]
    fn test_strong_opinion_needs_stance_on_topic() {
        let speaker = registered("Sal", NpcProfile::new("Sal"));
        let listener = registered(
            "Rico",
            NpcProfile::new("Rico").with_stance("money", 4).opinionated(),
        );
        let rule = first_matching_rule(&speaker, &listener, &InterruptContext::about("money"))
            .expect("rule");
        assert_eq!(rule.name, "strong_opinion");
        assert!(
            first_matching_rule(&speaker, &listener, &InterruptContext::about("cops")).is_none()
        );
    }

    #[test]
    fn test_friendly_support_requires_mutual_allies() {
        let speaker = registered("Sal", NpcProfile::new("Sal").with_ally("Rico"));
        let one_sided = registered("Rico", NpcProfile::new("Rico"));
        assert!(first_matching_rule(&speaker, &one_sided, &InterruptContext::default()).is_none());

        let mutual = registered("Rico", NpcProfile::new("Rico").with_ally("Sal"));
        let rule =
            first_matching_rule(&speaker, &mutual, &InterruptContext::default()).expect("rule");
        assert_eq!(rule.kind, InterruptType::Agreement);
    }

    #[test]
    fn test_render_substitutes_names() {
        let line = render_interrupt_line("{interrupter} cuts off {speaker}", "Sal", "Rico");
        assert_eq!(line, "Rico cuts off Sal");
    }
}
