//! Gossip and cross-reference phrase buckets

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::Sentiment;

/// One gossip exchange: what the source says, and how the target answers.
/// `{event}` is the remembered event's description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GossipPhrase {
    pub opener: &'static str,
    pub reply: &'static str,
}

pub fn gossip_phrases(sentiment: Sentiment) -> &'static [GossipPhrase] {
    match sentiment {
        Sentiment::Positive => &[
            GossipPhrase {
                opener: "You won't believe it. {event}.",
                reply: "Good. About time something went right around here.",
            },
            GossipPhrase {
                opener: "Heard some good news for once: {event}.",
                reply: "Huh. Maybe things are turning around.",
            },
        ],
        Sentiment::Negative => &[
            GossipPhrase {
                opener: "Keep this between us. {event}.",
                reply: "That's bad. Real bad.",
            },
            GossipPhrase {
                opener: "Did you hear? {event}.",
                reply: "I knew something like that was coming.",
            },
        ],
        Sentiment::Neutral => &[
            GossipPhrase {
                opener: "Something you should know: {event}.",
                reply: "Hm. I'll keep that in mind.",
            },
            GossipPhrase {
                opener: "Word going around is {event}.",
                reply: "Is that so.",
            },
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossReferenceType {
    Agreement,
    Disagreement,
    Warning,
}

impl fmt::Display for CrossReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossReferenceType::Agreement => write!(f, "agreement"),
            CrossReferenceType::Disagreement => write!(f, "disagreement"),
            CrossReferenceType::Warning => write!(f, "warning"),
        }
    }
}

impl std::str::FromStr for CrossReferenceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "agreement" => Ok(CrossReferenceType::Agreement),
            "disagreement" => Ok(CrossReferenceType::Disagreement),
            "warning" => Ok(CrossReferenceType::Warning),
            _ => Err(DomainError::parse(format!("Unknown cross-reference type: {}", s))),
        }
    }
}

/// `{name}` is the referenced NPC's display name
pub fn cross_reference_phrases(kind: CrossReferenceType) -> &'static [&'static str] {
    match kind {
        CrossReferenceType::Agreement => &[
            "Like {name} said, you can count on this one.",
            "{name} vouched for you. That's good enough for me.",
            "I'm with {name} on this.",
        ],
        CrossReferenceType::Disagreement => &[
            "Don't listen to {name}, they don't know what they're talking about.",
            "{name} says a lot of things. Doesn't make them true.",
            "Funny, {name} told me the opposite.",
        ],
        CrossReferenceType::Warning => &[
            "Watch yourself around {name}.",
            "If {name} offers you a deal, walk away.",
            "{name}'s been asking questions about you.",
        ],
    }
}
