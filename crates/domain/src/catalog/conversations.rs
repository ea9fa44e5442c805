//! Multi-NPC conversation templates and role scoring
//!
//! Line templates use `{placeholder}` syntax. Role names resolve to the
//! assigned NPC's display name, `{player}` and any other key come from the
//! caller's context.

use crate::aggregates::PersonalityRecord;
use crate::value_objects::PersonalityType;

/// Score a matching heuristic adds for a role
pub const ROLE_MATCH_SCORE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub role: &'static str,
    pub template: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationTemplate {
    pub name: &'static str,
    pub min_participants: usize,
    pub exchanges: &'static [Exchange],
}

impl ConversationTemplate {
    /// Distinct role names in first-appearance order
    pub fn roles(&self) -> Vec<&'static str> {
        let mut roles: Vec<&'static str> = Vec::new();
        for exchange in self.exchanges {
            if !roles.contains(&exchange.role) {
                roles.push(exchange.role);
            }
        }
        roles
    }
}

pub const CONVERSATION_TEMPLATES: &[ConversationTemplate] = &[
    ConversationTemplate {
        name: "player_reliability",
        min_participants: 2,
        exchanges: &[
            Exchange {
                role: "skeptic",
                template: "I don't know about {player}. Feels like we're trusting a stranger with our necks.",
            },
            Exchange {
                role: "defender",
                template: "Come on, {skeptic}. {player} came through when it counted.",
            },
            Exchange {
                role: "mediator",
                template: "Enough, both of you. We watch {player} on the next job and decide then.",
            },
            Exchange {
                role: "skeptic",
                template: "Fine. But if this goes sideways, {defender}, it's on you.",
            },
        ],
    },
    ConversationTemplate {
        name: "heist_planning",
        min_participants: 2,
        exchanges: &[
            Exchange {
                role: "planner",
                template: "Here's the play. We hit {target} after midnight, in and out in ten minutes.",
            },
            Exchange {
                role: "worrier",
                template: "Ten minutes? {planner}, the last crew that tried {target} is still doing time.",
            },
            Exchange {
                role: "instigator",
                template: "Then they were amateurs. I say we go tonight.",
            },
            Exchange {
                role: "planner",
                template: "Nobody goes tonight. {player} scouts it first.",
            },
        ],
    },
    ConversationTemplate {
        name: "faction_dispute",
        min_participants: 2,
        exchanges: &[
            Exchange {
                role: "instigator",
                template: "Your people were on our turf again, {mediator}. Third time this week.",
            },
            Exchange {
                role: "mediator",
                template: "Nobody wants a war over a few streets, {instigator}.",
            },
            Exchange {
                role: "instigator",
                template: "Then keep them on your side of {territory}.",
            },
        ],
    },
    ConversationTemplate {
        name: "gossip_session",
        min_participants: 2,
        exchanges: &[
            Exchange {
                role: "gossip",
                template: "You hear what {player} pulled last night?",
            },
            Exchange {
                role: "listener",
                template: "No. Spill it, {gossip}.",
            },
            Exchange {
                role: "gossip",
                template: "Word is it went down near {place}. Keep it quiet.",
            },
        ],
    },
];

pub fn find_template(name: &str) -> Option<&'static ConversationTemplate> {
    CONVERSATION_TEMPLATES.iter().find(|t| t.name == name)
}

/// How well `record` fits `role`, before jitter. Unknown roles score 0.
pub fn role_score(role: &str, record: &PersonalityRecord) -> f64 {
    let mods = record.modifiers();
    let personality = record.current_personality();

    let fits = match role {
        "skeptic" => mods.trust() < 0.0,
        "defender" => mods.warmth() > 0.0,
        "mediator" => personality == PersonalityType::Professional,
        "instigator" => mods.aggression() > 0.0,
        "planner" => matches!(
            personality,
            PersonalityType::Charismatic | PersonalityType::Mentor
        ),
        "worrier" => personality == PersonalityType::Cautious,
        "gossip" => mods.openness() > 0.0,
        "listener" => mods.patience() > 0.0,
        _ => false,
    };

    if fits {
        ROLE_MATCH_SCORE
    } else {
        0.0
    }
}
