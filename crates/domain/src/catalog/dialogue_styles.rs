//! Authored dialogue styles keyed by (personality, stage)
//!
//! The table is sparse. [`resolve_style`] walks a fixed fallback chain so a
//! caller always gets a style back.

use crate::value_objects::{MoodState, MoodType, PersonalityType, RelationshipStage};

/// Lines an NPC draws from when speaking alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSet {
    pub greetings: &'static [&'static str],
    pub affirmative: &'static [&'static str],
    pub negative: &'static [&'static str],
    pub tone: &'static str,
}

/// Mood intensity above which Angry or Happy overrides the greeting
pub const GREETING_MOOD_THRESHOLD: f32 = 0.7;

pub const ANGRY_GREETING: &str = "What do you want?";
pub const HAPPY_GREETING: &str = "Hey! Good to see you, really!";
pub const BETRAYED_GREETING: &str = "...";

pub static UNIVERSAL_STYLE: StyleSet = StyleSet {
    greetings: &["Hey.", "What's up?", "Yeah?"],
    affirmative: &["Sure.", "Okay.", "Fine."],
    negative: &["No.", "Not happening.", "Pass."],
    tone: "neutral",
};

static PROFESSIONAL_STRANGER: StyleSet = StyleSet {
    greetings: &["Can I help you?", "You have business with me?"],
    affirmative: &["That can be arranged.", "Agreed."],
    negative: &["I don't think so.", "That doesn't work for me."],
    tone: "measured",
};

static PROFESSIONAL_BUSINESS: StyleSet = StyleSet {
    greetings: &["Good timing. Let's talk numbers.", "You're here about the job?"],
    affirmative: &["Deal.", "The terms work."],
    negative: &["The numbers don't add up.", "Not at that price."],
    tone: "businesslike",
};

static FRIENDLY_STRANGER: StyleSet = StyleSet {
    greetings: &["Hey there! New around here?", "Hi! Haven't seen you before."],
    affirmative: &["Sure, why not!", "Sounds good to me."],
    negative: &["Ah, sorry, I can't.", "Maybe another time?"],
    tone: "warm",
};

static FRIENDLY_FRIEND: StyleSet = StyleSet {
    greetings: &["There you are!", "Hey, pal! Pull up a chair."],
    affirmative: &["For you? Absolutely.", "You know I'm in."],
    negative: &["I'd love to, but no.", "Can't this time, friend."],
    tone: "warm",
};

static FRIENDLY_TRUSTED: StyleSet = StyleSet {
    greetings: &["Family! Come in.", "Whatever you need, just say it."],
    affirmative: &["Consider it done.", "Say no more."],
    negative: &["Even for you, I can't do that one."],
    tone: "devoted",
};

static AGGRESSIVE_STRANGER: StyleSet = StyleSet {
    greetings: &["You lost?", "Walk away while you can."],
    affirmative: &["Fine. Don't screw it up.", "Yeah, whatever."],
    negative: &["Get out of my face.", "Not a chance."],
    tone: "hostile",
};

static AGGRESSIVE_ENEMY: StyleSet = StyleSet {
    greetings: &["You've got some nerve showing up here.", "Last mistake you'll make."],
    affirmative: &["Sure. And I'll be watching."],
    negative: &["Over my dead body.", "You'll get nothing from me."],
    tone: "threatening",
};

static CAUTIOUS_STRANGER: StyleSet = StyleSet {
    greetings: &["Who sent you?", "Do I know you?"],
    affirmative: &["Alright, but carefully.", "If you're sure it's safe."],
    negative: &["Too risky.", "I'd rather not."],
    tone: "guarded",
};

static CHARISMATIC_STRANGER: StyleSet = StyleSet {
    greetings: &["Well, well. A new face!", "You look like someone worth knowing."],
    affirmative: &["Now we're talking!", "I like the way you think."],
    negative: &["Ah, I'll have to pass, darling.", "Not today, but ask me again."],
    tone: "charming",
};

static COLD_STRANGER: StyleSet = StyleSet {
    greetings: &["State your business.", "Make it quick."],
    affirmative: &["Acceptable.", "Fine."],
    negative: &["No.", "Denied."],
    tone: "cold",
};

static LOYAL_STRANGER: StyleSet = StyleSet {
    greetings: &["Friend of the crew?", "Depends who's asking."],
    affirmative: &["If the boss says so.", "I'll back that."],
    negative: &["Not without the crew's say.", "That's not how we do things."],
    tone: "steady",
};

static LOYAL_TRUSTED: StyleSet = StyleSet {
    greetings: &["I've got your back. Always.", "Whatever happens, I'm with you."],
    affirmative: &["To the end.", "Count me in."],
    negative: &["I'd follow you anywhere, but not there."],
    tone: "devoted",
};

static OPPORTUNISTIC_BUSINESS: StyleSet = StyleSet {
    greetings: &["What's in it for me this time?", "Got an angle for me?"],
    affirmative: &["For the right cut, sure.", "Now that's a profit."],
    negative: &["Not worth my time.", "Find another sucker."],
    tone: "calculating",
};

static MENTOR_STRANGER: StyleSet = StyleSet {
    greetings: &["Sit down, kid. Let's see what you know.", "Eager, aren't you?"],
    affirmative: &["Good. You're learning.", "That's the right call."],
    negative: &["Think it through first.", "You're not ready for that."],
    tone: "patient",
};

/// Exact lookup; `None` when the combination was never authored
pub fn authored_style(
    personality: PersonalityType,
    stage: RelationshipStage,
) -> Option<&'static StyleSet> {
    use PersonalityType as P;
    use RelationshipStage as S;

    let style = match (personality, stage) {
        (P::Professional, S::Stranger) => &PROFESSIONAL_STRANGER,
        (P::Professional, S::Business) => &PROFESSIONAL_BUSINESS,
        (P::Friendly, S::Stranger) => &FRIENDLY_STRANGER,
        (P::Friendly, S::Friend) => &FRIENDLY_FRIEND,
        (P::Friendly, S::Trusted) => &FRIENDLY_TRUSTED,
        (P::Aggressive, S::Stranger) => &AGGRESSIVE_STRANGER,
        (P::Aggressive, S::Enemy) => &AGGRESSIVE_ENEMY,
        (P::Cautious, S::Stranger) => &CAUTIOUS_STRANGER,
        (P::Charismatic, S::Stranger) => &CHARISMATIC_STRANGER,
        (P::Cold, S::Stranger) => &COLD_STRANGER,
        (P::Loyal, S::Stranger) => &LOYAL_STRANGER,
        (P::Loyal, S::Trusted) => &LOYAL_TRUSTED,
        (P::Opportunistic, S::Business) => &OPPORTUNISTIC_BUSINESS,
        (P::Mentor, S::Stranger) => &MENTOR_STRANGER,
        _ => return None,
    };
    Some(style)
}

/// Resolve with fallback: current×stage, current×Stranger, base×stage,
/// base×Stranger, then [`UNIVERSAL_STYLE`].
pub fn resolve_style(
    current: PersonalityType,
    base: PersonalityType,
    stage: RelationshipStage,
) -> &'static StyleSet {
    let attempts = [
        (current, stage),
        (current, RelationshipStage::Stranger),
        (base, stage),
        (base, RelationshipStage::Stranger),
    ];
    attempts
        .into_iter()
        .find_map(|(personality, stage)| authored_style(personality, stage))
        .unwrap_or(&UNIVERSAL_STYLE)
}

/// Greeting forced by mood, bypassing the style set
pub fn greeting_override(mood: &MoodState) -> Option<&'static str> {
    match mood.current {
        MoodType::Betrayed => Some(BETRAYED_GREETING),
        MoodType::Angry if mood.intensity > GREETING_MOOD_THRESHOLD => Some(ANGRY_GREETING),
        MoodType::Happy if mood.intensity > GREETING_MOOD_THRESHOLD => Some(HAPPY_GREETING),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_wins() {
        let style = resolve_style(
            PersonalityType::Friendly,
            PersonalityType::Professional,
            RelationshipStage::Friend,
        );
        assert_eq!(style, &FRIENDLY_FRIEND);
    }

    #[test]
    fn test_falls_back_to_current_stranger() {
        let style = resolve_style(
            PersonalityType::Cautious,
            PersonalityType::Professional,
            RelationshipStage::Business,
        );
        assert_eq!(style, &CAUTIOUS_STRANGER);
    }

    #[test]
    fn test_falls_back_to_base_stage_before_base_stranger() {
        let style = resolve_style(
            PersonalityType::Unpredictable,
            PersonalityType::Professional,
            RelationshipStage::Business,
        );
        assert_eq!(style, &PROFESSIONAL_BUSINESS);

        let style = resolve_style(
            PersonalityType::Unpredictable,
            PersonalityType::Mentor,
            RelationshipStage::Trusted,
        );
        assert_eq!(style, &MENTOR_STRANGER);
    }

    #[test]
    fn test_every_combination_resolves() {
        for current in PersonalityType::all() {
            for base in PersonalityType::all() {
                for stage in RelationshipStage::all() {
                    let style = resolve_style(*current, *base, *stage);
                    assert!(!style.greetings.is_empty());
                    assert!(!style.affirmative.is_empty());
                    assert!(!style.negative.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_universal_default_when_nothing_authored() {
        let style = resolve_style(
            PersonalityType::Unpredictable,
            PersonalityType::Unpredictable,
            RelationshipStage::Friend,
        );
        assert_eq!(style, &UNIVERSAL_STYLE);
    }

    #[test]
    fn test_greeting_overrides() {
        let angry = MoodState {
            current: MoodType::Angry,
            intensity: 0.8,
            expires_at: None,
        };
        assert_eq!(greeting_override(&angry), Some(ANGRY_GREETING));

        let mild = MoodState {
            intensity: 0.7,
            ..angry
        };
        assert_eq!(greeting_override(&mild), None);

        let betrayed = MoodState {
            current: MoodType::Betrayed,
            intensity: 0.1,
            expires_at: None,
        };
        assert_eq!(greeting_override(&betrayed), Some("..."));
        assert_eq!(greeting_override(&MoodState::neutral()), None);
    }
}
