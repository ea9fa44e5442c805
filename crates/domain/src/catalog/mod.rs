//! Authored content: breaking points, dialogue styles, interrupt rules,
//! conversation templates and phrase buckets
//!
//! Everything here is static data plus the pure lookups over it. Random
//! choices are made by the engine.

pub mod breaking_points;
pub mod conversations;
pub mod dialogue_styles;
pub mod interrupts;
pub mod phrases;

pub use breaking_points::{rules_for, BreakingPoint, BREAKING_POINTS};
pub use conversations::{
    find_template, role_score, ConversationTemplate, Exchange, CONVERSATION_TEMPLATES,
    ROLE_MATCH_SCORE,
};
pub use dialogue_styles::{
    authored_style, greeting_override, resolve_style, StyleSet, GREETING_MOOD_THRESHOLD,
    UNIVERSAL_STYLE,
};
pub use interrupts::{
    first_matching_rule, interrupt_phrases, render_interrupt_line, InterruptContext,
    InterruptRule, InterruptType, INTERRUPT_RULES,
};
pub use phrases::{cross_reference_phrases, gossip_phrases, CrossReferenceType, GossipPhrase};
