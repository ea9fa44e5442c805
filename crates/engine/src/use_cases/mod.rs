//! Use cases - one module per engine component.
//!
//! Each use case borrows the [`SocialState`](crate::stores::SocialState) it
//! works on and raises events onto it. Persisting and publishing happen in
//! the engine once the call returns.

pub mod breaking_point;
pub mod conversation;
pub mod dialogue;
pub mod gossip;
pub mod interrupt;
pub mod mood;
pub mod personality;

pub use breaking_point::{CheckBreakingPoint, EventContext};
pub use conversation::{ConversationContext, ConversationUseCases};
pub use dialogue::DialogueUseCases;
pub use gossip::{CrossReference, GossipExchange, GossipUseCases};
pub use interrupt::{InterruptDescriptor, InterruptMessage, InterruptUseCases};
pub use mood::{MoodController, MoodDuration};
pub use personality::PersonalityUseCases;
