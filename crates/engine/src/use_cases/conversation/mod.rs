//! Conversation use cases.
//!
//! The conversation flow is:
//! 1. Caller starts a template with a participant list (StartConversation)
//! 2. Presentation layer shows each line at its scheduled delay
//! 3. Each shown line is reported back (DeliverMessage)
//! 4. The last report completes the conversation and moves it to history

use std::sync::Arc;

mod deliver;
mod start;
mod template;

pub use deliver::DeliverMessage;
pub use start::{Pacing, StartConversation};
pub use template::{ConversationContext, TemplateVars};

/// Container for conversation use cases.
pub struct ConversationUseCases {
    pub start: Arc<StartConversation>,
    pub deliver: Arc<DeliverMessage>,
}

impl ConversationUseCases {
    pub fn new(start: Arc<StartConversation>, deliver: Arc<DeliverMessage>) -> Self {
        Self { start, deliver }
    }
}
