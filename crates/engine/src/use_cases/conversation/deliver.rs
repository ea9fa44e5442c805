//! Mark conversation messages delivered.
//!
//! Delivery of the final message is the only way a conversation completes.

use std::sync::Arc;

use npcsocial_domain::{ConversationId, DeliveryOutcome, SocialEvent};

use crate::infrastructure::ports::ClockPort;
use crate::stores::SocialState;

pub struct DeliverMessage {
    clock: Arc<dyn ClockPort>,
}

impl DeliverMessage {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }

    pub fn execute(
        &self,
        state: &mut SocialState,
        conversation_id: ConversationId,
        index: usize,
    ) -> DeliveryOutcome {
        let now = self.clock.now();
        let Some(conversation) = state.conversations.active_mut(conversation_id) else {
            tracing::debug!(
                conversation_id = %conversation_id,
                index,
                "Delivery for unknown conversation"
            );
            return DeliveryOutcome::UnknownConversation;
        };

        let outcome = conversation.mark_delivered(index, now);
        let template_name = conversation.template_name().to_string();

        match outcome {
            DeliveryOutcome::Delivered { remaining } => {
                tracing::trace!(
                    conversation_id = %conversation_id,
                    index,
                    remaining,
                    "Message delivered"
                );
                state.touch();
            }
            DeliveryOutcome::Completed => {
                state.conversations.archive(conversation_id);
                tracing::info!(
                    conversation_id = %conversation_id,
                    template = %template_name,
                    "Conversation completed"
                );
                state.raise(SocialEvent::ConversationEnded {
                    conversation_id,
                    template_name,
                });
            }
            DeliveryOutcome::MessageNotFound { len, .. } => {
                tracing::warn!(
                    conversation_id = %conversation_id,
                    index,
                    len,
                    "Message index out of range"
                );
            }
            DeliveryOutcome::UnknownConversation | DeliveryOutcome::AlreadyCompleted => {}
        }
        outcome
    }
}
