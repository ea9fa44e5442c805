//! Conversation mutation outcomes

/// Outcome of marking one conversation message as shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// No active conversation with that id
    UnknownConversation,
    /// Index past the end of the message list
    MessageNotFound { index: usize, len: usize },
    /// Conversation already finished; nothing changes
    AlreadyCompleted,
    /// Marked; `remaining` messages still undelivered
    Delivered { remaining: usize },
    /// This mark was the last one; the conversation is now completed
    Completed,
}

impl DeliveryOutcome {
    pub fn completed(&self) -> bool {
        matches!(self, DeliveryOutcome::Completed)
    }
}
