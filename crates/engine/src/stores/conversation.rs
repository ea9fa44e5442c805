//! Active conversations and bounded completed history.

use std::collections::VecDeque;

use npcsocial_domain::{ConversationId, ConversationInstance};

#[derive(Debug)]
pub struct ConversationStore {
    active: Vec<ConversationInstance>,
    history: VecDeque<ConversationInstance>,
    history_limit: usize,
}

impl ConversationStore {
    pub fn new(history_limit: usize) -> Self {
        Self {
            active: Vec::new(),
            history: VecDeque::new(),
            history_limit,
        }
    }

    /// Restore completed history from a snapshot, keeping the newest entries
    pub fn with_history(history_limit: usize, history: Vec<ConversationInstance>) -> Self {
        let mut store = Self::new(history_limit);
        for instance in history {
            store.push_history(instance);
        }
        store
    }

    pub fn start(&mut self, instance: ConversationInstance) {
        self.active.push(instance);
    }

    pub fn active(&self) -> &[ConversationInstance] {
        &self.active
    }

    pub fn active_mut(&mut self, id: ConversationId) -> Option<&mut ConversationInstance> {
        self.active.iter_mut().find(|c| c.id() == id)
    }

    /// Oldest first
    pub fn history(&self) -> impl Iterator<Item = &ConversationInstance> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Active first, then history
    pub fn find(&self, id: ConversationId) -> Option<&ConversationInstance> {
        self.active
            .iter()
            .find(|c| c.id() == id)
            .or_else(|| self.history.iter().find(|c| c.id() == id))
    }

    /// Move a completed conversation from the active set into history
    pub fn archive(&mut self, id: ConversationId) -> bool {
        let Some(position) = self
            .active
            .iter()
            .position(|c| c.id() == id && c.is_completed())
        else {
            return false;
        };
        let instance = self.active.remove(position);
        self.push_history(instance);
        true
    }

    fn push_history(&mut self, instance: ConversationInstance) {
        self.history.push_back(instance);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use npcsocial_domain::{ConversationMessage, NpcId};
    use std::collections::BTreeMap;

    fn one_line() -> ConversationInstance {
        let npc = NpcId::new("Sal");
        let message = ConversationMessage {
            npc_id: npc.clone(),
            npc_name: "Sal".into(),
            text: "hi".into(),
            role: "gossip".into(),
            scheduled_delay_ms: 0,
            timestamp: Utc::now(),
            delivered: false,
        };
        ConversationInstance::new(
            ConversationId::new(),
            "gossip_session",
            vec![npc],
            BTreeMap::new(),
            vec![message],
            Utc::now(),
        )
    }

    #[test]
    fn test_archive_requires_completion() {
        let mut store = ConversationStore::new(50);
        let convo = one_line();
        let id = convo.id();
        store.start(convo);

        assert!(!store.archive(id));

        store
            .active_mut(id)
            .expect("active")
            .mark_delivered(0, Utc::now());
        assert!(store.archive(id));
        assert!(store.active().is_empty());
        assert_eq!(store.history_len(), 1);
        assert!(store.find(id).is_some());
    }

    #[test]
    fn test_history_capped_oldest_dropped() {
        let mut store = ConversationStore::new(3);
        let mut ids = Vec::new();
        for _ in 0..5 {
            let convo = one_line();
            let id = convo.id();
            ids.push(id);
            store.start(convo);
            store.active_mut(id).expect("active").mark_delivered(0, Utc::now());
            store.archive(id);
        }
        assert_eq!(store.history_len(), 3);
        assert!(store.find(ids[0]).is_none());
        assert!(store.find(ids[4]).is_some());
    }
}
