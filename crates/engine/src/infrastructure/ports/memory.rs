//! NPC memory collaborator port.

use npcsocial_domain::{NpcId, NpcMemory};

/// What each NPC has witnessed. Owned elsewhere; read for gossip content,
/// written only to record that gossip was heard.
#[cfg_attr(test, mockall::automock)]
pub trait MemoryPort: Send + Sync {
    fn get_memory(&self, npc_id: &NpcId) -> NpcMemory;
    fn add_gossip(&self, target_id: &NpcId, source_id: &NpcId, description: &str);
}
