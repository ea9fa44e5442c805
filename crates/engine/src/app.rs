//! Engine state and composition.

use std::collections::BTreeSet;
use std::sync::Arc;

use npcsocial_domain::{
    AcceptContext, BreakingPointOutcome, ConversationId, ConversationInstance, CrossReferenceType,
    DeliveryOutcome, EvolutionLog, InterruptContext, ModifierDelta, MoodState, MoodType, NpcId,
    NpcProfile, PersonalityRecord, PersonalityShift, PersonalityType, RelationshipStage,
    SocialEvent, StageTransition, StyleSet,
};

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::EngineConfig,
    event_bus::{EventBus, ListenerId},
    persistence::Persistence,
    ports::{ClockPort, ListenerError, MemoryPort, RandomPort, StoragePort},
};
use crate::stores::SocialState;
use crate::use_cases::{
    self,
    conversation::{DeliverMessage, Pacing, StartConversation},
    ConversationContext, CrossReference, EventContext, GossipExchange, InterruptDescriptor,
    InterruptMessage, MoodDuration,
};

/// Container for all use cases.
pub struct UseCases {
    pub personality: use_cases::PersonalityUseCases,
    pub mood: use_cases::MoodController,
    pub breaking_point: use_cases::CheckBreakingPoint,
    pub dialogue: use_cases::DialogueUseCases,
    pub interrupt: use_cases::InterruptUseCases,
    pub conversation: use_cases::ConversationUseCases,
    pub gossip: use_cases::GossipUseCases,
}

impl UseCases {
    fn new(
        config: &EngineConfig,
        memory: Arc<dyn MemoryPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let conversation = use_cases::ConversationUseCases::new(
            Arc::new(StartConversation::new(
                clock.clone(),
                random.clone(),
                Pacing {
                    spacing_ms: config.message_spacing_ms,
                    jitter_ms: config.message_jitter_ms,
                },
                config.filler_word.clone(),
            )),
            Arc::new(DeliverMessage::new(clock.clone())),
        );

        Self {
            personality: use_cases::PersonalityUseCases::new(clock.clone()),
            mood: use_cases::MoodController::new(
                clock.clone(),
                config.default_mood_intensity,
                config.default_mood_duration(),
            ),
            breaking_point: use_cases::CheckBreakingPoint::new(clock.clone()),
            dialogue: use_cases::DialogueUseCases::new(
                clock.clone(),
                random.clone(),
                config.acceptance_bounds,
            ),
            interrupt: use_cases::InterruptUseCases::new(clock, random.clone()),
            conversation,
            gossip: use_cases::GossipUseCases::new(memory, random),
        }
    }
}

/// One game session's social simulation.
///
/// Owns every personality record and conversation. Each mutating call
/// persists the whole state (when anything changed) and then notifies
/// subscribers, in that order.
pub struct SocialEngine {
    config: EngineConfig,
    state: SocialState,
    persistence: Persistence,
    bus: EventBus,
    use_cases: UseCases,
    loaded: bool,
}

impl SocialEngine {
    /// Engine on the system clock and thread RNG, loaded from `storage`
    pub fn new(
        config: EngineConfig,
        storage: Arc<dyn StoragePort>,
        memory: Arc<dyn MemoryPort>,
    ) -> Self {
        Self::with_ports(
            config,
            storage,
            memory,
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
        )
    }

    pub fn with_ports(
        config: EngineConfig,
        storage: Arc<dyn StoragePort>,
        memory: Arc<dyn MemoryPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let persistence = Persistence::new(storage, config.save_key.clone(), config.history_limit);
        let use_cases = UseCases::new(&config, memory, clock, random);
        let mut engine = Self {
            state: SocialState::new(config.history_limit),
            config,
            persistence,
            bus: EventBus::new(),
            use_cases,
            loaded: false,
        };
        engine.load();
        engine
    }

    /// Read the save blob. Only the first call does anything.
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        let save = self.persistence.load();
        self.state = SocialState::from_save(save, self.config.history_limit);
        self.loaded = true;
        tracing::info!(
            key = %self.persistence.key(),
            npcs = self.state.personalities.len(),
            "Social engine loaded"
        );
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Persist if anything changed, then publish raised events
    fn commit(&mut self) {
        let (dirty, events) = self.state.take_changes();
        if dirty {
            self.persistence.save(&self.state.to_save());
        }
        for event in &events {
            self.bus.publish(event);
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&SocialEvent) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    // =========================================================================
    // Personality
    // =========================================================================

    pub fn register_npc(&mut self, npc_id: impl Into<NpcId>, profile: NpcProfile) {
        let npc_id = npc_id.into();
        self.use_cases
            .personality
            .register(&mut self.state, &npc_id, profile);
        self.commit();
    }

    /// Only active registered NPCs can interrupt
    pub fn set_active(&mut self, npc_id: &NpcId, active: bool) -> bool {
        let changed = self
            .use_cases
            .personality
            .set_active(&mut self.state, npc_id, active);
        self.commit();
        changed
    }

    /// The NPC's record, created with defaults if it does not exist yet
    pub fn personality(&mut self, npc_id: &NpcId) -> &PersonalityRecord {
        self.use_cases.personality.get(&mut self.state, npc_id);
        self.commit();
        self.state.personalities.get_or_create(npc_id).0
    }

    pub fn set_base_archetype(&mut self, npc_id: &NpcId, archetype: PersonalityType) {
        self.use_cases
            .personality
            .set_base_archetype(&mut self.state, npc_id, archetype);
        self.commit();
    }

    pub fn set_stage(&mut self, npc_id: &NpcId, stage: RelationshipStage) -> StageTransition {
        let transition = self
            .use_cases
            .personality
            .set_stage(&mut self.state, npc_id, stage);
        self.commit();
        transition
    }

    pub fn apply_modifiers(
        &mut self,
        npc_id: &NpcId,
        delta: &ModifierDelta,
    ) -> Option<PersonalityShift> {
        let shift = self
            .use_cases
            .personality
            .apply_modifiers(&mut self.state, npc_id, delta);
        self.commit();
        shift
    }

    // =========================================================================
    // Mood
    // =========================================================================

    /// Set a mood; `None` intensity uses the configured default
    pub fn set_mood(
        &mut self,
        npc_id: &NpcId,
        mood: MoodType,
        intensity: Option<f32>,
        duration: MoodDuration,
    ) -> MoodState {
        let state = self
            .use_cases
            .mood
            .set_mood(&mut self.state, npc_id, mood, intensity, duration);
        self.commit();
        state
    }

    pub fn get_mood(&mut self, npc_id: &NpcId) -> MoodState {
        let mood = self.use_cases.mood.get_mood(&mut self.state, npc_id);
        self.commit();
        mood
    }

    pub fn clear_mood(&mut self, npc_id: &NpcId) {
        self.use_cases.mood.clear_mood(&mut self.state, npc_id);
        self.commit();
    }

    // =========================================================================
    // Breaking points
    // =========================================================================

    pub fn check_breaking_point(
        &mut self,
        npc_id: &NpcId,
        event_type: &str,
        context: &EventContext,
    ) -> BreakingPointOutcome {
        let outcome =
            self.use_cases
                .breaking_point
                .execute(&mut self.state, npc_id, event_type, context);
        self.commit();
        outcome
    }

    // =========================================================================
    // Dialogue
    // =========================================================================

    pub fn dialogue_style(&mut self, npc_id: &NpcId) -> &'static StyleSet {
        let style = self.use_cases.dialogue.style(&mut self.state, npc_id);
        self.commit();
        style
    }

    pub fn greeting(&mut self, npc_id: &NpcId) -> String {
        let greeting = self.use_cases.dialogue.greeting(&mut self.state, npc_id);
        self.commit();
        greeting
    }

    pub fn acceptance_chance(&mut self, npc_id: &NpcId, context: &AcceptContext) -> f32 {
        let chance = self
            .use_cases
            .dialogue
            .acceptance_chance(&mut self.state, npc_id, context);
        self.commit();
        chance
    }

    pub fn would_accept(&mut self, npc_id: &NpcId, context: &AcceptContext) -> bool {
        let accepted = self
            .use_cases
            .dialogue
            .would_accept(&mut self.state, npc_id, context);
        self.commit();
        accepted
    }

    // =========================================================================
    // Interrupts
    // =========================================================================

    pub fn check_for_interrupt(
        &self,
        speaker: &NpcId,
        context: &InterruptContext,
    ) -> Option<InterruptDescriptor> {
        self.use_cases.interrupt.check(&self.state, speaker, context)
    }

    pub fn generate_interrupt(&self, descriptor: &InterruptDescriptor) -> InterruptMessage {
        self.use_cases.interrupt.generate(&self.state, descriptor)
    }

    // =========================================================================
    // Conversations
    // =========================================================================

    pub fn start_conversation(
        &mut self,
        template_name: &str,
        participants: &[NpcId],
        context: &ConversationContext,
    ) -> Option<ConversationInstance> {
        let instance = self.use_cases.conversation.start.execute(
            &mut self.state,
            template_name,
            participants,
            context,
        );
        self.commit();
        instance
    }

    pub fn mark_message_delivered(
        &mut self,
        conversation_id: ConversationId,
        index: usize,
    ) -> DeliveryOutcome {
        let outcome =
            self.use_cases
                .conversation
                .deliver
                .execute(&mut self.state, conversation_id, index);
        self.commit();
        outcome
    }

    // =========================================================================
    // Gossip
    // =========================================================================

    pub fn generate_gossip(
        &self,
        source_id: &NpcId,
        target_id: &NpcId,
        context: &ConversationContext,
    ) -> Option<GossipExchange> {
        self.use_cases
            .gossip
            .generate_gossip(&self.state, source_id, target_id, context)
    }

    pub fn generate_cross_reference(
        &self,
        speaker_id: &NpcId,
        referenced_id: &NpcId,
        kind: CrossReferenceType,
    ) -> CrossReference {
        self.use_cases
            .gossip
            .generate_cross_reference(&self.state, speaker_id, referenced_id, kind)
    }

    // =========================================================================
    // Lifecycle and queries
    // =========================================================================

    /// Drop every record, conversation and history entry
    pub fn reset(&mut self) {
        self.state.clear();
        self.state.raise(SocialEvent::StateReset);
        tracing::info!("Social state reset");
        self.commit();
    }

    pub fn personality_summary(&self, npc_id: &NpcId) -> Option<String> {
        self.state.personalities.get(npc_id).map(|r| r.summary())
    }

    pub fn evolution_log(&self, npc_id: &NpcId) -> Option<&EvolutionLog> {
        self.state.personalities.get(npc_id).map(|r| r.evolution_log())
    }

    pub fn traits(&self, npc_id: &NpcId) -> Option<&BTreeSet<String>> {
        self.state.personalities.get(npc_id).map(|r| r.traits())
    }

    pub fn active_conversations(&self) -> &[ConversationInstance] {
        self.state.conversations.active()
    }

    /// Active or completed conversation by id
    pub fn conversation(&self, id: ConversationId) -> Option<&ConversationInstance> {
        self.state.conversations.find(id)
    }

    /// Completed conversations, oldest first
    pub fn conversation_history(&self) -> Vec<&ConversationInstance> {
        self.state.conversations.history().collect()
    }

    /// Registered NPCs in registration order
    pub fn registered_npcs(&self) -> &[NpcId] {
        self.state.personalities.registration_order()
    }
}
