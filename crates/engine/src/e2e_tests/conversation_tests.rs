use npcsocial_domain::{ConversationStatus, DeliveryOutcome, NpcId};

use crate::infrastructure::clock::ScriptedRandom;
use crate::test_fixtures::{crew, TestEngine};
use crate::use_cases::ConversationContext;

fn player_context() -> ConversationContext {
    ConversationContext::from([("player".to_string(), "you".to_string())])
}

#[test]
fn test_reliability_roles_follow_personality() {
    // Jitter is at most just under 1.0, well below the 2.0 role score
    let mut harness = TestEngine::with_random(ScriptedRandom::constant(0.99));
    let participants = crew::reliability_pair(&mut harness.engine);

    let instance = harness
        .engine
        .start_conversation("player_reliability", &participants, &player_context())
        .expect("conversation");

    assert_eq!(instance.role("skeptic"), Some(&NpcId::new("Skeptic1")));
    assert_eq!(instance.role("defender"), Some(&NpcId::new("Defender1")));
    assert!(instance.role("mediator").is_some());

    let first = &instance.messages()[0];
    assert!(!first.text.contains('{'), "unresolved placeholder in {:?}", first.text);
    assert_eq!(first.npc_id, NpcId::new("Skeptic1"));
}

#[test]
fn test_full_delivery_completes_and_archives() {
    let mut harness = TestEngine::new();
    let participants = crew::reliability_pair(&mut harness.engine);
    let instance = harness
        .engine
        .start_conversation("player_reliability", &participants, &player_context())
        .expect("conversation");
    let id = instance.id();
    let len = instance.messages().len();

    for index in 0..len - 1 {
        let outcome = harness.engine.mark_message_delivered(id, index);
        assert!(!outcome.completed());
        assert_eq!(
            harness.engine.conversation(id).map(|c| c.status()),
            Some(ConversationStatus::Active)
        );
    }

    assert_eq!(
        harness.engine.mark_message_delivered(id, len - 1),
        DeliveryOutcome::Completed
    );
    assert!(harness.engine.active_conversations().is_empty());
    assert_eq!(harness.engine.conversation_history().len(), 1);
    assert_eq!(
        harness.engine.conversation(id).map(|c| c.status()),
        Some(ConversationStatus::Completed)
    );

    // Completed conversations reject further marks
    assert_eq!(
        harness.engine.mark_message_delivered(id, 0),
        DeliveryOutcome::UnknownConversation
    );
}

#[test]
fn test_single_participant_rejected() {
    let mut harness = TestEngine::new();
    let result = harness.engine.start_conversation(
        "gossip_session",
        &[NpcId::new("Loner")],
        &ConversationContext::new(),
    );
    assert!(result.is_none());
}

#[test]
fn test_more_roles_than_participants_all_filled() {
    let mut harness = TestEngine::new();
    let participants = vec![NpcId::new("A"), NpcId::new("B")];

    let instance = harness
        .engine
        .start_conversation("heist_planning", &participants, &ConversationContext::new())
        .expect("conversation");

    for role in ["planner", "worrier", "instigator"] {
        let assigned = instance.role(role).expect("role filled");
        assert!(participants.contains(assigned));
    }
}

#[test]
fn test_active_conversations_not_persisted() {
    let mut harness = TestEngine::new();
    let participants = crew::reliability_pair(&mut harness.engine);
    harness
        .engine
        .start_conversation("player_reliability", &participants, &player_context())
        .expect("conversation");

    let restarted = harness.restart();
    assert!(restarted.engine.active_conversations().is_empty());
    assert_eq!(restarted.engine.registered_npcs().len(), 2);
}
