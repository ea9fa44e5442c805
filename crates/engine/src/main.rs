//! NpcSocial Engine - demo session.
//!
//! Registers a small crew, plays one conversation to completion, fires a few
//! breaking points and prints the emergent lines.

use std::sync::Arc;

use npcsocial_domain::{
    AcceptContext, CrossReferenceType, InterruptContext, ModifierDelta, MoodType, NpcId,
    NpcProfile, PersonalityType, Sentiment, SocialEvent,
};
use npcsocial_engine::infrastructure::{
    clock::SystemClock, config::EngineConfig, memory::MemoryJournal, storage::FileStorage,
};
use npcsocial_engine::use_cases::{ConversationContext, EventContext, MoodDuration};
use npcsocial_engine::SocialEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "npcsocial_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_env();
    tracing::info!(
        storage_dir = %config.storage_dir.display(),
        save_key = %config.save_key,
        "Starting NpcSocial demo"
    );

    let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
    let memory = Arc::new(MemoryJournal::new(Arc::new(SystemClock::new())));
    let mut engine = SocialEngine::new(config, storage, memory.clone());

    engine.subscribe(|event: &SocialEvent| {
        if let SocialEvent::BreakingPoint { npc_id, message, .. } = event {
            println!("  * {}: {}", npc_id, message);
        }
        Ok(())
    });

    let vinnie = NpcId::new("vinnie");
    let marco = NpcId::new("marco");
    let lena = NpcId::new("lena");

    engine.register_npc(
        vinnie.clone(),
        NpcProfile::new("Vinnie")
            .with_personality(PersonalityType::Charismatic)
            .with_faction("docks")
            .with_stance("smuggling", 5)
            .with_ally("lena"),
    );
    engine.register_npc(
        marco.clone(),
        NpcProfile::new("Marco")
            .with_personality(PersonalityType::Aggressive)
            .with_faction("uptown")
            .with_rival("docks")
            .with_stance("smuggling", 1)
            .opinionated(),
    );
    engine.register_npc(
        lena.clone(),
        NpcProfile::new("Lena")
            .with_faction("docks")
            .with_ally("vinnie")
            .with_stance("smuggling", 4),
    );
    engine.apply_modifiers(&marco, &ModifierDelta::new().trust(-0.4));
    engine.apply_modifiers(&lena, &ModifierDelta::new().warmth(0.5));

    println!("== Greetings");
    for npc in [&vinnie, &marco, &lena] {
        let summary = engine.personality_summary(npc).unwrap_or_default();
        println!("  {} [{}]: {}", npc, summary, engine.greeting(npc));
    }

    println!("== Conversation");
    let context =
        ConversationContext::from([("player".to_string(), "the new kid".to_string())]);
    let participants = [marco.clone(), lena.clone(), vinnie.clone()];
    if let Some(conversation) =
        engine.start_conversation("player_reliability", &participants, &context)
    {
        for (index, message) in conversation.messages().iter().enumerate() {
            println!(
                "  (+{}ms) {}: \"{}\"",
                message.scheduled_delay_ms, message.npc_name, message.text
            );
            engine.mark_message_delivered(conversation.id(), index);
        }
    }

    println!("== Breaking points");
    engine.check_breaking_point(&lena, "saved_from_cops", &EventContext::new());
    engine.check_breaking_point(&marco, "deal_betrayed", &EventContext::new());
    engine.set_mood(&marco, MoodType::Angry, Some(0.9), MoodDuration::Default);
    for npc in [&lena, &marco] {
        println!(
            "  {} is now {}",
            npc,
            engine.personality_summary(npc).unwrap_or_default()
        );
    }
    println!("  Marco greets: {}", engine.greeting(&marco));
    println!(
        "  Lena takes a risky job: {:.0}%",
        engine.acceptance_chance(&lena, &AcceptContext::new().with_risk(0.8)) * 100.0
    );

    println!("== Interrupt");
    let topic = InterruptContext::about("smuggling").with_line("Smuggling keeps this town alive.");
    match engine.check_for_interrupt(&vinnie, &topic) {
        Some(descriptor) => {
            let line = engine.generate_interrupt(&descriptor);
            println!("  {} ({}): \"{}\"", line.npc_name, line.kind, line.message);
        }
        None => println!("  Nobody cut in."),
    }

    println!("== Gossip");
    memory.record_event(&lena, "the cops raided the warehouse", Sentiment::Negative);
    if let Some(gossip) = engine.generate_gossip(&lena, &vinnie, &ConversationContext::new()) {
        println!("{}", gossip.text);
    }
    let warning = engine.generate_cross_reference(&vinnie, &marco, CrossReferenceType::Warning);
    println!("  Vinnie: \"{}\"", warning.line);

    tracing::info!(
        history = engine.conversation_history().len(),
        registered = engine.registered_npcs().len(),
        "Demo finished"
    );
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
