//! Integration test: encounter lifecycle
//!
//! Drives the engine end to end through a recording transport: spawn, react,
//! resolve, and the rejections in between.

use std::sync::Arc;

use brinebot::engine::{Engine, EventOutcome, Resolution};
use brinebot::error::BotError;
use brinebot::ledger::{Ledger, MemoryStore};
use brinebot::rewards::testing::ScriptedRng;
use brinebot::rewards::{ActionKind, DropOutcome, EncounterKind};
use brinebot::transport::{MessageReceived, ReactionEvent, RecordingTransport, TransportEvent};
use brinebot::GameConfig;

const BOT: &str = "bot";
const CHANNEL: &str = "general";

/// Draws for a spawn hit that yields a Major encounter.
const MAJOR_SPAWN: [f64; 3] = [0.0, 0.95, 0.0];
/// Draws for a spawn hit that yields the first Minor name.
const MINOR_SPAWN: [f64; 3] = [0.0, 0.5, 0.0];

struct Harness {
    engine: Engine,
    transport: Arc<RecordingTransport>,
    store: Arc<MemoryStore>,
}

fn harness(balances: &[(&str, i64)], draws: impl IntoIterator<Item = f64>) -> Harness {
    harness_with(GameConfig::default(), balances, draws)
}

fn harness_with(
    config: GameConfig,
    balances: &[(&str, i64)],
    draws: impl IntoIterator<Item = f64>,
) -> Harness {
    let store = Arc::new(MemoryStore::with_entries(
        balances.iter().map(|(u, b)| (u.to_string(), *b)),
    ));
    let transport = Arc::new(RecordingTransport::new());
    let engine = Engine::new(
        config,
        Ledger::open(Arc::clone(&store)),
        transport.clone(),
        BOT,
    )
    .with_rng(ScriptedRng::new(draws));
    Harness {
        engine,
        transport,
        store,
    }
}

fn say(author: &str, text: &str) -> TransportEvent {
    TransportEvent::MessageReceived(MessageReceived {
        author_id: author.to_string(),
        author_is_bot: false,
        channel_id: CHANNEL.to_string(),
        text: text.to_string(),
    })
}

fn react(message_id: &str, user: &str, emoji: &str) -> TransportEvent {
    TransportEvent::ReactionAdded(ReactionEvent {
        message_id: message_id.to_string(),
        user_id: user.to_string(),
        emoji: emoji.to_string(),
    })
}

fn emoji(h: &Harness, action: ActionKind) -> String {
    h.engine.config().actions.spec(action).emoji.clone()
}

async fn spawn(h: &Harness, author: &str) -> String {
    match h.engine.handle_event(say(author, "hello there")).await {
        Ok(EventOutcome::Spawned(encounter)) => encounter.id,
        other => panic!("expected a spawn, got {other:?}"),
    }
}

async fn resolve(h: &Harness, message_id: &str, user: &str, action: ActionKind) -> Resolution {
    match h
        .engine
        .handle_event(react(message_id, user, &emoji(h, action)))
        .await
    {
        Ok(EventOutcome::Resolution(resolution)) => resolution,
        other => panic!("expected a resolution, got {other:?}"),
    }
}

#[tokio::test]
async fn test_major_encounter_basic_attack_without_drop() {
    let h = harness(&[], MAJOR_SPAWN.into_iter().chain([0.5]));
    let id = spawn(&h, "alice").await;

    let encounter = h.engine.encounter(&id).expect("encounter open");
    assert_eq!(encounter.kind, EncounterKind::Major);
    assert_eq!(encounter.name, "Brine King");
    assert_eq!(encounter.initiator_id, "alice");

    let resolution = resolve(&h, &id, "alice", ActionKind::Basic).await;
    assert_eq!(
        resolution,
        Resolution::Resolved {
            action: ActionKind::Basic,
            drop: DropOutcome::Nothing,
            balance: 0,
        }
    );
    assert_eq!(h.engine.ledger().get("alice"), 0);
    assert!(h.engine.encounter(&id).is_none());
    assert!(h
        .transport
        .last_text()
        .unwrap()
        .contains("you fought bravely but found no"));

    // A second attack on the same encounter is turned away.
    let again = resolve(&h, &id, "alice", ActionKind::Basic).await;
    assert_eq!(again, Resolution::AlreadyReacted);
    assert!(h
        .transport
        .last_text()
        .unwrap()
        .contains("you have already reacted"));
    assert_eq!(h.store.writes(), 0);
}

#[tokio::test]
async fn test_spawn_posts_prompt_and_seeds_reactions() {
    let h = harness(&[], MAJOR_SPAWN);
    let id = spawn(&h, "alice").await;

    let sent = h.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id, id);
    assert_eq!(sent[0].channel_id, CHANNEL);
    assert!(sent[0].text.starts_with("<@alice>, you encounter Brine King!"));

    let seeded: Vec<String> = h.transport.reactions().into_iter().map(|r| r.emoji).collect();
    assert_eq!(
        seeded,
        vec![
            emoji(&h, ActionKind::Basic),
            emoji(&h, ActionKind::Strong),
            emoji(&h, ActionKind::Ultimate),
        ]
    );
}

#[tokio::test]
async fn test_minor_prompt_offers_only_basic_attack() {
    let h = harness(&[], MINOR_SPAWN);
    let id = spawn(&h, "alice").await;

    let encounter = h.engine.encounter(&id).unwrap();
    assert_eq!(encounter.kind, EncounterKind::Minor);
    assert_eq!(encounter.name, "Rhoa");

    let prompt = h.transport.sent()[0].text.clone();
    assert_eq!(prompt, "<@alice>, you encounter a Rhoa! React with ⚔️ to attack.");
}

#[tokio::test]
async fn test_spawn_miss_posts_nothing() {
    let h = harness(&[], [0.5]);
    let outcome = h.engine.handle_event(say("alice", "hello")).await.unwrap();
    assert_eq!(outcome, EventOutcome::NoSpawn);
    assert!(h.transport.sent().is_empty());
    assert_eq!(h.engine.open_encounters(), 0);
}

#[tokio::test]
async fn test_bot_messages_are_ignored() {
    let h = harness(&[], MAJOR_SPAWN);
    let outcome = h.engine.handle_event(say(BOT, "beep")).await.unwrap();
    assert_eq!(outcome, EventOutcome::Ignored);

    let other_bot = TransportEvent::MessageReceived(MessageReceived {
        author_id: "another-bot".to_string(),
        author_is_bot: true,
        channel_id: CHANNEL.to_string(),
        text: "beep".to_string(),
    });
    assert_eq!(h.engine.handle_event(other_bot).await.unwrap(), EventOutcome::Ignored);
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_failed_prompt_leaves_no_encounter() {
    let h = harness(&[], MAJOR_SPAWN);
    h.transport.set_fail_sends(true);

    let result = h.engine.handle_event(say("alice", "hello")).await;
    assert!(matches!(result, Err(BotError::Transport(_))));
    assert_eq!(h.engine.open_encounters(), 0);
    assert!(h.transport.reactions().is_empty());
}

#[tokio::test]
async fn test_ultimate_with_empty_stash_is_refused() {
    let h = harness(&[], MAJOR_SPAWN);
    let id = spawn(&h, "alice").await;

    let resolution = resolve(&h, &id, "alice", ActionKind::Ultimate).await;
    assert_eq!(
        resolution,
        Resolution::InsufficientFunds {
            cost: 5,
            balance: 0,
        }
    );
    assert_eq!(h.engine.ledger().get("alice"), 0);
    assert!(h.engine.encounter(&id).is_some());
    assert!(h
        .transport
        .last_text()
        .unwrap()
        .contains("you don't have enough"));
    assert_eq!(h.store.writes(), 0);
}

#[tokio::test]
async fn test_costed_actions_need_the_full_cost() {
    let h = harness(&[("alice", 4)], MAJOR_SPAWN);
    let id = spawn(&h, "alice").await;

    let ultimate = resolve(&h, &id, "alice", ActionKind::Ultimate).await;
    assert_eq!(
        ultimate,
        Resolution::InsufficientFunds {
            cost: 5,
            balance: 4,
        }
    );
    assert_eq!(h.engine.ledger().get("alice"), 4);

    // Strong costs 1: affordable, nothing drops with the script exhausted.
    let strong = resolve(&h, &id, "alice", ActionKind::Strong).await;
    assert_eq!(
        strong,
        Resolution::Resolved {
            action: ActionKind::Strong,
            drop: DropOutcome::Nothing,
            balance: 3,
        }
    );
    assert_eq!(h.engine.ledger().get("alice"), 3);
}

#[tokio::test]
async fn test_strong_attack_jackpot() {
    let h = harness(&[("alice", 10)], MAJOR_SPAWN.into_iter().chain([0.0]));
    let id = spawn(&h, "alice").await;

    let resolution = resolve(&h, &id, "alice", ActionKind::Strong).await;
    assert_eq!(
        resolution,
        Resolution::Resolved {
            action: ActionKind::Strong,
            drop: DropOutcome::Jackpot { amount: 500 },
            balance: 509,
        }
    );
    assert_eq!(h.engine.ledger().get("alice"), 509);

    let text = h.transport.last_text().unwrap();
    assert!(text.contains("wowee that's a big boy"));
    assert!(text.contains("509"));
}

#[tokio::test]
async fn test_basic_attack_single_and_stack_drops() {
    // Two encounters: a single drop, then a stack of 3.
    let draws = MINOR_SPAWN
        .into_iter()
        .chain([0.05, 0.5])
        .chain(MINOR_SPAWN)
        .chain([0.05, 0.005, 0.45]);
    let h = harness(&[], draws);

    let first = spawn(&h, "alice").await;
    let single = resolve(&h, &first, "alice", ActionKind::Basic).await;
    assert_eq!(
        single,
        Resolution::Resolved {
            action: ActionKind::Basic,
            drop: DropOutcome::Single { amount: 1 },
            balance: 1,
        }
    );

    let second = spawn(&h, "alice").await;
    let stack = resolve(&h, &second, "alice", ActionKind::Basic).await;
    assert_eq!(
        stack,
        Resolution::Resolved {
            action: ActionKind::Basic,
            drop: DropOutcome::Stack { size: 3, amount: 3 },
            balance: 4,
        }
    );
    assert!(h.transport.last_text().unwrap().contains("a stack of 3"));
}

#[tokio::test]
async fn test_only_initiator_may_act() {
    let h = harness(&[("bob", 100)], MAJOR_SPAWN.into_iter().chain([0.0]));
    let id = spawn(&h, "alice").await;

    let resolution = resolve(&h, &id, "bob", ActionKind::Strong).await;
    assert_eq!(resolution, Resolution::NotInitiator);
    assert_eq!(h.engine.ledger().get("bob"), 100);
    assert_eq!(h.store.writes(), 0);

    let encounter = h.engine.encounter(&id).unwrap();
    assert!(encounter.participants.is_empty());
    assert!(h
        .transport
        .last_text()
        .unwrap()
        .contains("only the person who started the encounter"));
}

#[tokio::test]
async fn test_refused_action_can_be_retried() {
    let h = harness(&[], MAJOR_SPAWN.into_iter().chain([0.05, 0.5]));
    let id = spawn(&h, "alice").await;

    let refused = resolve(&h, &id, "alice", ActionKind::Strong).await;
    assert!(matches!(refused, Resolution::InsufficientFunds { .. }));

    let resolved = resolve(&h, &id, "alice", ActionKind::Basic).await;
    assert_eq!(
        resolved,
        Resolution::Resolved {
            action: ActionKind::Basic,
            drop: DropOutcome::Single { amount: 1 },
            balance: 1,
        }
    );
}

#[tokio::test]
async fn test_irrelevant_reactions_are_ignored() {
    let h = harness(&[], MAJOR_SPAWN);
    let id = spawn(&h, "alice").await;
    h.transport.clear();

    let cases = [
        react(&id, "alice", "🎉"),
        react(&id, BOT, "⚔️"),
        react("not-an-encounter", "alice", "⚔️"),
    ];
    for event in cases {
        let outcome = h.engine.handle_event(event).await.unwrap();
        assert_eq!(outcome, EventOutcome::Resolution(Resolution::Ignored));
    }

    let removed = TransportEvent::ReactionRemoved(ReactionEvent {
        message_id: id.clone(),
        user_id: "alice".to_string(),
        emoji: "⚔️".to_string(),
    });
    assert_eq!(h.engine.handle_event(removed).await.unwrap(), EventOutcome::Ignored);

    assert!(h.transport.sent().is_empty());
    assert!(h.engine.encounter(&id).is_some());
}

#[tokio::test]
async fn test_emoji_without_variation_selector_is_accepted() {
    let h = harness(&[], MAJOR_SPAWN.into_iter().chain([0.5]));
    let id = spawn(&h, "alice").await;

    let outcome = h.engine.handle_event(react(&id, "alice", "⚔")).await.unwrap();
    assert!(matches!(
        outcome,
        EventOutcome::Resolution(Resolution::Resolved {
            action: ActionKind::Basic,
            ..
        })
    ));
}

#[tokio::test]
async fn test_failed_debit_keeps_encounter_open() {
    let h = harness(&[("alice", 10)], MAJOR_SPAWN);
    let id = spawn(&h, "alice").await;

    h.store.set_fail_writes(true);
    let result = h
        .engine
        .handle_event(react(&id, "alice", &emoji(&h, ActionKind::Strong)))
        .await;
    assert!(matches!(result, Err(BotError::Ledger(_))));
    assert_eq!(h.engine.ledger().get("alice"), 10);
    assert!(h.transport.last_text().unwrap().contains("Nothing was spent"));

    let encounter = h.engine.encounter(&id).unwrap();
    assert!(!encounter.participants.contains("alice"));

    h.store.set_fail_writes(false);
    let retry = resolve(&h, &id, "alice", ActionKind::Strong).await;
    assert!(matches!(retry, Resolution::Resolved { balance: 9, .. }));
}

#[tokio::test]
async fn test_failed_reward_write_charges_nothing() {
    // Strong attack: jackpot miss, drop hit, no stack. Then the same again.
    let draws = MAJOR_SPAWN
        .into_iter()
        .chain([0.5, 0.05, 0.5])
        .chain([0.5, 0.05, 0.5]);
    let h = harness(&[("alice", 10)], draws);
    let id = spawn(&h, "alice").await;

    h.store.set_fail_writes(true);
    let result = h
        .engine
        .handle_event(react(&id, "alice", &emoji(&h, ActionKind::Strong)))
        .await;
    assert!(matches!(result, Err(BotError::Ledger(_))));
    assert_eq!(h.engine.ledger().get("alice"), 10);
    assert_eq!(h.store.snapshot(), vec![("alice".to_string(), 10)]);
    assert!(h.transport.last_text().unwrap().contains("Nothing was spent or won"));

    let encounter = h.engine.encounter(&id).expect("encounter stays open");
    assert!(!encounter.participants.contains("alice"));

    h.store.set_fail_writes(false);
    let retry = resolve(&h, &id, "alice", ActionKind::Strong).await;
    assert_eq!(
        retry,
        Resolution::Resolved {
            action: ActionKind::Strong,
            drop: DropOutcome::Single { amount: 5 },
            balance: 14,
        }
    );
    assert_eq!(h.store.writes(), 1);
    assert!(h.engine.encounter(&id).is_none());
}

fn instant_expiry() -> GameConfig {
    let mut config = GameConfig::default();
    config.spawn.encounter_ttl_seconds = Some(0);
    config
}

#[tokio::test]
async fn test_expired_encounter_ignores_reactions() {
    let h = harness_with(instant_expiry(), &[("alice", 10)], MAJOR_SPAWN.into_iter().chain([0.0]));
    let id = spawn(&h, "alice").await;
    h.transport.clear();

    let resolution = resolve(&h, &id, "alice", ActionKind::Strong).await;
    assert_eq!(resolution, Resolution::Ignored);
    assert_eq!(h.engine.ledger().get("alice"), 10);
    assert_eq!(h.store.writes(), 0);
    assert!(h.transport.sent().is_empty());
    assert_eq!(h.engine.open_encounters(), 0);
}

#[tokio::test]
async fn test_sweep_drops_expired_encounters() {
    let h = harness_with(instant_expiry(), &[], MINOR_SPAWN.into_iter().chain(MAJOR_SPAWN));
    spawn(&h, "alice").await;
    spawn(&h, "bob").await;
    assert_eq!(h.engine.open_encounters(), 2);

    assert_eq!(h.engine.sweep_expired(), 2);
    assert_eq!(h.engine.open_encounters(), 0);
    assert_eq!(h.engine.sweep_expired(), 0);
}

#[tokio::test]
async fn test_sweep_keeps_live_encounters() {
    let h = harness(&[], MAJOR_SPAWN);
    let id = spawn(&h, "alice").await;

    assert_eq!(h.engine.sweep_expired(), 0);
    assert!(h.engine.encounter(&id).is_some());
}

#[tokio::test]
async fn test_commands_never_spawn() {
    let h = harness(&[("alice", 7)], MAJOR_SPAWN);

    let outcome = h.engine.handle_event(say("alice", "!stash")).await.unwrap();
    assert!(matches!(outcome, EventOutcome::Command(_)));
    assert_eq!(h.engine.open_encounters(), 0);

    let text = h.transport.last_text().unwrap();
    assert!(text.starts_with("<@alice>, you have 7 "));
}

#[tokio::test]
async fn test_leaderboard_orders_by_balance() {
    let h = harness(&[("A", 50), ("B", 200), ("C", 10)], Vec::new());

    assert_eq!(
        h.engine.leaderboard(),
        vec![
            ("B".to_string(), 200),
            ("A".to_string(), 50),
            ("C".to_string(), 10),
        ]
    );

    h.engine
        .handle_event(say("A", "!leaderboard"))
        .await
        .unwrap();
    let text = h.transport.last_text().unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "**Leaderboard:**");
    assert!(lines[1].starts_with("#1 <@B>: 200"));
    assert!(lines[2].starts_with("#2 <@A>: 50"));
    assert!(lines[3].starts_with("#3 <@C>: 10"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_duplicate_reactions_pay_once() {
    let h = Arc::new(harness(&[], MINOR_SPAWN.into_iter().chain([0.05, 0.5])));
    let id = spawn(&h, "alice").await;

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let h = Arc::clone(&h);
        let id = id.clone();
        tasks.push(tokio::spawn(async move {
            resolve(&h, &id, "alice", ActionKind::Basic).await
        }));
    }

    let mut resolved = 0;
    let mut rejected = 0;
    for task in tasks {
        match task.await.unwrap() {
            Resolution::Resolved { .. } => resolved += 1,
            Resolution::AlreadyReacted => rejected += 1,
            other => panic!("unexpected resolution {other:?}"),
        }
    }
    assert_eq!(resolved, 1);
    assert_eq!(rejected, 3);
    assert_eq!(h.engine.ledger().get("alice"), 1);
}
