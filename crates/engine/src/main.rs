//! Parley console - talk to the cast from a terminal.
//!
//! Lines are `<character>: <text>`. `/greet <character>` opens an encounter,
//! `/state` dumps the world snapshot, `/quit` exits.

use parley_domain::{
    items, persona, CharacterId, DialogueResponse, IntentId, TurnRecord, WorldContext,
};
use parley_engine::infrastructure::settings::DialogueSettings;
use parley_engine::App;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = DialogueSettings::from_env()?;
    let app = App::from_settings(settings);
    let mut world = starting_world();

    tracing::info!("Parley console ready");
    println!("Talk with `<character>: <text>`. Cast: warden, broker, archivist, courier, rival.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" => break,
            "/state" => println!("{}", serde_json::to_string_pretty(&world)?),
            _ if line.starts_with("/greet") => {
                let name = line.trim_start_matches("/greet").trim();
                match name.parse::<CharacterId>() {
                    Ok(character) => {
                        let seen = world.encounter_count(character);
                        let greeting = app.dialogue.greeting(character, seen, "console");
                        world.record_encounter(character);
                        println!("{}: {}", persona(character).display_name, greeting.text);
                    }
                    Err(e) => println!("{e}"),
                }
            }
            _ => {
                let Some((name, text)) = line.split_once(':') else {
                    println!("Expected `<character>: <text>`");
                    continue;
                };
                let character = match name.parse::<CharacterId>() {
                    Ok(character) => character,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                let text = text.trim();

                let warnings_before = world.warnings(character).total();
                let response = app.dialogue.reply(character, text, &mut world).await;
                if !app.dialogue.is_latest(character, response.epoch) {
                    tracing::debug!(epoch = response.epoch, "Dropping stale reply");
                    continue;
                }

                let speaker = response
                    .display_name
                    .clone()
                    .unwrap_or_else(|| persona(character).display_name.to_string());
                println!("{speaker} [{}]: {}", response.source, response.text);

                remember(
                    &mut world,
                    character,
                    text,
                    &response,
                    warnings_before,
                    app.settings.history_window,
                );

                if let Some(failure) = &world.run_failure {
                    println!("*** Run failed: {} ***", failure.reason);
                }
            }
        }
    }

    Ok(())
}

/// Caller-side bookkeeping after a reply: transcript, memory card.
fn remember(
    world: &mut WorldContext,
    character: CharacterId,
    input: &str,
    response: &DialogueResponse,
    warnings_before: u32,
    window: usize,
) {
    if response.safety_abort {
        return;
    }

    world.record_turn(
        TurnRecord {
            character,
            player: input.to_string(),
            reply: response.text.clone(),
        },
        window,
    );

    let gave_advice = matches!(
        response.intent_id,
        IntentId::ArchivistHint
            | IntentId::ArchivistMission
            | IntentId::WardenMission
            | IntentId::LocateCourier
    );
    let warned = world.warnings(character).total() > warnings_before;

    if gave_advice || warned {
        let card = world.memory.entry(character).or_default();
        if gave_advice {
            card.last_advice = Some(response.text.clone());
            card.advice_is_mission = response.intent_id != IntentId::LocateCourier;
        }
        if warned {
            card.warnings.push(response.text.clone());
        }
    }
}

fn starting_world() -> WorldContext {
    let mut world = WorldContext::new("the gate", 900);
    world.grant_item(items::COIN_POUCH);
    world.courier_location = Some("the north pier".to_string());
    world.nearby = vec![CharacterId::Warden];
    world
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
