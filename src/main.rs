use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use brinebot::core::constants::{LEDGER_FILE, SWEEP_INTERVAL_SECONDS};
use brinebot::core::GameConfig;
use brinebot::engine::Engine;
use brinebot::ledger::{JsonFileStore, Ledger};
use brinebot::transport::{console, ConsoleTransport, Transport};
use brinebot::utils::{logging, persistence, version_line};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

struct Options {
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    bot_id: String,
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    logging::init_subscriber(&options.log_level);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("could not start async runtime")?;
    runtime.block_on(run(options))
}

async fn run(options: Options) -> anyhow::Result<()> {
    let data_dir = match options.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("could not create data dir {}", dir.display()))?;
            dir
        }
        None => persistence::data_dir().context("could not locate data dir")?,
    };

    let config = GameConfig::load(options.config.as_deref(), &data_dir)?;
    let ledger_path = data_dir.join(LEDGER_FILE);
    let ledger = Ledger::open(JsonFileStore::new(&ledger_path));
    let transport: Arc<dyn Transport> = Arc::new(ConsoleTransport::new());
    let engine = Arc::new(Engine::new(config, ledger, transport, options.bot_id.clone()));

    tracing::info!(
        bot = %options.bot_id,
        ledger = %ledger_path.display(),
        users = engine.ledger().len(),
        "brinebot ready"
    );

    let sweeper = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECONDS));
            loop {
                interval.tick().await;
                engine.sweep_expired();
            }
        })
    };

    let (tx, mut rx) = mpsc::channel(256);
    let reader = tokio::spawn(console::pump_events(BufReader::new(tokio::io::stdin()), tx));

    let mut in_flight = JoinSet::new();
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => {
                    let engine = Arc::clone(&engine);
                    in_flight.spawn(async move {
                        if let Err(e) = engine.handle_event(event).await {
                            tracing::error!(error = %e, "event dropped");
                        }
                    });
                }
                None => break,
            },
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, shutting down");
                break;
            }
        }
    }

    reader.abort();
    sweeper.abort();
    while in_flight.join_next().await.is_some() {}

    engine
        .flush_ledger()
        .await
        .context("final ledger flush failed")?;
    tracing::info!(users = engine.ledger().len(), "ledger flushed, bye");
    Ok(())
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        config: None,
        data_dir: None,
        bot_id: std::env::var("BRINEBOT_BOT_ID").unwrap_or_else(|_| "brinebot".to_string()),
        log_level: "info".to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--config" | "-c", Some(v)) => {
                options.config = Some(PathBuf::from(v));
                i += 1;
            }
            ("--data-dir" | "-d", Some(v)) => {
                options.data_dir = Some(PathBuf::from(v));
                i += 1;
            }
            ("--bot-id", Some(v)) => {
                options.bot_id = v.clone();
                i += 1;
            }
            ("--log", Some(v)) => {
                options.log_level = v.clone();
                i += 1;
            }
            ("--version" | "-v", _) => {
                println!("{}", version_line());
                std::process::exit(0);
            }
            ("--help" | "-h", _) => {
                print_help();
                std::process::exit(0);
            }
            (other, _) => {
                eprintln!("Unknown or incomplete argument: {}", other);
                eprintln!("Run 'brinebot --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Brinebot - encounter minigame\n");
    println!("Usage: brinebot [options]\n");
    println!("Reads events from stdin, one per line:");
    println!("  say <channel> <author> <text...>");
    println!("  react <message id> <user> <emoji>");
    println!("  unreact <message id> <user> <emoji>\n");
    println!("Options:");
    println!("  -c, --config <PATH>    Game config JSON (default ~/.brinebot/config.json)");
    println!("  -d, --data-dir <DIR>   Where the ledger lives (default ~/.brinebot)");
    println!("      --bot-id <ID>      The bot's own user id (env BRINEBOT_BOT_ID)");
    println!("      --log <LEVEL>      Log level, overridden by RUST_LOG (default info)");
    println!("  -v, --version          Show version information");
    println!("  -h, --help             Show this help message");
}
