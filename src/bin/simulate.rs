//! Reward-table simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # 1,000,000 rolls per action
//!   cargo run --bin simulate -- -n 50000 --seed 42  # Reproducible smaller run
//!   cargo run --bin simulate -- --config tuned.json # Try a tuned reward table

use brinebot::core::GameConfig;
use brinebot::rewards::ActionKind;
use brinebot::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::PathBuf;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, game_path) = parse_args(&args);

    let game = match game_path {
        Some(path) => match GameConfig::from_file(&path).and_then(|g| g.validate().map(|_| g)) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    if config.verbosity >= 1 {
        println!("Configuration:");
        println!("  Trials:   {}", config.trials);
        println!("  Actions:  {:?}", config.actions);
        if let Some(seed) = config.seed {
            println!("  Seed:     {}", seed);
        }
        println!();
    }

    let report = run_simulation(&config, &game);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "reward_sim_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Could not write {}: {}", filename, e),
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, Option<PathBuf>) {
    let mut config = SimConfig::default();
    let mut game_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--trials" => {
                if i + 1 < args.len() {
                    config.trials = args[i + 1].parse().unwrap_or(1_000_000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-a" | "--action" => {
                if i + 1 < args.len() {
                    let action = match args[i + 1].to_lowercase().as_str() {
                        "basic" => Some(ActionKind::Basic),
                        "strong" => Some(ActionKind::Strong),
                        "ultimate" => Some(ActionKind::Ultimate),
                        _ => None,
                    };
                    if let Some(action) = action {
                        config.actions = vec![action];
                    }
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    game_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, game_path)
}

fn print_help() {
    println!("Reward-table simulator\n");
    println!("Usage: simulate [OPTIONS]\n");
    println!("Options:");
    println!("  -n, --trials <N>     Rolls per action (default 1000000)");
    println!("  -s, --seed <SEED>    Seed for reproducible runs");
    println!("  -a, --action <KIND>  Only simulate basic, strong or ultimate");
    println!("  -c, --config <PATH>  Game config JSON to simulate");
    println!("  -v, --verbose        Per-action progress");
    println!("  -q, --quiet          Report only");
    println!("      --json           Also save the report as JSON");
    println!("  -h, --help           Show this help message");
}
