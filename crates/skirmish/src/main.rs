//! Skirmish CLI
//!
//! Play matches between corps chess agents and save the results.

use std::env;
use std::path::PathBuf;
use std::process;

use corps_core::{PlayerConfig, PlayerKind};
use skirmish::{MatchConfig, MatchRunner, SkirmishResult};
use tracing::error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Corps Chess Skirmish Runner");
    println!();
    println!("Usage:");
    println!("  skirmish play [--config FILE] [--white KIND] [--black KIND] [--games N]");
    println!("                [--seed S] [--max-turns T] [--out FILE] [--snapshots DIR] [--quiet]");
    println!("  skirmish config [FILE]");
    println!("  skirmish help");
    println!();
    println!("Agents:");
    println!("  heuristic     - Greedy capture value against king proximity");
    println!("  random        - Uniformly random legal action");
    println!();
    println!("Examples:");
    println!("  skirmish play --white heuristic --black random --games 20 --seed 7");
    println!("  skirmish config skirmish.toml && skirmish play --config skirmish.toml");
    println!();
    println!("Logging follows RUST_LOG (default: info).");
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn parse_agent(spec: &str) -> Option<PlayerKind> {
    match spec.to_lowercase().as_str() {
        "heuristic" | "greedy" => Some(PlayerKind::Heuristic),
        "random" | "rand" => Some(PlayerKind::Random),
        _ => None,
    }
}

fn seat(spec: &str) -> Option<PlayerConfig> {
    parse_agent(spec).map(|kind| PlayerConfig::new(&spec.to_lowercase(), kind))
}

/// Value following a flag, parsed; a missing or malformed value keeps `current`.
fn flag_value<T: std::str::FromStr>(args: &[String], i: &mut usize, current: T) -> T {
    let flag = &args[*i];
    match args.get(*i + 1) {
        Some(raw) => {
            *i += 1;
            raw.parse().unwrap_or_else(|_| {
                eprintln!("Warning: ignoring bad value {raw:?} for {flag}");
                current
            })
        }
        None => {
            eprintln!("Warning: {flag} needs a value");
            current
        }
    }
}

fn build_config(args: &[String]) -> SkirmishResult<MatchConfig> {
    // A config file is the base; flags override it
    let mut config = match args.iter().position(|a| a == "--config" || a == "-c") {
        Some(i) => match args.get(i + 1) {
            Some(path) => MatchConfig::load(&PathBuf::from(path))?,
            None => {
                eprintln!("Warning: --config needs a file");
                MatchConfig::default()
            }
        },
        None => MatchConfig::default(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => i += 1,
            "--games" | "-g" => config.games = flag_value(args, &mut i, config.games),
            "--max-turns" | "-t" => config.max_turns = flag_value(args, &mut i, config.max_turns),
            "--seed" | "-s" => {
                config.seed = Some(flag_value(args, &mut i, config.seed.unwrap_or(0)))
            }
            "--white" | "--black" => {
                let is_white = args[i] == "--white";
                let spec: String = flag_value(args, &mut i, String::new());
                match seat(&spec) {
                    Some(player) if is_white => config.game.white = player,
                    Some(player) => config.game.black = player,
                    None => eprintln!("Unknown agent: {spec}"),
                }
            }
            "--out" | "-o" => {
                config.results_path = Some(flag_value(args, &mut i, PathBuf::from("results.json")))
            }
            "--snapshots" => {
                config.snapshot_dir = Some(flag_value(args, &mut i, PathBuf::from("snapshots")))
            }
            "--quiet" | "-q" => config.verbose = false,
            other => eprintln!("Warning: ignoring argument {other}"),
        }
        i += 1;
    }
    Ok(config)
}

fn run_play(args: &[String]) -> SkirmishResult<()> {
    let config = build_config(args)?;

    println!(
        "=== Match: {} vs {} ===",
        config.game.white.name, config.game.black.name
    );
    println!(
        "Games: {}, Max turns: {}, Actions per turn: {}",
        config.games, config.max_turns, config.game.actions_per_turn
    );
    println!();

    let runner = MatchRunner::new(config);
    let report = runner.run_match()?;

    println!();
    report.print_report();
    if let Some(path) = &runner.config().results_path {
        println!("Results saved to {}", path.display());
    }
    Ok(())
}

fn write_config(args: &[String]) -> SkirmishResult<()> {
    let text = MatchConfig::default().to_toml_string()?;
    match args.first() {
        Some(path) => {
            std::fs::write(path, text)?;
            println!("Default config written to {path}");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn main() {
    init_logging();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let outcome = match args[1].as_str() {
        "play" => run_play(&args[2..]),
        "config" => write_config(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            Ok(())
        }
    };

    if let Err(err) = outcome {
        error!(%err, "skirmish failed");
        process::exit(1);
    }
}
