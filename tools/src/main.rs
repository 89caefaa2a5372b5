//! eco-runner: headless driver for the ecosystem simulation.
//!
//! Usage:
//!   eco-runner --config world.json --seed 42 --turns 100
//!   eco-runner --turns 20 --step-phases

use anyhow::Result;
use ecosim_core::{
    engine::SimEngine, event::SimEvent, loader::WorldConfig, rng::DEFAULT_SEED,
};
use std::env;
use std::str::FromStr;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", DEFAULT_SEED);
    let turns = parse_arg(&args, "--turns", 50u64);
    let step_phases = args.iter().any(|a| a == "--step-phases");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].clone());

    let config = match &config_path {
        Some(path) => WorldConfig::from_file(path)?,
        None => demo_world()?,
    };
    let grid = config.build()?;
    log::info!(
        "world built: {}x{}, {} organisms",
        grid.width(),
        grid.height(),
        grid.census().total()
    );

    println!("ecosim — eco-runner");
    println!("  seed:   {seed}");
    println!("  turns:  {turns}");
    println!(
        "  config: {}",
        config_path.as_deref().unwrap_or("<built-in demo world>")
    );
    println!();

    let mut engine = SimEngine::new(grid, seed);

    for _ in 0..turns {
        let events = if step_phases {
            run_turn_stepwise(&mut engine)
        } else {
            engine.run_full_turn()
        };
        report(&events, step_phases);

        if engine.grid().census().is_empty() {
            println!("world went quiet at turn {}", engine.turn());
            break;
        }
    }

    print_summary(&engine);
    Ok(())
}

/// Drive one turn phase by phase, collecting all events.
fn run_turn_stepwise(engine: &mut SimEngine) -> Vec<SimEvent> {
    let mut events = Vec::new();
    loop {
        events.extend(engine.run_next_phase());
        if engine.current_phase().is_none() {
            break;
        }
    }
    events
}

fn report(events: &[SimEvent], verbose: bool) {
    for event in events {
        match event {
            SimEvent::PhaseExecuted {
                turn,
                phase,
                census,
            } if verbose => {
                println!(
                    "turn {turn:>4}  {phase:<12}  plants={:<4} herbivores={:<4} carnivores={}",
                    census.plants, census.herbivores, census.carnivores
                );
            }
            SimEvent::TurnCompleted { turn, census } => {
                println!(
                    "turn {turn:>4}  plants={:<4} herbivores={:<4} carnivores={}",
                    census.plants, census.herbivores, census.carnivores
                );
            }
            _ => {}
        }
    }
}

fn print_summary(engine: &SimEngine) {
    let census = engine.grid().census();
    println!();
    println!("── summary ──────────────────────────");
    println!("  turns run:   {}", engine.turn());
    println!("  plants:      {}", census.plants);
    println!("  herbivores:  {}", census.herbivores);
    println!("  carnivores:  {}", census.carnivores);
}

/// Small built-in world for running without a config file.
fn demo_world() -> Result<WorldConfig> {
    let json = r#"{
        "width": 12,
        "height": 12,
        "plants": [
            {"energy": 2, "x": 2, "y": 2}, {"energy": 3, "x": 3, "y": 2},
            {"energy": 1, "x": 8, "y": 4}, {"energy": 2, "x": 9, "y": 9},
            {"energy": 3, "x": 5, "y": 7}, {"energy": 2, "x": 6, "y": 6}
        ],
        "herbivores": [
            {"energy": 6, "x": 4, "y": 3}, {"energy": 5, "x": 7, "y": 8},
            {"energy": 8, "x": 2, "y": 9}
        ],
        "carnivores": [
            {"energy": 12, "x": 10, "y": 1}, {"energy": 10, "x": 1, "y": 10}
        ]
    }"#;
    Ok(WorldConfig::from_json(json)?)
}

fn parse_arg<T: FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
