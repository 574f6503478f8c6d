//! Unscripted headless driver.
//!
//! Runs the simulation core without a window: a scripted walk through the
//! world stands in for keyboard input, and a background presentation thread
//! logs the notifications and sound cues the core emits.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 900 --seed 7
//! RUST_LOG=debug cargo run -- --world house.json
//! ```

use std::path::PathBuf;

use clap::Parser;
use unscripted::resources::simconfig::SimConfig;
use unscripted::simulation::Simulation;
use unscripted::world::WorldDescription;

/// Unscripted 2D simulation core
#[derive(Parser)]
#[command(version, about = "Headless driver for the Unscripted simulation core")]
struct Cli {
    /// INI file with tuning values (missing keys keep their defaults).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON world description; the built-in house is used when omitted.
    #[arg(long, value_name = "PATH")]
    world: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Milliseconds per tick.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,

    /// Override the RNG seed from the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the built-in house as JSON and exit.
    /// Optionally provide a path (default: house.json).
    #[arg(long, value_name = "PATH")]
    dump_world: Option<Option<PathBuf>>,

    /// Write the effective configuration as INI and exit.
    /// Optionally provide a path (default: unscripted.ini).
    #[arg(long, value_name = "PATH")]
    write_config: Option<Option<PathBuf>>,
}

/// One leg of the scripted walk.
struct Step {
    ticks: u32,
    dx: f32,
    dy: f32,
    sprint: bool,
    /// Press the interact key when the leg ends.
    interact: bool,
}

const fn step(ticks: u32, dx: f32, dy: f32, sprint: bool, interact: bool) -> Step {
    Step {
        ticks,
        dx,
        dy,
        sprint,
        interact,
    }
}

/// Walk from the living room into bedroom 2, try the closet, grab the keys
/// in bedroom 1, come back, then rest.
const SCRIPT: &[Step] = &[
    step(60, -1.0, 0.0, false, false),
    step(40, 0.0, -1.0, true, false),
    step(60, -1.0, -1.0, true, true),
    step(20, 0.0, 0.0, false, true),
    step(80, -1.0, 0.0, true, false),
    step(30, 0.0, -1.0, false, true),
    step(60, 1.0, 0.0, false, true),
    step(120, 0.0, 0.0, false, false),
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: dump the built-in world and quit
    if let Some(maybe_path) = cli.dump_world {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("house.json"));
        if let Err(e) = WorldDescription::house().write_to_file(&path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("World written to {}", path.display());
        return;
    }

    let mut config = match &cli.config {
        Some(path) => SimConfig::with_path(path),
        None => SimConfig::new(),
    };
    if cli.config.is_some() || config.config_path().exists() {
        if let Err(e) = config.load_from_file() {
            log::warn!("{}; using defaults", e);
        }
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    // Early-exit: write the effective configuration and quit
    if let Some(maybe_path) = cli.write_config {
        if let Some(path) = maybe_path {
            config.config_path = path;
        }
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path().display());
        return;
    }

    let desc = match &cli.world {
        Some(path) => match WorldDescription::load_from_file(path) {
            Ok(desc) => desc,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => WorldDescription::house(),
    };

    let mut sim = Simulation::new(config, &desc);
    sim.attach_presentation();

    let mut remaining = cli.ticks;
    'script: for leg in SCRIPT.iter().cycle() {
        for _ in 0..leg.ticks {
            if remaining == 0 {
                break 'script;
            }
            remaining -= 1;
            if let Err(e) = sim.advance(cli.frame_ms, leg.dx, leg.dy, leg.sprint) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        if leg.interact {
            let result = sim.try_interact();
            log::info!(
                "interact at {:.0}ms: {:?} {:?}",
                sim.elapsed_ms(),
                result.outcome,
                result.item_gained.as_ref().map(|item| item.name.as_str())
            );
        }
    }

    // One idle tick so events from the last interaction reach presentation
    let _ = sim.advance(0.0, 0.0, 0.0, false);

    if let Some(stats) = sim.detach_presentation() {
        log::info!(
            "presented {} notifications and {} sounds",
            stats.notifications,
            stats.sounds
        );
    }

    match sim.actor().map(|actor| serde_json::to_string_pretty(&actor)) {
        Some(Ok(json)) => println!("{json}"),
        Some(Err(e)) => log::error!("Failed to serialize actor: {}", e),
        None => log::error!("actor missing at shutdown"),
    }
    log::info!(
        "{} ticks, {} live particles",
        sim.frame_count(),
        sim.particles().len()
    );
}
