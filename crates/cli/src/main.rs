//! hotmath command line.
//!
//! Tunes the strategy configuration for the current machine, shows or
//! resets it, compares strategies at a point and runs the blast sampler on
//! a demo world.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::IVec3;
use hotmath_config::JsonFileStore;
use hotmath_core::tune::{Outcome, Persistence};
use hotmath_core::{
    calculate_affected_cells, keyed_shuffle, ArcMode, BenchmarkProtocol, ConfigStore, Configuration,
    FastMath, FnWorld, Mode, SeededRandom, SqrtMode, Strategies, TrigMode, Tuner,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "hotmath", version, about = "Fast math strategy tuning")]
struct Cli {
    /// Configuration file.
    #[arg(long, global = true, default_value = "hotmath.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Benchmark every AUTO family and save the winners.
    Tune {
        /// Short benchmark instead of the full protocol.
        #[arg(long)]
        quick: bool,
    },

    /// Print the active configuration.
    Show,

    /// Overwrite the configuration with defaults (everything AUTO).
    Reset,

    /// Evaluate every strategy at one point against the reference.
    Compare {
        #[arg(allow_negative_numbers = true)]
        x: f64,
    },

    /// Run the blast sampler on a uniform demo world.
    Blast {
        #[arg(long, default_value_t = 4.0)]
        radius: f32,

        #[arg(long, default_value_t = 1)]
        seed: u32,

        /// Cell resistance everywhere in the demo world.
        #[arg(long, default_value_t = 0.0)]
        resistance: f32,

        /// Half-width of the cubic world in cells.
        #[arg(long, default_value_t = 64)]
        extent: i32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("hotmath=info".parse()?))
        .init();

    let cli = Cli::parse();
    let store = JsonFileStore::new(&cli.config);

    match cli.command {
        Command::Tune { quick } => tune(&store, quick),
        Command::Show => show(&store),
        Command::Reset => {
            store
                .save(&Configuration::default())
                .with_context(|| format!("resetting {}", store.path().display()))?;
            println!("Reset {}", store.path().display());
            Ok(())
        }
        Command::Compare { x } => compare(&store, x),
        Command::Blast {
            radius,
            seed,
            resistance,
            extent,
        } => blast(radius, seed, resistance, extent),
    }
}

fn load(store: &JsonFileStore) -> Result<Configuration> {
    store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))
}

fn tune(store: &JsonFileStore, quick: bool) -> Result<()> {
    let mut config = load(store)?;
    if !config.needs_tuning() {
        tracing::info!("Every family is locked, nothing to tune");
    }

    let protocol = if quick {
        BenchmarkProtocol::quick()
    } else {
        BenchmarkProtocol::default()
    };
    let strategies = Strategies::build(&config.sqrt_lut);
    let report = Tuner::new(protocol).tune_and_persist(&mut config, &strategies, store);

    for family in &report.families {
        match &family.outcome {
            Outcome::Locked { mode } => println!("{:<5} {mode:<10} (locked)", family.family),
            Outcome::Resolved { mode, timings } => {
                let times: Vec<String> = timings
                    .iter()
                    .map(|t| format!("{}={:.2}ns", t.mode, t.mean_ns))
                    .collect();
                println!("{:<5} {mode:<10} {}", family.family, times.join(" "));
            }
        }
    }

    match report.persistence {
        Persistence::Saved => println!("Saved {}", store.path().display()),
        Persistence::Failed(e) => println!("Not saved ({e}); results apply to this run only"),
        Persistence::NotAttempted => {}
    }
    Ok(())
}

fn show(store: &JsonFileStore) -> Result<()> {
    let config = load(store)?;

    for family in hotmath_core::Family::ALL {
        let mode = config.mode_name(family).unwrap_or("-");
        println!("{:<5} {mode}", family);
    }
    let lut = &config.sqrt_lut;
    println!("sqrt table: [{}, {}] step {}", lut.min, lut.max, lut.step);
    Ok(())
}

fn compare(store: &JsonFileStore, x: f64) -> Result<()> {
    let config = load(store)?;
    let fm = FastMath::new(&config);
    let s = fm.strategies();

    print_row("sqrt", SqrtMode::concrete(), x.sqrt(), |m| s.sqrt(m, x));
    println!("floor {} (exact {})", fm.floor(x), x.floor());
    print_row("sin", TrigMode::concrete(), x.sin(), |m| s.sin(m, x));
    print_row("cos", TrigMode::concrete(), x.cos(), |m| s.cos(m, x));
    print_row("tan", TrigMode::concrete(), x.tan(), |m| s.tan(m, x));
    print_row("asin", ArcMode::concrete(), x.asin(), |m| s.asin(m, x));
    print_row("acos", ArcMode::concrete(), x.acos(), |m| s.acos(m, x));
    print_row("atan", ArcMode::concrete(), x.atan(), |m| s.atan(m, x));
    Ok(())
}

fn print_row<M: Mode>(family: &str, modes: &[M], exact: f64, eval: impl Fn(M) -> f64) {
    let cells: Vec<String> = modes
        .iter()
        .map(|&m| {
            let value = eval(m);
            format!("{}={value:.9} (err {:.1e})", m.name(), (value - exact).abs())
        })
        .collect();
    println!("{family:<5} {}", cells.join("  "));
}

fn blast(radius: f32, seed: u32, resistance: f32, extent: i32) -> Result<()> {
    anyhow::ensure!(extent > 0, "extent must be positive, got {extent}");

    let world = FnWorld::new(
        |cell: IVec3| cell.abs().max_element() <= extent,
        |_| resistance,
        |_, _| true,
    );
    let mut rng = SeededRandom::new(seed);

    let mut cells = calculate_affected_cells(IVec3::ZERO, radius, &world, &mut rng);
    keyed_shuffle(&mut cells, &mut rng);

    println!("{} cells affected (radius {radius}, seed {seed})", cells.len());
    for cell in cells.iter().take(8) {
        println!("  {} {} {}", cell.x, cell.y, cell.z);
    }
    Ok(())
}
