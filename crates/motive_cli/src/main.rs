mod schedule;

use anyhow::Context;
use clap::Parser;
use motive_core::{MotiveConfig, MotiveError};
use motive_limbic::MotivationSystem;
use rand::rngs::StdRng;
use rand::SeedableRng;
use schedule::{parse_amount, parse_probability, parse_trigger, Perturbation, ScheduledTrigger};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config (settings, engine tuning, optional catalog)
    #[arg(short, long, env = "MOTIVE_CONFIG")]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 100)]
    ticks: u64,

    /// Print a snapshot every N ticks
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,

    /// Pace ticks in real time instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Trigger a consumption before a tick, as NAME@STEP (repeatable)
    #[arg(long = "trigger", value_name = "NAME@STEP", value_parser = parse_trigger)]
    triggers: Vec<ScheduledTrigger>,

    /// Per-tick probability of a random satisfy/frustrate kick
    #[arg(long, default_value_t = 0.0, value_parser = parse_probability)]
    perturb: f64,

    /// Largest amount of a random kick
    #[arg(long, default_value_t = 0.2, value_parser = parse_amount)]
    perturb_amount: f64,

    /// Seed for perturbations, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MotiveConfig::load_or_default(path)
            .with_context(|| format!("Cannot use config {}", path.display()))?,
        None => MotiveConfig::from_env(),
    };
    let mut system = MotivationSystem::from_config(&config).context("Invalid model configuration")?;
    for trigger in &args.triggers {
        system
            .consumption(&trigger.consumption)
            .with_context(|| format!("Cannot schedule trigger at step {}", trigger.step))?;
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut perturbation = Perturbation::new(rng, args.perturb, args.perturb_amount);

    let tick = Duration::from_secs_f64(system.settings().tick_seconds);
    let mut pacer = args
        .realtime
        .then(|| tokio::time::interval(tick.max(Duration::from_millis(1))));

    info!(
        "Running {} ticks of {:.3}s ({} scheduled triggers)",
        args.ticks,
        tick.as_secs_f64(),
        args.triggers.len()
    );

    let mut stdout = io::stdout().lock();
    for _ in 0..args.ticks {
        if let Some(interval) = pacer.as_mut() {
            tokio::select! {
                _ = interval.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted at step {}", system.step());
                    break;
                }
            }
        }

        let step = system.step();
        for trigger in args.triggers.iter().filter(|t| t.step == step) {
            system.trigger(&trigger.consumption, None, None)?;
        }
        perturbation.apply(&mut system)?;

        match system.advance() {
            Ok(()) => {}
            Err(MotiveError::SimulationFinished(n)) => {
                info!("Simulation finished after {} ticks", n);
                break;
            }
            Err(e) => return Err(e.into()),
        }

        if system.step() % args.every == 0 {
            writeln!(stdout, "{}", system.snapshot().to_json()?)?;
        }
    }
    stdout.flush()?;

    info!("Done at step {}", system.step());
    Ok(())
}
