//! Headless driver for the solubility engine.
//!
//! Runs the fixed-interval tick loop a windowed front end would run, without drawing anything:
//! ```text
//! gassol-headless --ticks 600 --temperature 0.4 --pressure 1.8 --reaction
//! gassol-headless --config sim.json --fixed-step 1.0 --seed 7 --interval-ms 0
//! ```
//! Set `RUST_LOG=gassol=debug` to see every tick report.

use anyhow::{Context, Result};
use clap::Parser;
use gassol::core::{Parameter, Session, SimulationConfig, TickReport};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gassol-headless", about = "Run the gas solubility simulation without a UI")]
struct Args {
    /// Number of ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Wall-clock pause between ticks, in milliseconds.
    #[arg(long, default_value_t = 16)]
    interval_ms: u64,

    /// Use this constant delta time instead of measured wall-clock time.
    #[arg(long)]
    fixed_step: Option<f64>,

    /// JSON file with a SimulationConfig; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    temperature: Option<f64>,

    #[arg(long)]
    pressure: Option<f64>,

    /// Henry's-law style constant; lower means more soluble.
    #[arg(long)]
    solubility_constant: Option<f64>,

    #[arg(long)]
    polarity_match: Option<f64>,

    /// Enable removal of dissolved particles by reaction.
    #[arg(long)]
    reaction: bool,

    /// Log a summary line every N ticks (0 = only the final one).
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Print the final snapshot as JSON to stdout.
    #[arg(long)]
    dump_snapshot: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }

    let mut session = Session::new(config).context("building simulation")?;
    apply_parameters(&mut session, &args)?;
    info!(parameters = ?session.parameters(), ticks = args.ticks, "starting headless run");

    let interval = Duration::from_millis(args.interval_ms);
    let mut last: Option<TickReport> = None;
    for n in 1..=args.ticks {
        if !interval.is_zero() {
            thread::sleep(interval);
        }
        let report = match args.fixed_step {
            Some(dt) => session.step(dt)?,
            None => session.tick()?,
        };
        if args.report_every > 0 && n % args.report_every == 0 && n != args.ticks {
            log_report(&report);
        }
        last = Some(report);
    }

    if let Some(report) = last {
        log_report(&report);
    }
    if args.dump_snapshot {
        println!("{}", serde_json::to_string(&session.snapshot())?);
    }
    Ok(())
}

fn apply_parameters(session: &mut Session, args: &Args) -> Result<()> {
    let requested = [
        (Parameter::Temperature, args.temperature),
        (Parameter::Pressure, args.pressure),
        (Parameter::SolubilityConstant, args.solubility_constant),
        (Parameter::PolarityMatch, args.polarity_match),
    ];
    for (param, value) in requested {
        if let Some(value) = value {
            session
                .set_parameter(param, value)
                .with_context(|| format!("setting {param}"))?;
        }
    }
    session.set_reaction_enabled(args.reaction);
    Ok(())
}

fn log_report(report: &TickReport) {
    info!(
        tick = report.tick,
        gas = report.counts.gas,
        dissolved = report.counts.dissolved,
        reacted = report.reacted,
        "population"
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
