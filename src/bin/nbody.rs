use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use rs_nbody::bodies::Body;
use rs_nbody::diagnostics::EnergyReport;
use rs_nbody::io::{read_bodies_from_path, write_bodies_to_path};
use rs_nbody::scenario::ScenarioConfig;
use rs_nbody::simulation::{Simulation, SimulationParameters};
use rs_nbody::utils::{GravityConstants, DEFAULT_DOMAIN_SIZE};

/// Barnes-Hut n-body simulation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Body file to load
    #[arg(short = 'i', long = "input", required_unless_present = "generate")]
    input: Option<PathBuf>,

    /// Where to write the final body set
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Number of steps
    #[arg(short = 's', long = "steps")]
    steps: usize,

    /// MAC threshold (0 = exact summation)
    #[arg(short = 't', long = "theta")]
    theta: f64,

    /// Time step
    #[arg(short = 'd', long = "dt")]
    dt: f64,

    /// Workers sharing force evaluation
    #[arg(short = 'w', long = "workers", default_value_t = 1)]
    workers: usize,

    /// Side length of the square domain
    #[arg(long, default_value_t = DEFAULT_DOMAIN_SIZE)]
    domain_size: f64,

    /// Log total energy drift over the run
    #[arg(long)]
    energy: bool,

    /// Generate N random bodies instead of reading an input file
    #[arg(long, value_name = "N", conflicts_with = "input")]
    generate: Option<usize>,

    /// Seed for --generate
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Log verbosity: 0 info, 1 debug, 2 or more trace (bare -D means 1)
    #[arg(
        short = 'D',
        long = "debug",
        value_name = "LEVEL",
        num_args = 0..=1,
        default_value_t = 0,
        default_missing_value = "1"
    )]
    debug: u8,
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Measures the starting energy only when drift reporting was asked for.
fn energy_baseline(args: &Args, bodies: &[Body], constants: &GravityConstants) -> Option<EnergyReport> {
    args.energy.then(|| EnergyReport::measure(bodies, constants))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let params = SimulationParameters {
        step_count: args.steps,
        theta: args.theta,
        dt: args.dt,
        domain_size: args.domain_size,
        workers: args.workers,
        constants: GravityConstants::default(),
    };
    params.validate().context("invalid simulation parameters")?;

    let bodies = match (&args.input, args.generate) {
        (Some(path), _) => read_bodies_from_path(path)
            .with_context(|| format!("failed to read bodies from {}", path.display()))?,
        (None, Some(count)) => {
            info!("Generating {} bodies with seed {}", count, args.seed);
            ScenarioConfig {
                count,
                domain_size: args.domain_size,
                seed: args.seed,
                ..Default::default()
            }
            .generate()
        }
        (None, None) => bail!("either --input or --generate is required"),
    };

    let initial_energy = energy_baseline(&args, &bodies, &params.constants);
    let mut sim = Simulation::new(bodies, params).context("failed to set up simulation")?;

    let started = Instant::now();
    let summary = sim.run().context("simulation aborted")?;
    info!(
        "{} steps in {:.3}s ({} tree nodes visited)",
        summary.steps,
        started.elapsed().as_secs_f64(),
        summary.stats.nodes_visited
    );

    if let Some(initial_energy) = initial_energy {
        let final_energy = EnergyReport::measure(sim.bodies(), &params.constants);
        info!(
            "Energy {:.6e} -> {:.6e} (relative drift {:.3e})",
            initial_energy.total(),
            final_energy.total(),
            final_energy.drift(&initial_energy)
        );
    }

    write_bodies_to_path(&args.output, sim.bodies())
        .with_context(|| format!("failed to write bodies to {}", args.output.display()))?;
    Ok(())
}
