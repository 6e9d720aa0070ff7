//! CLI frontend for the Forage predator-encounter simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "forage",
    about = "Forage: predator encounters on a resource landscape",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a predator set for a landscape and print it
    Predators {
        #[command(flatten)]
        setup: SetupArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run replicate simulations and report predator encounters
    Run {
        #[command(flatten)]
        setup: SetupArgs,

        /// Number of replicate runs sharing one predator cache
        #[arg(short, long, default_value_t = 1)]
        replicates: u64,

        /// Encounter radius around the landscape centre
        #[arg(long, default_value_t = 5.0)]
        radius: f64,

        /// Print the run log
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Landscape and configuration options shared by every command.
#[derive(Args)]
struct SetupArgs {
    /// Landscape JSON file (`{"rows": [[...], ...]}`)
    #[arg(short, long)]
    landscape: Option<PathBuf>,

    /// Width of the built-in uniform landscape
    #[arg(long, default_value_t = 20)]
    width: usize,

    /// Height of the built-in uniform landscape
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Quality of every cell in the built-in uniform landscape
    #[arg(long, default_value_t = 1.0)]
    quality: f64,

    /// Simulation config JSON file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Time steps per run
    #[arg(long)]
    steps: Option<u64>,

    /// Time steps per scheduling interval
    #[arg(long)]
    interval_size: Option<f64>,

    /// Predator lifetime in intervals
    #[arg(long)]
    duration: Option<u64>,

    /// Blend between uniform (1.0) and quality-weighted (0.0) placement
    #[arg(long)]
    randomness: Option<f64>,

    /// Total predation pressure (predator-intervals per run)
    #[arg(long)]
    pressure: Option<f64>,

    /// Spatial padding added to predator locations
    #[arg(long)]
    border: Option<f64>,

    /// Place predators as an introduced population
    #[arg(long)]
    introduced: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Table,
    Csv,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Predators {
            setup,
            format,
            output,
        } => commands::predators::run(&setup, format, output.as_deref()),
        Commands::Run {
            setup,
            replicates,
            radius,
            verbose,
        } => commands::run::run(&setup, replicates, radius, verbose),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so CSV and JSON reports on stdout stay clean.
/// Filtering follows `RUST_LOG`, defaulting to warnings only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
