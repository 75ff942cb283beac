//! Opamp CLI - SID op-amp transfer-function tooling
//!
//! Command-line driver for the op-amp workspace.
//!
//! # Commands
//!
//! - `opamp fit --chip 6581` - Fit the generalised logistic to measured chip data
//! - `opamp sweep --model ekv` - Simulate the transfer curve from a device model
//!
//! # Architecture
//!
//! Service layer of the workspace: orchestrates `opamp_core`,
//! `opamp_models`, and `opamp_optimiser` behind a unified command-line
//! interface.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod data;
mod error;

pub use error::{CliError, Result};

/// SID op-amp transfer-function fitting CLI
#[derive(Parser)]
#[command(name = "opamp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit the generalised logistic to a chip's measured transfer curve
    Fit {
        /// Chip whose measurements to fit (6581 or 8580)
        #[arg(short, long)]
        chip: String,

        /// Seed for the random walk; defaults to OS entropy
        #[arg(short, long)]
        seed: Option<u64>,

        /// Candidate-evaluation budget
        #[arg(short = 'n', long, default_value = "10000000")]
        max_iterations: u64,

        /// Width of the multiplicative parameter jitter
        #[arg(long, default_value = "0.0001")]
        sigma: f64,

        /// Start from (1, 1, 1) instead of the chip's best-known fit
        #[arg(long)]
        fresh: bool,

        /// Write the final fit to a JSON file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Simulate the op-amp transfer curve from a device model
    Sweep {
        /// Device model (quadratic, subthreshold, ekv)
        #[arg(short, long, default_value = "quadratic")]
        model: String,

        /// Sweep start (V)
        #[arg(long, default_value = "2.0")]
        from: f64,

        /// Sweep end, exclusive (V)
        #[arg(long, default_value = "7.0")]
        to: f64,

        /// Step between samples (V)
        #[arg(long, default_value = "0.1")]
        step: f64,
    },
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Fit {
            chip,
            seed,
            max_iterations,
            sigma,
            fresh,
            output,
        } => commands::fit::run(&chip, seed, max_iterations, sigma, fresh, output.as_deref()),
        Commands::Sweep {
            model,
            from,
            to,
            step,
        } => commands::sweep::run(&model, from, to, step),
    }
}
