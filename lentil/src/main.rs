mod common;
mod run_fit;
mod run_simulate;

use crate::run_fit::*;
use crate::run_simulate::*;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about, term_width = 80)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fit ER, DCER, SBM and DCSBM to a graph with known vertex
    /// labels and compare them
    Fit(FitArgs),

    /// Draw a graph from a stochastic block model
    Simulate(SimArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.commands {
        Commands::Fit(args) => {
            run_fit(args)?;
        }
        Commands::Simulate(args) => {
            run_simulate(args)?;
        }
    }

    Ok(())
}
