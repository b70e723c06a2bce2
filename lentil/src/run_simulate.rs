use crate::common::*;

use block_model::simulate::{contiguous_labels, sample_sbm};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug, Clone)]
pub struct SimArgs {
    /// number of vertices in each block (comma-separated)
    #[arg(long, short = 'n', value_delimiter(','), required = true)]
    block_sizes: Vec<usize>,

    /// `k x k` block probability matrix file (`.tsv` or `.tsv.gz`)
    #[arg(long, short = 'p', required = true)]
    block_p: Box<str>,

    /// output file header; writes `{out}.graph.tsv.gz` and
    /// `{out}.labels.gz`
    #[arg(long, short, required = true)]
    out: Box<str>,

    /// draw an undirected (symmetric) graph
    #[arg(long, default_value_t = false)]
    undirected: bool,

    /// allow self-loops
    #[arg(long, default_value_t = false)]
    loops: bool,

    /// random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

/// Draw one SBM graph and write it with its vertex labels
pub fn run_simulate(args: &SimArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let block_p = Mat::from_tsv(&args.block_p, None)?;
    let mut rng = StdRng::seed_from_u64(args.seed);

    let graph = sample_sbm(
        &args.block_sizes,
        &block_p,
        !args.undirected,
        args.loops,
        None,
        &mut rng,
    )?;

    info!(
        "sampled {} vertices in {} blocks: {} edges",
        graph.nrows(),
        args.block_sizes.len(),
        graph.sum()
    );

    let graph_file = format!("{}.graph.tsv.gz", args.out);
    let label_file = format!("{}.labels.gz", args.out);

    mkdir(&graph_file)?;
    graph.to_tsv(&graph_file)?;
    write_lines(&contiguous_labels(&args.block_sizes), &label_file)?;

    info!("wrote {} and {}", graph_file, label_file);
    Ok(())
}
