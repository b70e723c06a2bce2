use crate::common::*;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io::Write;

#[derive(Parser, Debug, Clone)]
pub struct FitArgs {
    /// adjacency matrix file (`.tsv` or `.tsv.gz`); row `i` lists the
    /// out-going edges of vertex `i`
    #[arg(required = true)]
    graph_file: Box<str>,

    /// vertex label file; line `i` holds the block label of vertex `i`
    #[arg(long, short = 'l', required = true)]
    labels: Box<str>,

    /// output report file (`.json`), or `stdout`
    #[arg(long, short, required = true)]
    out: Box<str>,

    /// treat the graph as undirected
    #[arg(long, default_value_t = false)]
    undirected: bool,

    /// allow self-loops
    #[arg(long, default_value_t = false)]
    loops: bool,

    /// force symmetry before fitting: triu, tril or avg
    #[arg(long)]
    symmetrize: Option<SymmetrizeMethod>,

    /// turn edge weights into 0/1
    #[arg(long, default_value_t = false)]
    binarize: bool,

    /// zero the diagonal before fitting
    #[arg(long, default_value_t = false)]
    remove_loops: bool,

    /// clip probabilities into `[clip, 1 - clip]` for the reported
    /// log-likelihood
    #[arg(long)]
    clip: Option<f64>,

    /// write one graph sampled from the best-BIC model to this file
    #[arg(long)]
    sample: Option<Box<str>>,

    /// random seed for `--sample`
    #[arg(long)]
    seed: Option<u64>,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Serialize, Debug)]
struct ModelReport {
    model: &'static str,
    n_parameters: usize,
    log_likelihood: f64,
    bic: f64,
    mse: f64,
}

#[derive(Serialize, Debug)]
struct FitReport {
    n_vertices: usize,
    n_blocks: usize,
    directed: bool,
    loops: bool,
    models: Vec<ModelReport>,
    best_model: Option<&'static str>,
}

fn preprocess(mut graph: Mat, args: &FitArgs) -> anyhow::Result<Mat> {
    if let Some(method) = args.symmetrize {
        info!("symmetrize: {:?}", method);
        graph = graph.symmetrize(method)?;
    }
    if args.remove_loops {
        graph = graph.remove_loops()?;
    }
    if args.binarize {
        graph = graph.binarize();
    }

    if args.undirected && !graph.is_symmetric() {
        warn!("the graph is not symmetric; only its upper triangle is scored (see --symmetrize)");
    }
    if !args.loops && graph.has_loops() {
        warn!("the graph has self-loops, but loops are not modelled (see --loops, --remove-loops)");
    }
    if !graph.is_unweighted() {
        warn!("edge weights are ignored: any nonzero entry counts as an edge");
    }
    Ok(graph)
}

/// Fit every a-priori model and write a comparison report
pub fn run_fit(args: &FitArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let graph = preprocess(read_adjacency(&args.graph_file)?, args)?;
    let labels = read_vertex_labels(&args.labels)?;

    let opts = EstimatorOptions {
        directed: !args.undirected,
        loops: args.loops,
        ..EstimatorOptions::sbm()
    };

    let mut models: Vec<Box<dyn GraphEstimator<Box<str>>>> = vec![
        Box::new(ErEstimator::new(opts)),
        Box::new(ErEstimator::new(EstimatorOptions {
            fit_degrees: true,
            ..opts
        })),
        Box::new(SbmEstimator::new(opts)),
        Box::new(SbmEstimator::dcsbm_with(opts)),
    ];

    let n_blocks = {
        let mut distinct = labels.clone();
        distinct.sort();
        distinct.dedup();
        distinct.len()
    };

    let input = GraphInput::from(graph);
    let mut reports = Vec::with_capacity(models.len());

    for model in models.iter_mut() {
        model.fit(&input, Some(&labels[..]))?;

        let report = ModelReport {
            model: model.kind().name(),
            n_parameters: model.n_parameters()?,
            log_likelihood: model.score(&input, args.clip)?,
            bic: model.bic(&input)?,
            mse: model.mse(&input)?,
        };

        info!(
            "{:>6}: #params={:<6} loglik={:.3} BIC={:.3} MSE={:.3}",
            report.model, report.n_parameters, report.log_likelihood, report.bic, report.mse
        );
        reports.push(report);
    }

    let best = reports
        .iter()
        .enumerate()
        .filter(|(_, r)| r.bic.is_finite())
        .min_by(|(_, a), (_, b)| a.bic.total_cmp(&b.bic))
        .map(|(i, _)| i);

    match best {
        Some(b) => info!("best model by BIC: {}", reports[b].model),
        None => warn!("no model has a finite BIC"),
    }

    if let Some(sample_file) = args.sample.as_deref() {
        let b = best.ok_or(anyhow::anyhow!("no model to sample from"))?;
        let sampled = match args.seed {
            Some(seed) => models[b].sample_with(&mut StdRng::seed_from_u64(seed))?,
            None => models[b].sample()?,
        };
        sampled.to_tsv(sample_file)?;
        info!("wrote a {} sample to {}", reports[b].model, sample_file);
    }

    let report = FitReport {
        n_vertices: labels.len(),
        n_blocks,
        directed: opts.directed,
        loops: opts.loops,
        best_model: best.map(|b| reports[b].model),
        models: reports,
    };

    mkdir(&args.out)?;
    let mut buf = open_buf_writer(&args.out)?;
    serde_json::to_writer_pretty(&mut buf, &report)?;
    writeln!(buf)?;
    buf.flush()?;

    info!("done");
    Ok(())
}
