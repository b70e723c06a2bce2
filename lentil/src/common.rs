pub use log::{info, warn};

pub use block_model::{
    EstimatorOptions, ErEstimator, GraphEstimator, GraphInput, GraphModel, SbmEstimator,
};
pub use matrix_util::common_io::{mkdir, open_buf_writer, read_lines, write_lines};
pub use matrix_util::traits::{GraphOps, IoOps, SymmetrizeMethod};

pub type Mat = ndarray::Array2<f64>;

/// Call before anything logs
pub fn init_logger(verbose: bool) {
    if verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
}

/// One label per line; only the first word counts, blank lines are
/// dropped.
pub fn read_vertex_labels(file: &str) -> anyhow::Result<Vec<Box<str>>> {
    let lines = read_lines(file)?;
    let nlines = lines.len();

    let labels: Vec<Box<str>> = lines
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .map(Box::from)
        .collect();

    if labels.len() < nlines {
        warn!(
            "{}: skipped {} blank lines",
            file,
            nlines - labels.len()
        );
    }
    Ok(labels)
}

/// Read a dense adjacency matrix (TSV, optionally gzipped)
pub fn read_adjacency(file: &str) -> anyhow::Result<Mat> {
    let graph = Mat::from_tsv(file, None)?;
    if graph.nrows() != graph.ncols() {
        anyhow::bail!(
            "{}: adjacency matrix must be square, found {} x {}",
            file,
            graph.nrows(),
            graph.ncols()
        );
    }
    info!("read a {} x {} adjacency matrix from {}", graph.nrows(), graph.ncols(), file);
    Ok(graph)
}
