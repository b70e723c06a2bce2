//! Bernoulli likelihood of an observed graph under a probability matrix.
//!
//! # Score formula (one vertex pair)
//!
//! ```text
//! score(a, p) = a * ln(p) + (1 - a) * ln(1 - p),   a = 1{A(i,j) != 0}
//! BIC         = 2 * ln(n) * #parameters - 2 * sum_{i,j} score
//! ```
//!
//! Pairs a model cannot generate are left out of the sum: the diagonal
//! when loops are off, the strict lower triangle when undirected.

use crate::error::{GraphModelError, Result};
use ndarray::prelude::*;

/// Log-likelihood of a single cell with binary outcome `edge`.
#[inline]
pub fn bernoulli_score(edge: bool, p: f64) -> f64 {
    if edge {
        p.ln()
    } else {
        (1.0 - p).ln()
    }
}

fn check_same_shape(graph: &Array2<f64>, p_mat: &Array2<f64>) -> Result<()> {
    if graph.dim() != p_mat.dim() {
        return Err(GraphModelError::Shape(format!(
            "graph is {:?} but the model has {:?}",
            graph.dim(),
            p_mat.dim()
        )));
    }
    Ok(())
}

/// Per-cell log-likelihood of the binarized `graph`.
///
/// * `clip` - if given, clamp every probability into `[clip, 1 - clip]`
///   first, so that an observed edge with `P = 0` scores `ln(clip)`
///   instead of `-inf`
///
/// Cells outside the model's support score 0.
pub fn score_samples(
    graph: &Array2<f64>,
    p_mat: &Array2<f64>,
    directed: bool,
    loops: bool,
    clip: Option<f64>,
) -> Result<Array2<f64>> {
    check_same_shape(graph, p_mat)?;

    if let Some(c) = clip {
        if !(0.0..=0.5).contains(&c) {
            return Err(GraphModelError::InvalidArgument(format!(
                "clip must be in [0, 0.5], got {}",
                c
            )));
        }
    }

    Ok(Array2::from_shape_fn(graph.dim(), |(i, j)| {
        if (!loops && i == j) || (!directed && i > j) {
            return 0.0;
        }
        let p = match clip {
            Some(c) => p_mat[(i, j)].clamp(c, 1.0 - c),
            None => p_mat[(i, j)],
        };
        bernoulli_score(graph[(i, j)] != 0.0, p)
    }))
}

/// Bayesian information criterion; lower is better
pub fn bic(score: f64, n_vertices: usize, n_parameters: usize) -> f64 {
    2.0 * (n_vertices as f64).ln() * (n_parameters as f64) - 2.0 * score
}

/// Squared Frobenius distance between `graph` and `p_mat`
pub fn mse(graph: &Array2<f64>, p_mat: &Array2<f64>) -> Result<f64> {
    check_same_shape(graph, p_mat)?;
    Ok((graph - p_mat).mapv(|x| x * x).sum())
}
