//! Estimator options and the traits shared by every model.
//!
//! [`GraphModel`] is everything that only reads a fitted state
//! (probability matrix, parameter count, sampling, scoring);
//! [`GraphEstimator`] adds `fit`. Both are object safe, so a driver can
//! hold `Vec<Box<dyn GraphEstimator<L>>>`.

use crate::error::{GraphModelError, Result};
use crate::graph_input::GraphInput;
use crate::likelihood;
use crate::sampler::sample_edges;
use ndarray::prelude::*;
use rand::RngCore;

/// Options recognised at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorOptions {
    /// Treat the graph as directed: sampled graphs are asymmetric, and
    /// scoring covers both triangles. Default: true
    pub directed: bool,
    /// Allow self-loops: sampled graphs keep their diagonal, and scoring
    /// covers it.
    pub loops: bool,
    /// Fit per-vertex degree corrections.
    pub fit_degrees: bool,
    /// Fit edge weights. Not implemented; `fit` fails if set.
    pub fit_weights: bool,
}

impl EstimatorOptions {
    /// Block-model defaults: directed, loops allowed
    pub fn sbm() -> Self {
        EstimatorOptions {
            directed: true,
            loops: true,
            fit_degrees: false,
            fit_weights: false,
        }
    }

    /// Erdos-Renyi defaults: directed, no loops
    pub fn erdos_renyi() -> Self {
        EstimatorOptions {
            directed: true,
            loops: false,
            fit_degrees: false,
            fit_weights: false,
        }
    }

    /// Fail for options that name an unimplemented feature
    pub fn check_supported(&self) -> Result<()> {
        if self.fit_weights {
            return Err(GraphModelError::NotImplemented("weighted-edge model fitting"));
        }
        Ok(())
    }
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self::sbm()
    }
}

/// The four a-priori model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Erdos-Renyi
    Er,
    /// Degree-corrected Erdos-Renyi
    Dcer,
    /// Stochastic block model
    Sbm,
    /// Degree-corrected stochastic block model
    Dcsbm,
}

impl ModelKind {
    /// Short upper-case name, e.g., `DCSBM`
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Er => "ER",
            ModelKind::Dcer => "DCER",
            ModelKind::Sbm => "SBM",
            ModelKind::Dcsbm => "DCSBM",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Queries on a fitted model.
///
/// Everything except `options` and `kind` fails with
/// [`GraphModelError::NotFitted`] before the first successful `fit`.
pub trait GraphModel {
    /// Options the estimator was built with
    fn options(&self) -> &EstimatorOptions;

    /// Which model family this is
    fn kind(&self) -> ModelKind;

    /// Fitted `n x n` vertex probability matrix
    fn p_mat(&self) -> Result<&Array2<f64>>;

    /// Number of free parameters, for model selection
    fn n_parameters(&self) -> Result<usize>;

    /// Number of vertices of the fitted graph
    fn n_vertices(&self) -> Result<usize> {
        Ok(self.p_mat()?.nrows())
    }

    /// Draw a graph from the fitted model using `rng`
    fn sample_with(&self, rng: &mut dyn RngCore) -> Result<Array2<f64>> {
        let opts = self.options();
        sample_edges(self.p_mat()?, opts.directed, opts.loops, rng)
    }

    /// Draw a graph from the fitted model using the thread-local RNG
    fn sample(&self) -> Result<Array2<f64>> {
        self.sample_with(&mut rand::rng())
    }

    /// Per-cell log-likelihood of `graph` under the fitted model
    fn score_samples(&self, graph: &GraphInput, clip: Option<f64>) -> Result<Array2<f64>> {
        let p_mat = self.p_mat()?;
        let graph = graph.to_adjacency()?;
        let opts = self.options();
        likelihood::score_samples(&graph, p_mat, opts.directed, opts.loops, clip)
    }

    /// Total log-likelihood of `graph` under the fitted model
    fn score(&self, graph: &GraphInput, clip: Option<f64>) -> Result<f64> {
        Ok(self.score_samples(graph, clip)?.sum())
    }

    /// Bayesian information criterion of `graph` (unclipped likelihood)
    fn bic(&self, graph: &GraphInput) -> Result<f64> {
        let score = self.score(graph, None)?;
        Ok(likelihood::bic(score, self.n_vertices()?, self.n_parameters()?))
    }

    /// Squared Frobenius distance between `graph` and the fitted `P`
    fn mse(&self, graph: &GraphInput) -> Result<f64> {
        let p_mat = self.p_mat()?;
        likelihood::mse(&graph.to_adjacency()?, p_mat)
    }
}

/// A model that can be fitted to a graph with vertex labels of type `L`.
pub trait GraphEstimator<L>: GraphModel {
    /// Fit to `graph` with one label per vertex.
    ///
    /// On failure the previously fitted state, if any, is left as it was.
    fn fit(&mut self, graph: &GraphInput, labels: Option<&[L]>) -> Result<()>;
}
