//! A-priori block models for binary graphs.
//!
//! Given an adjacency matrix and one label per vertex, fit the
//! Erdos-Renyi (ER), degree-corrected ER (DCER), stochastic block model
//! (SBM) and degree-corrected SBM (DCSBM), then sample new graphs from
//! or score graphs under the fitted model.
//!
//! # Model
//!
//! Vertices `i` in block `z(i)`, block probabilities `B`, optional
//! degree corrections `theta`:
//!
//! ```text
//! A(i, j) ~ Bernoulli(P(i, j)),   P(i, j) = min(1, theta(i) theta(j) B(z(i), z(j)))
//! ```
//!
//! `B(k, l)` is the mean of the `(k, l)` submatrix of `A`, and
//! `theta(i)` is the edge count of vertex `i` (out + in) divided by the
//! mean edge count of its block.

#![deny(missing_docs)]

/// Error type and its coarse classification
pub mod error;

/// Graph representations and their dense normalisation
pub mod graph_input;

/// Vertex labels to block partition
pub mod partition;

/// Block probability estimation and `P` assembly
pub mod block_prob;

/// Per-vertex degree corrections
pub mod degree;

/// Bernoulli sampling from a probability matrix
pub mod sampler;

/// Bernoulli log-likelihood, BIC and MSE
pub mod likelihood;

/// Shared block-structure fit
pub mod block_fit;

/// Estimator options and traits
pub mod estimator;

/// SBM and DCSBM
pub mod sbm;

/// ER and DCER
pub mod er;

/// Synthetic graphs from known parameters
pub mod simulate;


pub use error::{ErrorKind, GraphModelError};
pub use estimator::{EstimatorOptions, GraphEstimator, GraphModel, ModelKind};
pub use er::ErEstimator;
pub use graph_input::{GraphInput, NodeKey, NodeLinkGraph};
pub use sbm::SbmEstimator;
